#![allow(dead_code)]

use std::collections::HashMap;

use tybind::{
    BindingCollector, BoxBuilder, PairWalker, SupertypeCollector, SymbolTable, Ty, TyDisplay,
    TypeBuilder, TypeSymbol,
};

/// A small collection library:
///
/// ```text
/// Iterable<A>
/// Collection<B> extends Iterable<B>
/// List<C> extends Collection<C>
/// ArrayList<D> extends List<D>
/// Map<K, V>
/// StrMap<W> extends Map<Str, W>
/// Comparable<X>
/// Str extends Comparable<Str>
/// Num
/// ```
///
/// plus the free parameters `T` (bounded by `Comparable<T>`) and `U`.
pub struct Library {
    pub builder: BoxBuilder,
    pub symbols: SymbolTable<BoxBuilder>,
    names: HashMap<&'static str, TypeSymbol>,
}

impl Library {
    pub fn new() -> Self {
        let builder = BoxBuilder::new();
        let mut symbols = SymbolTable::new();
        let mut names = HashMap::new();

        let mut declare = |symbols: &mut SymbolTable<BoxBuilder>, name: &'static str, params: &[&'static str]| {
            let params: Vec<_> = params
                .iter()
                .map(|param| {
                    let symbol = symbols.parameter(param);
                    names.insert(*param, symbol);
                    symbol
                })
                .collect();
            let symbol = symbols.declare(name, &params);
            names.insert(name, symbol);
            symbol
        };

        let iterable = declare(&mut symbols, "Iterable", &["A"]);
        let collection = declare(&mut symbols, "Collection", &["B"]);
        let list = declare(&mut symbols, "List", &["C"]);
        let array_list = declare(&mut symbols, "ArrayList", &["D"]);
        let map = declare(&mut symbols, "Map", &["K", "V"]);
        let str_map = declare(&mut symbols, "StrMap", &["W"]);
        let comparable = declare(&mut symbols, "Comparable", &["X"]);
        let str_sym = declare(&mut symbols, "Str", &[]);
        declare(&mut symbols, "Num", &[]);

        let t = symbols.parameter("T");
        let u = symbols.parameter("U");
        names.insert("T", t);
        names.insert("U", u);

        let param = |names: &HashMap<&'static str, TypeSymbol>, name| builder.reference(names[name]);
        symbols.add_supertype(collection, builder.parameterized(iterable, [param(&names, "B")]));
        symbols.add_supertype(list, builder.parameterized(collection, [param(&names, "C")]));
        symbols.add_supertype(array_list, builder.parameterized(list, [param(&names, "D")]));
        symbols.add_supertype(
            str_map,
            builder.parameterized(map, [builder.reference(str_sym), param(&names, "W")]),
        );
        symbols.add_supertype(
            str_sym,
            builder.parameterized(comparable, [builder.reference(str_sym)]),
        );
        symbols.add_upper_bound(t, builder.parameterized(comparable, [builder.reference(t)]));

        Self {
            builder,
            symbols,
            names,
        }
    }

    pub fn sym(&self, name: &str) -> TypeSymbol {
        self.names[name]
    }

    /// Reference to a named type or parameter.
    pub fn r(&self, name: &str) -> Ty<BoxBuilder> {
        self.builder.reference(self.sym(name))
    }

    /// `name<args...>`.
    pub fn app<const N: usize>(&self, name: &str, args: [Ty<BoxBuilder>; N]) -> Ty<BoxBuilder> {
        self.builder.parameterized(self.sym(name), args)
    }

    pub fn show(&self, ty: &Ty<BoxBuilder>) -> String {
        ty.display_named(self.builder, &self.symbols)
    }

    /// Every binding of walking `declared` against `actual`, rendered as
    /// `"T -> Str (expected, actual)"`.
    pub fn bindings(&self, declared: &Ty<BoxBuilder>, actual: &Ty<BoxBuilder>) -> Vec<String> {
        let mut walker = PairWalker::new(
            self.builder,
            BindingCollector::new(),
            SupertypeCollector::new(&self.symbols, self.builder),
        );
        walker
            .process_paired_references(declared, actual)
            .expect("walk failed");
        walker
            .hooks()
            .bindings()
            .iter()
            .map(|binding| {
                format!(
                    "{} -> {} ({}, {})",
                    self.symbols.name(binding.parameter).unwrap_or("?"),
                    self.show(&binding.ty),
                    binding.expected_variance,
                    binding.actual_variance
                )
            })
            .collect()
    }
}

/// Declare a test walking a declared/actual pair over the `Library`.
#[macro_export]
macro_rules! binding_case {
    (
        $name:ident,
        declared: |$lib:ident| $declared:expr,
        actual: $actual:expr,
        bindings: [$($binding:expr),* $(,)?] $(,)?
    ) => {
        #[test]
        fn $name() {
            let $lib = cases::Library::new();
            let declared = $declared;
            let actual = $actual;
            let expected: Vec<&str> = vec![$($binding),*];
            pretty_assertions::assert_eq!($lib.bindings(&declared, &actual), expected);
        }
    };
}
