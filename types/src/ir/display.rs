use super::{SymbolTable, Ty, TypeBuilder, TypeSymbol, TypeVisitor};
use alloc::string::String;
use core::fmt::Write;

/// Visitor that formats type expressions into strings.
///
/// Symbol names come from an optional `SymbolTable`; symbols it doesn't
/// know are printed by identity (`'3` for parameters, `#3` for declarators).
pub struct TypeFormatter<'n, B: TypeBuilder> {
    output: String,
    builder: B,
    names: Option<&'n SymbolTable<B>>,
}

impl<'n, B: TypeBuilder> TypeFormatter<'n, B> {
    pub fn new(builder: B) -> Self {
        Self {
            output: String::new(),
            builder,
            names: None,
        }
    }

    pub fn with_names(mut self, names: &'n SymbolTable<B>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn format(ty: &Ty<B>, builder: B) -> String {
        Self::new(builder).finish(ty)
    }

    pub fn format_named(ty: &Ty<B>, builder: B, names: &'n SymbolTable<B>) -> String {
        Self::new(builder).with_names(names).finish(ty)
    }

    fn finish(mut self, ty: &Ty<B>) -> String {
        ty.accept(&mut self, &mut ());
        self.output
    }

    fn symbol(&mut self, symbol: TypeSymbol) {
        match self.names.and_then(|names| names.name(symbol)) {
            Some(name) => self.output.push_str(name),
            None => {
                let _ = write!(self.output, "{}", symbol);
            }
        }
    }

    fn list(&mut self, types: &[Ty<B>], separator: &str) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                self.output.push_str(separator);
            }
            ty.accept(self, &mut ());
        }
    }
}

impl<'n, B: TypeBuilder> TypeVisitor<B> for TypeFormatter<'n, B> {
    type Output = ();

    fn builder(&self) -> B {
        self.builder
    }

    // Only `Any` reaches this; every other variant has its own handler.
    fn visit_default(&mut self, _ty: &Ty<B>, _: &mut ()) {
        self.output.push_str("any");
    }

    fn visit_array(&mut self, _ty: &Ty<B>, component: &Ty<B>, _: &mut ()) {
        component.accept(self, &mut ());
        self.output.push_str("[]");
    }

    fn visit_parameterized(&mut self, _ty: &Ty<B>, head: TypeSymbol, args: &[Ty<B>], _: &mut ()) {
        self.symbol(head);
        if !args.is_empty() {
            self.output.push('<');
            self.list(args, ", ");
            self.output.push('>');
        }
    }

    fn visit_wildcard(
        &mut self,
        _ty: &Ty<B>,
        lower: Option<&Ty<B>>,
        upper: &[Ty<B>],
        _: &mut (),
    ) {
        self.output.push('?');
        if let Some(lower) = lower {
            self.output.push_str(" super ");
            lower.accept(self, &mut ());
        }
        if !upper.is_empty() {
            self.output.push_str(" extends ");
            self.list(upper, " & ");
        }
    }

    fn visit_function(
        &mut self,
        _ty: &Ty<B>,
        params: &[Ty<B>],
        ret: Option<&Ty<B>>,
        type_args: &[Ty<B>],
        _: &mut (),
    ) {
        if !type_args.is_empty() {
            self.output.push('<');
            self.list(type_args, ", ");
            self.output.push('>');
        }
        self.output.push('(');
        self.list(params, ", ");
        self.output.push_str(") => ");
        match ret {
            Some(ret) => ret.accept(self, &mut ()),
            None => self.output.push_str("void"),
        }
    }

    fn visit_compound(&mut self, _ty: &Ty<B>, components: &[Ty<B>], synonym: bool, _: &mut ()) {
        self.list(components, if synonym { " | " } else { " & " });
    }
}

/// Extension trait to add display methods to types.
pub trait TyDisplay<B: TypeBuilder> {
    fn display(&self, builder: B) -> String;

    fn display_named(&self, builder: B, names: &SymbolTable<B>) -> String;
}

impl<B: TypeBuilder> TyDisplay<B> for Ty<B> {
    fn display(&self, builder: B) -> String {
        TypeFormatter::format(self, builder)
    }

    fn display_named(&self, builder: B, names: &SymbolTable<B>) -> String {
        TypeFormatter::format_named(self, builder, names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxBuilder;

    fn names() -> (BoxBuilder, SymbolTable<BoxBuilder>, TypeSymbol, TypeSymbol, TypeSymbol) {
        let builder = BoxBuilder::new();
        let mut table = SymbolTable::new();
        let t = table.parameter("T");
        let list = table.declare("List", &[t]);
        let str_sym = table.declare("Str", &[]);
        (builder, table, t, list, str_sym)
    }

    #[test]
    fn test_format_any() {
        let builder = BoxBuilder::new();
        assert_eq!(TypeFormatter::format(&builder.any(), builder), "any");
    }

    #[test]
    fn test_format_unnamed_symbols() {
        let builder = BoxBuilder::new();
        let ty = builder.parameterized(
            TypeSymbol::declarator(4, 1),
            [builder.reference(TypeSymbol::parameter(2))],
        );
        assert_eq!(ty.display(builder), "#4<'2>");
    }

    #[test]
    fn test_format_parameterized_and_array() {
        let (builder, table, t, list, _) = names();
        let ty = builder.array(builder.parameterized(list, [builder.reference(t)]));
        assert_eq!(ty.display_named(builder, &table), "List<T>[]");
    }

    #[test]
    fn test_format_wildcards() {
        let (builder, table, t, _, str_sym) = names();
        let upper = builder.wildcard_extends([builder.reference(str_sym), builder.reference(t)]);
        let lower = builder.wildcard_super(builder.reference(t));
        let bare = builder.wildcard(None, []);
        assert_eq!(upper.display_named(builder, &table), "? extends Str & T");
        assert_eq!(lower.display_named(builder, &table), "? super T");
        assert_eq!(bare.display_named(builder, &table), "?");
    }

    #[test]
    fn test_format_function_and_compound() {
        let (builder, table, t, _, str_sym) = names();
        let str_ty = builder.reference(str_sym);
        let t_ty = builder.reference(t);

        let function = builder.function([str_ty.clone(), t_ty.clone()], Some(t_ty.clone()), [t_ty.clone()]);
        assert_eq!(function.display_named(builder, &table), "<T>(Str, T) => T");

        let procedure = builder.function([], None, []);
        assert_eq!(procedure.display(builder), "() => void");

        let union = builder.compound([str_ty.clone(), t_ty.clone()], true);
        let intersection = builder.compound([str_ty, t_ty], false);
        assert_eq!(union.display_named(builder, &table), "Str | T");
        assert_eq!(intersection.display_named(builder, &table), "Str & T");
    }
}
