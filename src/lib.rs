//! Tybind - generic type binding and substitution
//!
//! # Overview
//!
//! Tybind discovers how the type parameters of a declared generic type are
//! bound by an actual type, and rewrites type expressions in terms of those
//! bindings. Common uses include:
//!
//! - Inferring the type arguments of a generic call from its arguments
//! - Resolving a declared bound (`T extends Comparable<T>`) once `T` is known
//! - Reading a generic supertype's arguments off a subtype (`List<T>` vs `ArrayList<Str>`)
//!
//! # Quick Start
//!
//! ```
//! use tybind::{
//!     BoxBuilder, Substitutor, SupertypeCollector, SymbolTable, TyDisplay, TypeBuilder,
//!     UnifyOptions, infer_mapping,
//! };
//!
//! let builder = BoxBuilder::new();
//! let mut symbols = SymbolTable::new();
//! let e = symbols.parameter("E");
//! let list = symbols.declare("List", &[e]);
//! let f = symbols.parameter("F");
//! let array_list = symbols.declare("ArrayList", &[f]);
//! symbols.add_supertype(array_list, builder.parameterized(list, [builder.reference(f)]));
//! let str_ty = builder.reference(symbols.declare("Str", &[]));
//! let t = symbols.parameter("T");
//!
//! // Declared `List<T>`, actual `ArrayList<Str>`
//! let declared = builder.parameterized(list, [builder.reference(t)]);
//! let actual = builder.parameterized(array_list, [str_ty]);
//! let mapping = infer_mapping(
//!     builder,
//!     SupertypeCollector::new(&symbols, builder),
//!     &declared,
//!     &actual,
//!     None,
//!     UnifyOptions::default(),
//! )
//! .unwrap();
//!
//! let substitutor = Substitutor::new(builder, mapping);
//! let resolved = substitutor.substitute(&builder.array(builder.reference(t))).unwrap();
//! assert_eq!(resolved.display_named(builder, &symbols), "Str[]");
//! ```
//!
//! # Crates
//!
//! 1. **`tybind-types`**: the type expression algebra, builders and visitor
//! 2. **`tybind-core`**: the pair walker, the substitutor and their collaborators

// Re-export the type expression algebra
pub use tybind_types::{
    ArenaBuilder, BoxBuilder, ContextId, Ownership, SymbolError, SymbolKind, SymbolTable, Ty,
    TyDisplay, TypeBuilder, TypeFlags, TypeFormatter, TypeKind, TypeSymbol, TypeVisitor,
    types_equal,
};

// Re-export binding and substitution
pub use tybind_core::{
    Binding, BindingCollector, CyclePolicy, MappingCollector, MergedBound, PairContext,
    PairWalker, PairWalkerHooks, Pairing, Phase, Substitutor, SupertypeCollector,
    TypeParameterMapping, UnifyError, UnifyOptions, UnifyResult, Variance, infer_mapping,
    resolve_upper_bounds,
};
