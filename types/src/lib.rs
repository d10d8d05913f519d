//! Type expression algebra with pluggable type builders.
//!
//! This crate provides the closed set of type expressions the binding and
//! substitution engine works on (`Any`, arrays, parameterized types,
//! wildcards, function types and compound types), stored through different
//! strategies (arena, RC-based).
//!
//! # Example
//!
//! ```
//! use tybind_types::{BoxBuilder, SymbolTable, TypeBuilder};
//!
//! let builder = BoxBuilder::new();
//! let mut symbols: SymbolTable<BoxBuilder> = SymbolTable::new();
//! let t = symbols.parameter("T");
//! let list = symbols.declare("List", &[t]);
//!
//! let list_of_t = builder.parameterized(list, [builder.reference(t)]);
//! assert!(!list_of_t.is_resolved_in(builder, builder.context()));
//! ```

#![no_std]
extern crate alloc;

// Intermediate Representation - generic type expressions
pub mod ir;

// Concrete builder implementations
pub mod arena_builder;
pub mod box_builder;

// Re-export IR types for convenience
pub use ir::{
    ContextId, Ownership, SymbolError, SymbolKind, SymbolTable, Ty, TyData, TyDisplay, TypeBuilder,
    TypeFlags, TypeFormatter, TypeKind, TypeSymbol, TypeVisitor, types_equal,
};

// Re-export concrete builders
pub use arena_builder::ArenaBuilder;
pub use box_builder::BoxBuilder;
