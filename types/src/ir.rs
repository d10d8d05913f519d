//! Intermediate Representation (IR) for type expressions.
//!
//! This module contains the generic, builder-agnostic representation of types.
//! The IR is parameterized by the `TypeBuilder` trait, which allows different
//! implementations to choose how types are built and stored in memory.
//!
//! ## Structure
//!
//! - **Core types**: `TypeKind`, `Ty` - the logical structure of type expressions
//! - **Symbols**: `TypeSymbol`, `SymbolTable` - identities of declarators and type parameters
//! - **TypeBuilder trait**: Abstract interface for type construction and storage
//! - **Visitor**: double dispatch over the closed set of variants
//! - **Display**: Pretty-printing support

pub mod builder;
pub mod display;
pub mod symbol;
pub mod ty;
pub mod view;
pub mod visit;

pub use builder::TypeBuilder;
pub use display::{TyDisplay, TypeFormatter};
pub use symbol::{SymbolError, SymbolKind, SymbolTable, TypeSymbol};
pub use ty::{ContextId, Ownership, Ty, TyData, TypeFlags, TypeKind};
pub use view::types_equal;
pub use visit::TypeVisitor;
