//! Binding discovery and type-parameter substitution.
//!
//! A `PairWalker` walks a declared and an actual type expression in lockstep
//! and reports each type parameter it can bind to its hooks. The resulting
//! mapping feeds a `Substitutor`, which rewrites expressions in terms of the
//! bound types.

pub mod collector;
pub mod infer;
pub mod mapping;
pub mod substitutor;
pub mod variance;
pub mod walker;

#[cfg(test)]
mod substitutor_test;

pub use collector::SupertypeCollector;
pub use infer::{Binding, BindingCollector, infer_mapping, resolve_upper_bounds};
pub use mapping::{MappingCollector, MergedBound, TypeParameterMapping};
pub use substitutor::Substitutor;
pub use variance::Variance;
pub use walker::{PairContext, PairWalker, PairWalkerHooks, Pairing};
