#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{format, string::String, vec, vec::Vec};

pub mod binding;
pub mod errors;
pub mod options;

pub use binding::{
    Binding, BindingCollector, MappingCollector, MergedBound, PairContext, PairWalker,
    PairWalkerHooks, Pairing, Substitutor, SupertypeCollector, TypeParameterMapping, Variance,
    infer_mapping, resolve_upper_bounds,
};
pub use errors::{Phase, UnifyError, UnifyResult};
pub use options::{CyclePolicy, UnifyOptions};
