//! Type-parameter binding maps and the collector contract that produces them.

use hashbrown::HashMap;
use tybind_types::{Ty, TypeBuilder, TypeSymbol};

use crate::errors::UnifyResult;

/// The single representative type chosen for a type parameter after all of
/// its bound or argument occurrences were merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedBound<B: TypeBuilder> {
    pub ty: Ty<B>,
}

impl<B: TypeBuilder> MergedBound<B> {
    pub fn new(ty: Ty<B>) -> Self {
        Self { ty }
    }
}

impl<B: TypeBuilder> From<Ty<B>> for MergedBound<B> {
    fn from(ty: Ty<B>) -> Self {
        Self::new(ty)
    }
}

/// Binding from type-parameter symbols to their merged bound types.
pub type TypeParameterMapping<B> = HashMap<TypeSymbol, MergedBound<B>>;

/// Computes, for a parameterized expression, the binding of its declarator's
/// type parameters (including those inherited through supertypes) to the
/// type expressions the expression supplies.
///
/// Closures of the right shape are collectors:
///
/// ```
/// use tybind_core::{MappingCollector, TypeParameterMapping, UnifyResult};
/// use tybind_types::{BoxBuilder, Ty};
///
/// let mut empty = |_: &Ty<BoxBuilder>| -> UnifyResult<TypeParameterMapping<BoxBuilder>> {
///     Ok(TypeParameterMapping::new())
/// };
/// let any = tybind_types::TypeBuilder::any(BoxBuilder::new());
/// assert!(empty.collect(&any).unwrap().is_empty());
/// ```
pub trait MappingCollector<B: TypeBuilder> {
    fn collect(&mut self, ty: &Ty<B>) -> UnifyResult<TypeParameterMapping<B>>;
}

impl<B, F> MappingCollector<B> for F
where
    B: TypeBuilder,
    F: FnMut(&Ty<B>) -> UnifyResult<TypeParameterMapping<B>>,
{
    fn collect(&mut self, ty: &Ty<B>) -> UnifyResult<TypeParameterMapping<B>> {
        self(ty)
    }
}
