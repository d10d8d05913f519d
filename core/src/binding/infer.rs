//! Driver-side conveniences: collecting bindings into a mapping and
//! resolving declared bounds through it.

use hashbrown::HashSet;
use tracing::trace;
use tybind_types::{SymbolTable, Ty, TypeBuilder, TypeSymbol};

use super::{
    mapping::{MappingCollector, MergedBound, TypeParameterMapping},
    substitutor::Substitutor,
    variance::Variance,
    walker::{PairContext, PairWalker, PairWalkerHooks},
};
use crate::{Vec, errors::UnifyResult, options::UnifyOptions};

/// One binding reported by a `PairWalker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<B: TypeBuilder> {
    pub parameter: TypeSymbol,
    pub ty: Ty<B>,
    pub origin: Ty<B>,
    pub expected_variance: Variance,
    pub actual_variance: Variance,
}

impl<B: TypeBuilder> Binding<B> {
    pub fn is_invariant(&self) -> bool {
        self.expected_variance == Variance::Invariant && self.actual_variance == Variance::Invariant
    }
}

/// Walker hooks that record distinct bindings, optionally restricted to a
/// set of parameters.
///
/// Supertype reconciliation can reach the same slot through several
/// inherited parameters; a binding equal to an earlier one (same parameter,
/// type and variances) is recorded once, under its first origin.
#[derive(Debug, Clone)]
pub struct BindingCollector<B: TypeBuilder> {
    scope: Option<HashSet<TypeSymbol>>,
    bindings: Vec<Binding<B>>,
}

impl<B: TypeBuilder> Default for BindingCollector<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: TypeBuilder> BindingCollector<B> {
    /// Collect bindings of every parameter.
    pub fn new() -> Self {
        Self {
            scope: None,
            bindings: Vec::new(),
        }
    }

    /// Collect bindings of `parameters` only.
    pub fn scoped(parameters: impl IntoIterator<Item = TypeSymbol>) -> Self {
        Self {
            scope: Some(parameters.into_iter().collect()),
            bindings: Vec::new(),
        }
    }

    pub fn bindings(&self) -> &[Binding<B>] {
        &self.bindings
    }

    pub fn into_bindings(self) -> Vec<Binding<B>> {
        self.bindings
    }

    /// Merge to one bound per parameter: the first invariant binding if there
    /// is one, otherwise the first binding.
    pub fn into_mapping(self) -> TypeParameterMapping<B> {
        let mut mapping = TypeParameterMapping::new();
        let mut exact = HashSet::new();
        for binding in self.bindings {
            let invariant = binding.is_invariant();
            if exact.contains(&binding.parameter) {
                continue;
            }
            if invariant {
                exact.insert(binding.parameter);
                mapping.insert(binding.parameter, MergedBound::new(binding.ty));
            } else {
                mapping
                    .entry(binding.parameter)
                    .or_insert_with(|| MergedBound::new(binding.ty));
            }
        }
        mapping
    }
}

impl<B: TypeBuilder> PairWalkerHooks<B> for BindingCollector<B> {
    fn should_process(&self, parameter: TypeSymbol) -> bool {
        self.scope
            .as_ref()
            .is_none_or(|scope| scope.contains(&parameter))
    }

    fn on_type_parameter_bound(
        &mut self,
        parameter: TypeSymbol,
        bound: &Ty<B>,
        context: &PairContext<B>,
    ) -> UnifyResult {
        let seen = self.bindings.iter().any(|binding| {
            binding.parameter == parameter
                && binding.ty == *bound
                && binding.expected_variance == context.expected_variance
                && binding.actual_variance == context.actual_variance
        });
        if !seen {
            self.bindings.push(Binding {
                parameter,
                ty: bound.clone(),
                origin: context.origin.clone(),
                expected_variance: context.expected_variance,
                actual_variance: context.actual_variance,
            });
        }
        Ok(())
    }
}

/// Walk `declared` against `actual` and merge the discovered bindings.
///
/// Only `scope` parameters are bound when a scope is given.
pub fn infer_mapping<B, C>(
    builder: B,
    collector: C,
    declared: &Ty<B>,
    actual: &Ty<B>,
    scope: Option<&[TypeSymbol]>,
    options: UnifyOptions,
) -> UnifyResult<TypeParameterMapping<B>>
where
    B: TypeBuilder,
    C: MappingCollector<B>,
{
    let hooks = match scope {
        Some(parameters) => BindingCollector::scoped(parameters.iter().copied()),
        None => BindingCollector::new(),
    };
    let mut walker = PairWalker::with_options(builder, hooks, collector, options);
    walker.process_paired_references(declared, actual)?;
    let mapping = walker.into_hooks().into_mapping();
    trace!(bound = mapping.len(), "inferred type parameter mapping");
    Ok(mapping)
}

/// The declared upper bounds of `parameter`, rewritten through `mapping`.
///
/// An F-bounded parameter such as `T extends Comparable<T>` resolves
/// through its own binding: with `T -> Str` the bound is `Comparable<Str>`.
pub fn resolve_upper_bounds<B: TypeBuilder>(
    table: &SymbolTable<B>,
    builder: B,
    parameter: TypeSymbol,
    mapping: &TypeParameterMapping<B>,
    options: UnifyOptions,
) -> UnifyResult<Vec<Ty<B>>> {
    let substitutor = Substitutor::with_options(builder, mapping.clone(), options);
    table
        .upper_bounds(parameter)
        .iter()
        .map(|bound| substitutor.substitute(bound))
        .collect()
}
