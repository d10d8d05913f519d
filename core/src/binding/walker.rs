//! Lockstep walk over a declared and an actual type expression.
//!
//! The walker dispatches twice: first on the declared expression (the
//! walker's own `TypeVisitor` impl), then on the actual expression through
//! a traverser that remembers the declared side. Which traverser runs
//! decides which row of the pairing table applies.

use hashbrown::HashSet;
use tracing::{debug, trace};
use tybind_types::{Ty, TypeBuilder, TypeSymbol, TypeVisitor, types_equal};

use super::{
    mapping::{MappingCollector, TypeParameterMapping},
    substitutor::Substitutor,
    variance::Variance,
};
use crate::{
    Vec,
    errors::{Phase, UnifyError, UnifyResult},
    options::UnifyOptions,
};

/// Depth charged for one level of supertype reconciliation.
const RECONCILIATION_DEPTH: usize = 8;

/// Variance and provenance in effect for one comparison.
///
/// Contexts are values: each recursive step derives a new one, so sibling
/// branches never observe each other's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairContext<B: TypeBuilder> {
    pub expected_variance: Variance,
    pub actual_variance: Variance,
    /// The declared node that caused the current comparison.
    pub origin: Ty<B>,
    pub depth: usize,
}

impl<B: TypeBuilder> PairContext<B> {
    /// Context of a top-level pairing: both sides covariant.
    pub fn root(declared: &Ty<B>) -> Self {
        Self {
            expected_variance: Variance::Out,
            actual_variance: Variance::Out,
            origin: declared.clone(),
            depth: 0,
        }
    }

    /// Context one level deeper, with new variances and origin.
    pub fn descend(&self, origin: &Ty<B>, expected_variance: Variance, actual_variance: Variance) -> Self {
        Self {
            expected_variance,
            actual_variance,
            origin: origin.clone(),
            depth: self.depth + 1,
        }
    }

    /// Context one level deeper, keeping variances and origin.
    pub fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self.clone()
        }
    }
}

/// The actual side of a pairing, handed to the declared side's visit.
#[derive(Debug, Clone)]
pub struct Pairing<B: TypeBuilder> {
    pub actual: Ty<B>,
    pub context: PairContext<B>,
}

/// Policy and result hooks of a `PairWalker`.
///
/// Every method has a default, so `()` is a walker that binds nothing
/// observable.
pub trait PairWalkerHooks<B: TypeBuilder> {
    /// Whether bindings of `parameter` are of interest.
    fn should_process(&self, parameter: TypeSymbol) -> bool {
        let _ = parameter;
        true
    }

    /// Whether a declared-side bound headed by `parameter` should be resolved
    /// and paired during supertype reconciliation.
    fn should_process_in_context_of(
        &self,
        parameter: TypeSymbol,
        bound_parameters: &[TypeSymbol],
        visited: &HashSet<TypeSymbol>,
    ) -> bool {
        let _ = (parameter, bound_parameters, visited);
        true
    }

    /// Called once per discovered binding of `parameter` to `bound`.
    fn on_type_parameter_bound(
        &mut self,
        parameter: TypeSymbol,
        bound: &Ty<B>,
        context: &PairContext<B>,
    ) -> UnifyResult {
        let _ = (parameter, bound, context);
        Ok(())
    }
}

impl<B: TypeBuilder> PairWalkerHooks<B> for () {}

/// Discovers type-parameter bindings by walking declared/actual pairs.
///
/// Shape mismatches are not errors; they produce no bindings. Errors come
/// only from the recursion limit, from the mapping collector, and from the
/// substitutors used during supertype reconciliation.
///
/// # Example
///
/// ```
/// use tybind_core::{BindingCollector, PairWalker, TypeParameterMapping, UnifyResult};
/// use tybind_types::{BoxBuilder, Ty, TypeBuilder, TypeSymbol};
///
/// let builder = BoxBuilder::new();
/// let t = TypeSymbol::parameter(0);
/// let str_ty = builder.reference(TypeSymbol::declarator(1, 0));
/// let no_supertypes = |_: &Ty<BoxBuilder>| -> UnifyResult<TypeParameterMapping<BoxBuilder>> {
///     Ok(TypeParameterMapping::new())
/// };
///
/// let mut walker = PairWalker::new(builder, BindingCollector::new(), no_supertypes);
/// walker
///     .process_paired_references(&builder.array(builder.reference(t)), &builder.array(str_ty))
///     .unwrap();
/// assert_eq!(walker.hooks().bindings().len(), 1);
/// ```
pub struct PairWalker<B: TypeBuilder, H, C> {
    builder: B,
    hooks: H,
    collector: C,
    options: UnifyOptions,
    /// (declared, actual) pairs whose supertypes are being reconciled.
    reconciling: Vec<(Ty<B>, Ty<B>)>,
}

impl<B, H, C> PairWalker<B, H, C>
where
    B: TypeBuilder,
    H: PairWalkerHooks<B>,
    C: MappingCollector<B>,
{
    pub fn new(builder: B, hooks: H, collector: C) -> Self {
        Self::with_options(builder, hooks, collector, UnifyOptions::default())
    }

    pub fn with_options(builder: B, hooks: H, collector: C, options: UnifyOptions) -> Self {
        Self {
            builder,
            hooks,
            collector,
            options,
            reconciling: Vec::new(),
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H {
        self.hooks
    }

    pub fn options(&self) -> &UnifyOptions {
        &self.options
    }

    /// Walk `declared` against `actual`, reporting bindings to the hooks.
    pub fn process_paired_references(&mut self, declared: &Ty<B>, actual: &Ty<B>) -> UnifyResult {
        self.outer_visit(declared, actual, PairContext::root(declared))
    }

    /// Substitutor over `mapping` sharing this walker's builder and options.
    pub fn create_substitutor(&self, mapping: TypeParameterMapping<B>) -> Substitutor<B> {
        Substitutor::with_options(self.builder, mapping, self.options)
    }

    fn outer_visit(&mut self, declared: &Ty<B>, actual: &Ty<B>, context: PairContext<B>) -> UnifyResult {
        let limit = self.options.max_depth;
        if context.depth > limit {
            debug!(limit, "pair walk depth limit reached");
            return Err(UnifyError::RecursionLimit {
                limit,
                phase: Phase::Walking,
            });
        }
        declared.accept(
            self,
            &mut Pairing {
                actual: actual.clone(),
                context,
            },
        )
    }

    fn process_type_parameter(
        &mut self,
        parameter: TypeSymbol,
        bound: &Ty<B>,
        context: &PairContext<B>,
    ) -> UnifyResult {
        if !self.hooks.should_process(parameter) {
            return Ok(());
        }
        trace!(
            %parameter,
            expected = %context.expected_variance,
            actual = %context.actual_variance,
            "type parameter bound"
        );
        self.hooks.on_type_parameter_bound(parameter, bound, context)
    }

    /// Pair the type arguments `declared` and `actual` pass to the same
    /// declared type parameters, reached through either side's supertypes.
    ///
    /// A pair already being reconciled further up is skipped, which ends
    /// F-bounded hierarchies such as `Node<N> extends Comparable<Node<N>>`.
    fn reconcile_supertypes(
        &mut self,
        declared: &Ty<B>,
        actual: &Ty<B>,
        context: &PairContext<B>,
    ) -> UnifyResult {
        let builder = self.builder;
        let in_progress = self.reconciling.iter().any(|(outer_declared, outer_actual)| {
            types_equal(outer_declared, builder, declared, builder)
                && types_equal(outer_actual, builder, actual, builder)
        });
        if in_progress {
            trace!("supertype reconciliation already in progress");
            return Ok(());
        }

        self.reconciling.push((declared.clone(), actual.clone()));
        let result = self.pair_supertype_arguments(declared, actual, context);
        self.reconciling.pop();
        result
    }

    fn pair_supertype_arguments(
        &mut self,
        declared: &Ty<B>,
        actual: &Ty<B>,
        context: &PairContext<B>,
    ) -> UnifyResult {
        let actual_mapping = self.collector.collect(actual)?;
        let declared_mapping = self.collector.collect(declared)?;
        let actual_substitutor = self.create_substitutor(actual_mapping);
        let declared_substitutor = self.create_substitutor(declared_mapping);
        let actual_mapping = actual_substitutor.mapping();
        let declared_mapping = declared_substitutor.mapping();

        let mut bound_parameters: Vec<TypeSymbol> = actual_mapping.keys().copied().collect();
        bound_parameters.sort_unstable();
        trace!(parameters = bound_parameters.len(), "reconciling supertype arguments");

        let mut nested = context.descend(declared, Variance::Invariant, Variance::Invariant);
        nested.depth = context.depth + RECONCILIATION_DEPTH;

        let mut visited = HashSet::new();
        for &start in &bound_parameters {
            if !visited.insert(start) {
                continue;
            }

            let mut parameter = start;
            let declared_bound = loop {
                if let Some(bound) = declared_mapping.get(&parameter) {
                    break Some(bound);
                }
                match self.find_mapped_parameter(parameter, &bound_parameters, actual_mapping, &mut visited) {
                    Some(alias) => parameter = alias,
                    None => break None,
                }
            };
            let Some(declared_bound) = declared_bound else {
                continue;
            };
            let Some(actual_bound) = actual_mapping.get(&parameter) else {
                continue;
            };

            let mut declared_ty = declared_bound.ty.clone();
            if let Some(declared_parameter) = declared_ty.parameter(self.builder) {
                if !self
                    .hooks
                    .should_process_in_context_of(declared_parameter, &bound_parameters, &visited)
                {
                    continue;
                }
                declared_ty = declared_substitutor.substitute(&declared_ty)?;
            }
            let actual_ty = actual_substitutor.substitute(&actual_bound.ty)?;

            self.outer_visit(&declared_ty, &actual_ty, nested.clone())?;
        }
        Ok(())
    }

    /// The first bound parameter (by symbol order) whose bound type is
    /// headed by `parameter`, unless it was already visited.
    fn find_mapped_parameter(
        &self,
        parameter: TypeSymbol,
        bound_parameters: &[TypeSymbol],
        mapping: &TypeParameterMapping<B>,
        visited: &mut HashSet<TypeSymbol>,
    ) -> Option<TypeSymbol> {
        let alias = bound_parameters.iter().copied().find(|candidate| {
            mapping
                .get(candidate)
                .is_some_and(|bound| bound.ty.head(self.builder) == Some(parameter))
        })?;
        visited.insert(alias).then_some(alias)
    }
}

impl<B, H, C> TypeVisitor<B, Pairing<B>> for PairWalker<B, H, C>
where
    B: TypeBuilder,
    H: PairWalkerHooks<B>,
    C: MappingCollector<B>,
{
    type Output = UnifyResult;

    fn builder(&self) -> B {
        self.builder
    }

    // Declared `Any`, function and compound expressions bind nothing.
    fn visit_default(&mut self, _declared: &Ty<B>, _pairing: &mut Pairing<B>) -> UnifyResult {
        Ok(())
    }

    fn visit_array(&mut self, _declared: &Ty<B>, component: &Ty<B>, pairing: &mut Pairing<B>) -> UnifyResult {
        let actual = pairing.actual.clone();
        actual.accept(
            &mut ArrayTraverser {
                walker: self,
                component,
            },
            &mut pairing.context,
        )
    }

    fn visit_parameterized(
        &mut self,
        declared: &Ty<B>,
        head: TypeSymbol,
        _args: &[Ty<B>],
        pairing: &mut Pairing<B>,
    ) -> UnifyResult {
        let actual = pairing.actual.clone();
        actual.accept(
            &mut ParameterizedTraverser {
                walker: self,
                declared,
                head,
            },
            &mut pairing.context,
        )
    }

    fn visit_wildcard(
        &mut self,
        declared: &Ty<B>,
        lower: Option<&Ty<B>>,
        upper: &[Ty<B>],
        pairing: &mut Pairing<B>,
    ) -> UnifyResult {
        let actual = pairing.actual.clone();
        actual.accept(
            &mut WildcardTraverser {
                walker: self,
                declared,
                lower,
                upper,
            },
            &mut pairing.context,
        )
    }
}

/// Visits the actual side when the declared side is parameterized.
struct ParameterizedTraverser<'a, B: TypeBuilder, H, C> {
    walker: &'a mut PairWalker<B, H, C>,
    declared: &'a Ty<B>,
    head: TypeSymbol,
}

impl<'a, B, H, C> ParameterizedTraverser<'a, B, H, C>
where
    B: TypeBuilder,
    H: PairWalkerHooks<B>,
    C: MappingCollector<B>,
{
    /// Bind the declared parameter to an actual value, if the declared head
    /// is a parameter.
    fn bind_opaque(&mut self, actual: &Ty<B>, context: &PairContext<B>) -> UnifyResult {
        if self.head.is_parameter() {
            self.walker.process_type_parameter(self.head, actual, context)
        } else {
            Ok(())
        }
    }
}

impl<'a, B, H, C> TypeVisitor<B, PairContext<B>> for ParameterizedTraverser<'a, B, H, C>
where
    B: TypeBuilder,
    H: PairWalkerHooks<B>,
    C: MappingCollector<B>,
{
    type Output = UnifyResult;

    fn builder(&self) -> B {
        self.walker.builder
    }

    // Any, function and compound actuals are opaque values.
    fn visit_default(&mut self, actual: &Ty<B>, context: &mut PairContext<B>) -> UnifyResult {
        self.bind_opaque(actual, context)
    }

    fn visit_array(&mut self, actual: &Ty<B>, _component: &Ty<B>, context: &mut PairContext<B>) -> UnifyResult {
        self.bind_opaque(actual, context)
    }

    fn visit_parameterized(
        &mut self,
        actual: &Ty<B>,
        actual_head: TypeSymbol,
        _args: &[Ty<B>],
        context: &mut PairContext<B>,
    ) -> UnifyResult {
        if self.head.is_parameter() {
            if self.head != actual_head {
                self.walker.process_type_parameter(self.head, actual, context)?;
            }
            Ok(())
        } else if self.head.declares_parameters() {
            self.walker.reconcile_supertypes(self.declared, actual, context)
        } else {
            Ok(())
        }
    }

    fn visit_wildcard(
        &mut self,
        _actual: &Ty<B>,
        lower: Option<&Ty<B>>,
        upper: &[Ty<B>],
        context: &mut PairContext<B>,
    ) -> UnifyResult {
        let declared = self.declared;
        let expected = context.expected_variance;
        if let Some(lower) = lower {
            return self
                .walker
                .outer_visit(declared, lower, context.descend(declared, expected, Variance::In));
        }
        for bound in upper {
            self.walker
                .outer_visit(declared, bound, context.descend(declared, expected, Variance::Out))?;
        }
        Ok(())
    }
}

/// Visits the actual side when the declared side is a wildcard.
struct WildcardTraverser<'a, B: TypeBuilder, H, C> {
    walker: &'a mut PairWalker<B, H, C>,
    declared: &'a Ty<B>,
    lower: Option<&'a Ty<B>>,
    upper: &'a [Ty<B>],
}

impl<'a, B, H, C> TypeVisitor<B, PairContext<B>> for WildcardTraverser<'a, B, H, C>
where
    B: TypeBuilder,
    H: PairWalkerHooks<B>,
    C: MappingCollector<B>,
{
    type Output = UnifyResult;

    fn builder(&self) -> B {
        self.walker.builder
    }

    fn visit_default(&mut self, actual: &Ty<B>, context: &mut PairContext<B>) -> UnifyResult {
        let declared = self.declared;
        if let Some(lower) = self.lower {
            return self.walker.outer_visit(
                lower,
                actual,
                context.descend(declared, Variance::In, Variance::Invariant),
            );
        }
        for bound in self.upper {
            self.walker.outer_visit(
                bound,
                actual,
                context.descend(declared, Variance::Out, Variance::Invariant),
            )?;
        }
        Ok(())
    }

    fn visit_wildcard(
        &mut self,
        _actual: &Ty<B>,
        actual_lower: Option<&Ty<B>>,
        actual_upper: &[Ty<B>],
        context: &mut PairContext<B>,
    ) -> UnifyResult {
        let declared = self.declared;
        if let Some(lower) = self.lower {
            if let Some(actual_lower) = actual_lower {
                return self.walker.outer_visit(
                    lower,
                    actual_lower,
                    context.descend(declared, Variance::In, Variance::In),
                );
            }
            for bound in actual_upper {
                self.walker.outer_visit(
                    lower,
                    bound,
                    context.descend(declared, Variance::In, Variance::Out),
                )?;
            }
            return Ok(());
        }

        for bound in self.upper {
            for actual_bound in actual_upper {
                self.walker.outer_visit(
                    bound,
                    actual_bound,
                    context.descend(declared, Variance::Out, Variance::Out),
                )?;
            }
            if let Some(actual_lower) = actual_lower {
                self.walker.outer_visit(
                    bound,
                    actual_lower,
                    context.descend(declared, Variance::Out, Variance::In),
                )?;
            }
        }
        Ok(())
    }
}

/// Visits the actual side when the declared side is an array.
struct ArrayTraverser<'a, B: TypeBuilder, H, C> {
    walker: &'a mut PairWalker<B, H, C>,
    component: &'a Ty<B>,
}

impl<'a, B, H, C> TypeVisitor<B, PairContext<B>> for ArrayTraverser<'a, B, H, C>
where
    B: TypeBuilder,
    H: PairWalkerHooks<B>,
    C: MappingCollector<B>,
{
    type Output = UnifyResult;

    fn builder(&self) -> B {
        self.walker.builder
    }

    fn visit_default(&mut self, _actual: &Ty<B>, _context: &mut PairContext<B>) -> UnifyResult {
        Ok(())
    }

    // Arrays are covariant: the component pairing keeps the outer variances.
    fn visit_array(&mut self, _actual: &Ty<B>, component: &Ty<B>, context: &mut PairContext<B>) -> UnifyResult {
        self.walker.outer_visit(self.component, component, context.nested())
    }
}
