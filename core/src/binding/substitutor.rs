//! Rewriting of type expressions through a fixed type-parameter mapping.

use tracing::{debug, trace};
use tybind_types::{ContextId, Ty, TypeBuilder, TypeSymbol, TypeVisitor, types_equal};

use super::mapping::{MergedBound, TypeParameterMapping};
use crate::{
    Vec,
    errors::{Phase, UnifyError, UnifyResult},
    options::{CyclePolicy, UnifyOptions},
};

/// Replaces bound type parameters with their bound types.
///
/// The builder is the target resolution context: every rebuilt node is
/// interned there, and any sub-expression already resolved in it is shared
/// as-is. Bound types are themselves substituted, so a chain such as
/// `{T -> U, U -> Str}` resolves `T` to `Str` in one call. A `single_pass`
/// substitutor instead replaces every bound leaf simultaneously and leaves
/// the bound types as they are.
///
/// # Example
///
/// ```
/// use tybind_core::{MergedBound, Substitutor, TypeParameterMapping};
/// use tybind_types::{BoxBuilder, TypeBuilder, TypeSymbol, types_equal};
///
/// let builder = BoxBuilder::new();
/// let t = TypeSymbol::parameter(0);
/// let str_ty = builder.reference(TypeSymbol::declarator(1, 0));
///
/// let mut mapping = TypeParameterMapping::new();
/// mapping.insert(t, MergedBound::new(str_ty.clone()));
/// let substitutor = Substitutor::new(builder, mapping);
///
/// let result = substitutor.substitute(&builder.array(builder.reference(t))).unwrap();
/// assert!(types_equal(&result, builder, &builder.array(str_ty), builder));
/// ```
#[derive(Debug, Clone)]
pub struct Substitutor<B: TypeBuilder> {
    builder: B,
    mapping: TypeParameterMapping<B>,
    options: UnifyOptions,
    transitive: bool,
}

impl<B: TypeBuilder> Substitutor<B> {
    pub fn new(builder: B, mapping: TypeParameterMapping<B>) -> Self {
        Self::with_options(builder, mapping, UnifyOptions::default())
    }

    pub fn with_options(builder: B, mapping: TypeParameterMapping<B>, options: UnifyOptions) -> Self {
        Self {
            builder,
            mapping,
            options,
            transitive: true,
        }
    }

    /// Substitutor whose bound types are inserted verbatim, so `{K -> V, V -> K}`
    /// swaps `Map<K, V>` into `Map<V, K>`.
    pub fn single_pass(builder: B, mapping: TypeParameterMapping<B>, options: UnifyOptions) -> Self {
        Self {
            transitive: false,
            ..Self::with_options(builder, mapping, options)
        }
    }

    pub fn mapping(&self) -> &TypeParameterMapping<B> {
        &self.mapping
    }

    /// The resolution context results are built in.
    pub fn context(&self) -> ContextId {
        self.builder.context()
    }

    /// Merge more bindings into the mapping, replacing existing entries for
    /// the same parameters.
    pub fn enhance_mapping(&mut self, bindings: impl IntoIterator<Item = (TypeSymbol, MergedBound<B>)>) {
        self.mapping.extend(bindings);
    }

    /// Rewrite `ty`, replacing every bound parameter leaf.
    ///
    /// With an empty mapping the input is returned as-is.
    pub fn substitute(&self, ty: &Ty<B>) -> UnifyResult<Ty<B>> {
        if self.mapping.is_empty() {
            return Ok(ty.clone());
        }
        ty.accept(&mut SubstitutionPass { substitutor: self }, &mut Visiting::default())
    }
}

/// Per-call state of one `substitute` run.
#[derive(Debug, Default)]
struct Visiting {
    /// Parameters whose bound types are being expanded, outermost first.
    expanding: Vec<TypeSymbol>,
    depth: usize,
}

struct SubstitutionPass<'s, B: TypeBuilder> {
    substitutor: &'s Substitutor<B>,
}

impl<'s, B: TypeBuilder> SubstitutionPass<'s, B> {
    fn all(&mut self, types: &[Ty<B>], visiting: &mut Visiting) -> UnifyResult<Vec<Ty<B>>> {
        types.iter().map(|ty| ty.accept(self, visiting)).collect()
    }

    /// The substituted bound type of `parameter`, or `None` when the leaf
    /// should be kept.
    fn bound_type_argument(
        &mut self,
        leaf: &Ty<B>,
        parameter: TypeSymbol,
        visiting: &mut Visiting,
    ) -> UnifyResult<Option<Ty<B>>> {
        let substitutor = self.substitutor;
        let builder = substitutor.builder;
        let Some(bound) = substitutor.mapping.get(&parameter) else {
            return Ok(None);
        };
        if types_equal(&bound.ty, builder, leaf, builder) {
            return Ok(None);
        }
        if !substitutor.transitive {
            return Ok(Some(bound.ty.clone()));
        }

        if visiting.expanding.contains(&parameter) {
            return match substitutor.options.cycle_policy {
                CyclePolicy::Fail => {
                    debug!(%parameter, chain = visiting.expanding.len(), "cyclic binding");
                    Err(UnifyError::CyclicBinding {
                        parameter,
                        chain: visiting.expanding.clone(),
                    })
                }
                CyclePolicy::Preserve => {
                    debug!(%parameter, "cyclic binding preserved");
                    Ok(None)
                }
            };
        }

        trace!(%parameter, "expanding bound type argument");
        visiting.expanding.push(parameter);
        let result = bound.ty.accept(self, visiting);
        visiting.expanding.pop();
        result.map(Some)
    }
}

impl<'s, B: TypeBuilder> TypeVisitor<B, Visiting> for SubstitutionPass<'s, B> {
    type Output = UnifyResult<Ty<B>>;

    fn builder(&self) -> B {
        self.substitutor.builder
    }

    fn visit_ty(&mut self, ty: &Ty<B>, visiting: &mut Visiting) -> UnifyResult<Ty<B>> {
        let builder = self.builder();
        if ty.is_resolved_in(builder, builder.context()) {
            return Ok(ty.clone());
        }

        let limit = self.substitutor.options.max_depth;
        if visiting.depth >= limit {
            debug!(limit, "substitution depth limit reached");
            return Err(UnifyError::RecursionLimit {
                limit,
                phase: Phase::Substituting,
            });
        }
        visiting.depth += 1;
        let result = self.super_visit_ty(ty, visiting);
        visiting.depth -= 1;
        result
    }

    // `Any` carries nothing to substitute.
    fn visit_default(&mut self, ty: &Ty<B>, _visiting: &mut Visiting) -> UnifyResult<Ty<B>> {
        Ok(ty.clone())
    }

    fn visit_array(
        &mut self,
        _ty: &Ty<B>,
        component: &Ty<B>,
        visiting: &mut Visiting,
    ) -> UnifyResult<Ty<B>> {
        let component = component.accept(self, visiting)?;
        Ok(self.builder().array(component))
    }

    fn visit_parameterized(
        &mut self,
        ty: &Ty<B>,
        head: TypeSymbol,
        args: &[Ty<B>],
        visiting: &mut Visiting,
    ) -> UnifyResult<Ty<B>> {
        if head.is_parameter() {
            if let Some(bound) = self.bound_type_argument(ty, head, visiting)? {
                return Ok(bound);
            }
        }
        let args = self.all(args, visiting)?;
        Ok(self.builder().parameterized(head, args))
    }

    fn visit_wildcard(
        &mut self,
        _ty: &Ty<B>,
        lower: Option<&Ty<B>>,
        upper: &[Ty<B>],
        visiting: &mut Visiting,
    ) -> UnifyResult<Ty<B>> {
        let lower = match lower {
            Some(lower) => Some(lower.accept(self, visiting)?),
            None => None,
        };
        let upper = self.all(upper, visiting)?;
        Ok(self.builder().wildcard(lower, upper))
    }

    fn visit_function(
        &mut self,
        _ty: &Ty<B>,
        params: &[Ty<B>],
        ret: Option<&Ty<B>>,
        type_args: &[Ty<B>],
        visiting: &mut Visiting,
    ) -> UnifyResult<Ty<B>> {
        let params = self.all(params, visiting)?;
        let type_args = self.all(type_args, visiting)?;
        let ret = match ret {
            Some(ret) => Some(ret.accept(self, visiting)?),
            None => None,
        };
        Ok(self.builder().function(params, ret, type_args))
    }

    fn visit_compound(
        &mut self,
        _ty: &Ty<B>,
        components: &[Ty<B>],
        synonym: bool,
        visiting: &mut Visiting,
    ) -> UnifyResult<Ty<B>> {
        let components = self.all(components, visiting)?;
        Ok(self.builder().compound(components, synonym))
    }
}
