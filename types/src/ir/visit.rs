use super::{Ty, TypeBuilder, TypeKind, TypeSymbol};

/// Double-dispatch visitor over type expressions.
///
/// `Ty::accept` hands an expression to `visit_ty`, which by default routes it
/// to the handler for its variant. Every handler falls back to
/// `visit_default`, so a visitor only overrides the variants it cares about.
///
/// `P` is an auxiliary value threaded through the visit, commonly "the other
/// side" of a pairing or a per-call token.
///
/// # Example
///
/// ```
/// use tybind_types::{BoxBuilder, Ty, TypeBuilder, TypeSymbol, TypeVisitor};
///
/// /// Counts array nodes.
/// struct ArrayCounter {
///     builder: BoxBuilder,
/// }
///
/// impl TypeVisitor<BoxBuilder, usize> for ArrayCounter {
///     type Output = ();
///
///     fn builder(&self) -> BoxBuilder {
///         self.builder
///     }
///
///     fn visit_default(&mut self, _ty: &Ty<BoxBuilder>, _count: &mut usize) {}
///
///     fn visit_array(&mut self, _ty: &Ty<BoxBuilder>, component: &Ty<BoxBuilder>, count: &mut usize) {
///         *count += 1;
///         component.accept(self, count);
///     }
/// }
///
/// let builder = BoxBuilder::new();
/// let str_ty = builder.reference(TypeSymbol::declarator(0, 0));
/// let nested = builder.array(builder.array(str_ty));
///
/// let mut count = 0;
/// nested.accept(&mut ArrayCounter { builder }, &mut count);
/// assert_eq!(count, 2);
/// ```
pub trait TypeVisitor<B: TypeBuilder, P = ()> {
    type Output;

    /// Get the builder used to look into expressions.
    fn builder(&self) -> B;

    /// Visit a type.
    ///
    /// Override this to customize behavior for all types.
    /// Call `super_visit_ty` to dispatch on the variant.
    fn visit_ty(&mut self, ty: &Ty<B>, param: &mut P) -> Self::Output {
        self.super_visit_ty(ty, param)
    }

    /// Default dispatch to the per-variant handlers.
    ///
    /// Override `visit_ty` instead of this method.
    fn super_visit_ty(&mut self, ty: &Ty<B>, param: &mut P) -> Self::Output {
        let builder = self.builder();
        match ty.kind(builder) {
            TypeKind::Any => self.visit_any(ty, param),
            TypeKind::Array(component) => self.visit_array(ty, component, param),
            TypeKind::Parameterized { head, args } => {
                self.visit_parameterized(ty, *head, builder.types_data(args), param)
            }
            TypeKind::Wildcard { lower, upper } => {
                self.visit_wildcard(ty, lower.as_ref(), builder.types_data(upper), param)
            }
            TypeKind::Function {
                params,
                ret,
                type_args,
            } => self.visit_function(
                ty,
                builder.types_data(params),
                ret.as_ref(),
                builder.types_data(type_args),
                param,
            ),
            TypeKind::Compound {
                components,
                synonym,
            } => self.visit_compound(ty, builder.types_data(components), *synonym, param),
        }
    }

    /// Fallback for every variant whose handler is not overridden.
    fn visit_default(&mut self, ty: &Ty<B>, param: &mut P) -> Self::Output;

    fn visit_any(&mut self, ty: &Ty<B>, param: &mut P) -> Self::Output {
        self.visit_default(ty, param)
    }

    fn visit_array(&mut self, ty: &Ty<B>, component: &Ty<B>, param: &mut P) -> Self::Output {
        let _ = component;
        self.visit_default(ty, param)
    }

    fn visit_parameterized(
        &mut self,
        ty: &Ty<B>,
        head: TypeSymbol,
        args: &[Ty<B>],
        param: &mut P,
    ) -> Self::Output {
        let _ = (head, args);
        self.visit_default(ty, param)
    }

    fn visit_wildcard(
        &mut self,
        ty: &Ty<B>,
        lower: Option<&Ty<B>>,
        upper: &[Ty<B>],
        param: &mut P,
    ) -> Self::Output {
        let _ = (lower, upper);
        self.visit_default(ty, param)
    }

    fn visit_function(
        &mut self,
        ty: &Ty<B>,
        params: &[Ty<B>],
        ret: Option<&Ty<B>>,
        type_args: &[Ty<B>],
        param: &mut P,
    ) -> Self::Output {
        let _ = (params, ret, type_args);
        self.visit_default(ty, param)
    }

    fn visit_compound(
        &mut self,
        ty: &Ty<B>,
        components: &[Ty<B>],
        synonym: bool,
        param: &mut P,
    ) -> Self::Output {
        let _ = (components, synonym);
        self.visit_default(ty, param)
    }
}
