use crate::ir::{ContextId, Ty, TyData, TypeBuilder, TypeKind};
use alloc::rc::Rc;
use alloc::vec::Vec;

/// Builder that uses reference counting (no deduplication).
///
/// Types are allocated with `Rc` and no interning is performed.
/// This is useful for:
/// - Testing (simpler than arena)
/// - Resolution contexts that don't need a shared arena
///
/// The resolution context is explicit: two `BoxBuilder`s with the same
/// `ContextId` are the same context.
///
/// # Example
///
/// ```
/// use tybind_types::{BoxBuilder, ContextId, TypeBuilder};
///
/// let builder = BoxBuilder::in_context(ContextId::new(7));
/// let any = builder.any();
/// assert!(any.is_resolved_in(builder, ContextId::new(7)));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoxBuilder {
    context: ContextId,
}

impl Default for BoxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxBuilder {
    /// Create a new box builder in the default context (`ContextId::new(0)`).
    pub fn new() -> Self {
        Self::in_context(ContextId::new(0))
    }

    /// Create a box builder for a specific resolution context.
    pub fn in_context(context: ContextId) -> Self {
        Self { context }
    }
}

impl TypeBuilder for BoxBuilder {
    type InternedTy = Rc<TyData<Self>>;
    type InternedTypes = Rc<[Ty<Self>]>;

    fn context(self) -> ContextId {
        self.context
    }

    fn intern_ty(self, kind: TypeKind<Self>) -> Self::InternedTy {
        Rc::new(TyData::new(kind, self))
    }

    fn ty_data(self, ty: &Self::InternedTy) -> &TyData<Self> {
        ty
    }

    fn intern_types(self, data: impl IntoIterator<Item = Ty<Self>>) -> Self::InternedTypes {
        let types: Vec<_> = data.into_iter().collect();
        types.into()
    }

    fn types_data(self, types: &Self::InternedTypes) -> &[Ty<Self>] {
        types
    }
}
