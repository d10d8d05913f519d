use crate::ir::{ContextId, Ty, TyData, TypeBuilder, TypeKind};
use alloc::vec::Vec;
use bumpalo::Bump;

/// Builder that uses arena allocation.
///
/// Types are allocated in a `Bump` arena. We don't do actual interning
/// (deduplication), just allocation.
///
/// The arena is the resolution context: two builders over the same arena
/// share a `ContextId`, builders over different arenas never do.
///
/// # Example
///
/// ```
/// use tybind_types::{ArenaBuilder, TypeBuilder};
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let builder = ArenaBuilder::new(&arena);
///
/// let any = builder.any();
/// let arr_ty = builder.array(any);
/// assert!(arr_ty.is_resolved_in(builder, builder.context()));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ArenaBuilder<'arena> {
    arena: &'arena Bump,
}

// Manual implementations since Bump doesn't implement PartialEq/Eq/Hash
// We use pointer equality - two builders are equal if they point to the same arena
impl<'arena> PartialEq for ArenaBuilder<'arena> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.arena, other.arena)
    }
}

impl<'arena> Eq for ArenaBuilder<'arena> {}

impl<'arena> core::hash::Hash for ArenaBuilder<'arena> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::ptr::hash(self.arena, state)
    }
}

impl<'arena> ArenaBuilder<'arena> {
    /// Create a new arena builder.
    pub fn new(arena: &'arena Bump) -> Self {
        Self { arena }
    }
}

impl<'arena> TypeBuilder for ArenaBuilder<'arena> {
    type InternedTy = &'arena TyData<Self>;
    type InternedTypes = &'arena [Ty<Self>];

    fn context(self) -> ContextId {
        ContextId::of(self.arena)
    }

    fn intern_ty(self, kind: TypeKind<Self>) -> Self::InternedTy {
        // For now, just allocate - no deduplication
        self.arena.alloc(TyData::new(kind, self))
    }

    fn ty_data(self, ty: &Self::InternedTy) -> &TyData<Self> {
        ty
    }

    fn intern_types(self, data: impl IntoIterator<Item = Ty<Self>>) -> Self::InternedTypes {
        let types: Vec<_> = data.into_iter().collect();
        self.arena.alloc_slice_copy(&types)
    }

    fn types_data(self, types: &Self::InternedTypes) -> &[Ty<Self>] {
        types
    }
}
