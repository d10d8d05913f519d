//! TypeBuilder trait - unified type construction and storage abstraction.
//!
//! This trait combines:
//! - High-level type constructors (array(), parameterized(), wildcard(), etc.)
//! - Low-level storage management (interning)
//! - The resolution context the built expressions belong to

use crate::{ContextId, Ty, TyData, TypeKind, TypeSymbol};
use core::fmt::Debug;
use core::hash::Hash;

/// Abstraction over type construction and storage.
///
/// This trait allows different implementations to choose how types
/// are built and stored in memory (arena, box, etc.) while keeping the
/// binding and substitution logic generic.
///
/// # Design
///
/// The builder pattern separates:
/// - **What a type is** (`TypeKind<B>`) - the logical structure
/// - **How types are stored** (`B::InternedTy`) - the representation
/// - **Whose types they are** (`B::context()`) - the resolution context
///
/// A builder instance *is* a resolution context: every expression it
/// interns without type-parameter references is tagged as resolved in
/// `self.context()`.
///
/// # Requirements
///
/// Builders must be `Copy` so they can be passed around cheaply.
///
/// # Example
///
/// ```
/// use tybind_types::{BoxBuilder, TypeBuilder, TypeKind, TypeSymbol};
///
/// let builder = BoxBuilder::new();
/// let str_ty = builder.reference(TypeSymbol::declarator(0, 0));
/// let arr_ty = builder.array(str_ty);
/// assert!(matches!(arr_ty.kind(builder), TypeKind::Array(_)));
/// ```
pub trait TypeBuilder: Copy + Clone + Debug + Eq + Hash {
    /// The internal interned representation of a type.
    ///
    /// This is opaque to generic code - could be:
    /// - `&'arena TyData<B>` (arena)
    /// - `Rc<TyData<B>>` (box/rc)
    type InternedTy: Clone + Debug + Eq + Hash;

    /// Interned list of types (type arguments, bounds, parameters, components).
    type InternedTypes: Clone + Debug + Eq + Hash;

    /// The resolution context expressions built here belong to.
    fn context(self) -> ContextId;

    // ========================================================================
    // High-level type constructors (ergonomic API)
    // ========================================================================

    /// Construct the top type.
    fn any(self) -> Ty<Self> {
        TypeKind::Any.intern(self)
    }

    /// Construct a reference to `head` without type arguments: a simple
    /// named type, a raw generic type, or a type-parameter reference.
    fn reference(self, head: TypeSymbol) -> Ty<Self> {
        self.parameterized(head, [])
    }

    /// Construct `head<args...>`.
    fn parameterized(self, head: TypeSymbol, args: impl IntoIterator<Item = Ty<Self>>) -> Ty<Self> {
        TypeKind::Parameterized {
            head,
            args: self.intern_types(args),
        }
        .intern(self)
    }

    /// Construct an array with the given component type.
    fn array(self, component: Ty<Self>) -> Ty<Self> {
        TypeKind::Array(component).intern(self)
    }

    /// Construct a wildcard from its raw parts.
    fn wildcard(
        self,
        lower: Option<Ty<Self>>,
        upper: impl IntoIterator<Item = Ty<Self>>,
    ) -> Ty<Self> {
        TypeKind::Wildcard {
            lower,
            upper: self.intern_types(upper),
        }
        .intern(self)
    }

    /// Construct `? extends A & B ...`.
    fn wildcard_extends(self, upper: impl IntoIterator<Item = Ty<Self>>) -> Ty<Self> {
        self.wildcard(None, upper)
    }

    /// Construct `? super L`.
    fn wildcard_super(self, lower: Ty<Self>) -> Ty<Self> {
        self.wildcard(Some(lower), [])
    }

    /// Construct a function type.
    fn function(
        self,
        params: impl IntoIterator<Item = Ty<Self>>,
        ret: Option<Ty<Self>>,
        type_args: impl IntoIterator<Item = Ty<Self>>,
    ) -> Ty<Self> {
        TypeKind::Function {
            params: self.intern_types(params),
            ret,
            type_args: self.intern_types(type_args),
        }
        .intern(self)
    }

    /// Construct an intersection (`synonym == false`) or synonym set.
    fn compound(self, components: impl IntoIterator<Item = Ty<Self>>, synonym: bool) -> Ty<Self> {
        TypeKind::Compound {
            components: self.intern_types(components),
            synonym,
        }
        .intern(self)
    }

    // ========================================================================
    // Low-level internals (implementation details)
    // ========================================================================

    /// Intern a type kind, returning a handle.
    ///
    /// The implementation is responsible for wrapping the kind with
    /// `TyData::new(kind, self)` (which computes flags and ownership) and
    /// storing it.
    fn intern_ty(self, kind: TypeKind<Self>) -> Self::InternedTy;

    /// Retrieve the type data for an interned type.
    fn ty_data(self, ty: &Self::InternedTy) -> &TyData<Self>;

    /// Intern a list of types.
    fn intern_types(self, data: impl IntoIterator<Item = Ty<Self>>) -> Self::InternedTypes;

    /// Retrieve the interned type list.
    fn types_data(self, types: &Self::InternedTypes) -> &[Ty<Self>];
}
