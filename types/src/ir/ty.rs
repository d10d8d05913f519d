use super::{TypeBuilder, TypeSymbol, TypeVisitor};
use core::fmt;

// Import bitflags
use bitflags::bitflags;

bitflags! {
    /// Flags indicating various properties of a type expression.
    ///
    /// These flags are computed once when a type is interned and cached
    /// for efficient queries. This avoids repeated recursive traversals.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        /// Some node below (or at) this one is headed by a type parameter.
        const HAS_TYPE_PARAM = 1;
    }
}

/// Identity of a resolution context.
///
/// A resolution context is one arena of type-variable bindings, e.g. one
/// inference episode. Every `TypeBuilder` instance belongs to exactly one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(usize);

impl ContextId {
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Context identified by the address of a value (e.g. an arena).
    pub fn of<T: ?Sized>(owner: &T) -> Self {
        Self(owner as *const T as *const () as usize)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Ownership/resolution tag carried by every interned type expression.
///
/// `ResolvedIn(ctx)` means no substitution under `ctx` can change the
/// expression, so it may be shared as-is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ownership {
    Unresolved,
    ResolvedIn(ContextId),
}

/// Data for a type: kind + cached flags + ownership.
///
/// Following Chalk's design, this separates the type structure (kind)
/// from cached metadata. The builder computes flags and ownership once
/// during interning.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TyData<B: TypeBuilder> {
    /// The actual type structure
    pub kind: TypeKind<B>,

    /// Cached properties for efficient queries
    pub flags: TypeFlags,

    /// Resolution context this expression is final in, if any
    pub ownership: Ownership,
}

impl<B: TypeBuilder> TyData<B> {
    /// Wrap a kind, computing its flags and ownership for `builder`.
    pub fn new(kind: TypeKind<B>, builder: B) -> Self {
        let flags = kind.compute_flags(builder);
        let ownership = if flags.contains(TypeFlags::HAS_TYPE_PARAM) {
            Ownership::Unresolved
        } else {
            Ownership::ResolvedIn(builder.context())
        };
        Self {
            kind,
            flags,
            ownership,
        }
    }
}

/// Logical structure of a type expression.
///
/// This is generic over the builder so the same type kind works
/// with different storage strategies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind<B: TypeBuilder> {
    /// The universal top type. Terminal.
    Any,

    /// Array with a (covariant) component type.
    Array(Ty<B>),

    /// A named type applied to type arguments.
    ///
    /// `args` is empty for simple named types and for references to a
    /// type parameter (when `head` is a parameter symbol).
    Parameterized {
        head: TypeSymbol,
        args: B::InternedTypes,
    },

    /// Wildcard with at most one lower bound and an implicit intersection of
    /// upper bounds. Well-formed input never has both, but nothing here
    /// relies on that.
    Wildcard {
        lower: Option<Ty<B>>,
        upper: B::InternedTypes,
    },

    /// Function type.
    Function {
        params: B::InternedTypes,
        ret: Option<Ty<B>>,
        type_args: B::InternedTypes,
    },

    /// Intersection (`synonym == false`) or union-like alias set
    /// (`synonym == true`) of component types.
    Compound {
        components: B::InternedTypes,
        synonym: bool,
    },
}

impl<B: TypeBuilder> TypeKind<B> {
    /// Compute type flags for this type kind.
    ///
    /// This is called by the builder during type creation to build
    /// the TyData. Flags are cached to avoid repeated traversals.
    pub fn compute_flags(&self, builder: B) -> TypeFlags {
        let union = |types: &[Ty<B>]| {
            types
                .iter()
                .fold(TypeFlags::empty(), |acc, ty| acc | ty.flags(builder))
        };

        match self {
            TypeKind::Any => TypeFlags::empty(),

            TypeKind::Array(component) => component.flags(builder),

            TypeKind::Parameterized { head, args } => {
                let flags = union(builder.types_data(args));
                if head.is_parameter() {
                    flags | TypeFlags::HAS_TYPE_PARAM
                } else {
                    flags
                }
            }

            TypeKind::Wildcard { lower, upper } => {
                let mut flags = union(builder.types_data(upper));
                if let Some(lower) = lower {
                    flags |= lower.flags(builder);
                }
                flags
            }

            TypeKind::Function {
                params,
                ret,
                type_args,
            } => {
                let mut flags =
                    union(builder.types_data(params)) | union(builder.types_data(type_args));
                if let Some(ret) = ret {
                    flags |= ret.flags(builder);
                }
                flags
            }

            TypeKind::Compound { components, .. } => union(builder.types_data(components)),
        }
    }

    /// Intern this type kind into a Ty handle.
    pub fn intern(self, builder: B) -> Ty<B> {
        Ty::new(builder.intern_ty(self))
    }
}

/// Handle to an interned type expression.
///
/// This is a lightweight wrapper around the builder's representation.
/// It can be cloned and used to retrieve the full type data.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ty<B: TypeBuilder> {
    interned: B::InternedTy,
}

// Implement Copy when InternedTy is Copy (e.g., for ArenaBuilder)
impl<B: TypeBuilder> Copy for Ty<B> where B::InternedTy: Copy {}

impl<B: TypeBuilder> Ty<B> {
    /// Create a new type from an interned handle.
    pub fn new(interned: B::InternedTy) -> Self {
        Self { interned }
    }

    /// Get the interned representation (for internal use).
    pub fn interned(&self) -> &B::InternedTy {
        &self.interned
    }

    /// Get the full type data by looking up in the builder.
    pub fn data(&self, builder: B) -> &TyData<B> {
        builder.ty_data(&self.interned)
    }

    /// Get the type kind by looking up in the builder.
    pub fn kind(&self, builder: B) -> &TypeKind<B> {
        &self.data(builder).kind
    }

    pub fn flags(&self, builder: B) -> TypeFlags {
        self.data(builder).flags
    }

    pub fn ownership(&self, builder: B) -> Ownership {
        self.data(builder).ownership
    }

    /// True when no substitution under `context` can change this expression.
    pub fn is_resolved_in(&self, builder: B, context: ContextId) -> bool {
        self.ownership(builder) == Ownership::ResolvedIn(context)
    }

    /// Double dispatch entry point: hand this expression to `visitor`.
    pub fn accept<P, V>(&self, visitor: &mut V, param: &mut P) -> V::Output
    where
        V: TypeVisitor<B, P> + ?Sized,
    {
        visitor.visit_ty(self, param)
    }

    /// Head symbol, if this is a parameterized type.
    pub fn head(&self, builder: B) -> Option<TypeSymbol> {
        match self.kind(builder) {
            TypeKind::Parameterized { head, .. } => Some(*head),
            _ => None,
        }
    }

    /// The type parameter this expression refers to, if its head is one.
    pub fn parameter(&self, builder: B) -> Option<TypeSymbol> {
        self.head(builder).filter(|head| head.is_parameter())
    }

    /// Head and type arguments, if this is a parameterized type.
    pub fn as_parameterized(&self, builder: B) -> Option<(TypeSymbol, &[Ty<B>])> {
        match self.kind(builder) {
            TypeKind::Parameterized { head, args } => Some((*head, builder.types_data(args))),
            _ => None,
        }
    }
}

impl<B: TypeBuilder> fmt::Debug for Ty<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ty({:?})", self.interned)
    }
}
