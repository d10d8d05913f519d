//! Cross-builder structural comparison of type expressions.
//!
//! Comparison works by recursively traversing both structures, independently
//! of the builder (and therefore the resolution context) that produced them.

use super::{Ty, TypeBuilder, TypeKind};

/// Structurally compare two types from potentially different builders.
///
/// Returns `true` if the types have the same structure, regardless of
/// which builders were used to create them. Ownership tags are ignored;
/// symbols are compared by identity.
///
/// # Example
///
/// ```
/// use tybind_types::{ArenaBuilder, BoxBuilder, TypeBuilder, TypeSymbol, types_equal};
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let arena_builder = ArenaBuilder::new(&arena);
/// let box_builder = BoxBuilder::new();
/// let str_sym = TypeSymbol::declarator(0, 0);
///
/// let arr1 = arena_builder.array(arena_builder.reference(str_sym));
/// let arr2 = box_builder.array(box_builder.reference(str_sym));
///
/// assert!(types_equal(&arr1, arena_builder, &arr2, box_builder));
/// ```
pub fn types_equal<B1: TypeBuilder, B2: TypeBuilder>(
    ty1: &Ty<B1>,
    builder1: B1,
    ty2: &Ty<B2>,
    builder2: B2,
) -> bool {
    let all_equal = |types1: &[Ty<B1>], types2: &[Ty<B2>]| {
        types1.len() == types2.len()
            && types1
                .iter()
                .zip(types2.iter())
                .all(|(t1, t2)| types_equal(t1, builder1, t2, builder2))
    };
    let option_equal = |t1: &Option<Ty<B1>>, t2: &Option<Ty<B2>>| match (t1, t2) {
        (Some(t1), Some(t2)) => types_equal(t1, builder1, t2, builder2),
        (None, None) => true,
        _ => false,
    };

    match (ty1.kind(builder1), ty2.kind(builder2)) {
        (TypeKind::Any, TypeKind::Any) => true,

        // Arrays - compare component types recursively
        (TypeKind::Array(c1), TypeKind::Array(c2)) => types_equal(c1, builder1, c2, builder2),

        // Parameterized - same head symbol, pairwise equal arguments
        (
            TypeKind::Parameterized {
                head: h1,
                args: a1,
            },
            TypeKind::Parameterized {
                head: h2,
                args: a2,
            },
        ) => h1 == h2 && all_equal(builder1.types_data(a1), builder2.types_data(a2)),

        (
            TypeKind::Wildcard {
                lower: l1,
                upper: u1,
            },
            TypeKind::Wildcard {
                lower: l2,
                upper: u2,
            },
        ) => option_equal(l1, l2) && all_equal(builder1.types_data(u1), builder2.types_data(u2)),

        (
            TypeKind::Function {
                params: p1,
                ret: r1,
                type_args: t1,
            },
            TypeKind::Function {
                params: p2,
                ret: r2,
                type_args: t2,
            },
        ) => {
            all_equal(builder1.types_data(p1), builder2.types_data(p2))
                && option_equal(r1, r2)
                && all_equal(builder1.types_data(t1), builder2.types_data(t2))
        }

        (
            TypeKind::Compound {
                components: c1,
                synonym: s1,
            },
            TypeKind::Compound {
                components: c2,
                synonym: s2,
            },
        ) => s1 == s2 && all_equal(builder1.types_data(c1), builder2.types_data(c2)),

        // Different kinds are not equal
        _ => false,
    }
}
