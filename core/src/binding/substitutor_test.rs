use std::rc::Rc;

use bumpalo::Bump;
use pretty_assertions::assert_eq;
use tybind_types::{
    ArenaBuilder, BoxBuilder, ContextId, SymbolTable, Ty, TyDisplay, TypeBuilder, TypeKind,
    TypeSymbol,
};

use super::{MergedBound, Substitutor, TypeParameterMapping};
use crate::{CyclePolicy, Phase, UnifyError, UnifyOptions, test_utils};

struct Names {
    table: SymbolTable<BoxBuilder>,
    t: TypeSymbol,
    u: TypeSymbol,
    list: TypeSymbol,
    str_sym: TypeSymbol,
    num_sym: TypeSymbol,
}

fn names() -> Names {
    let mut table = SymbolTable::new();
    let t = table.parameter("T");
    let u = table.parameter("U");
    let e = table.parameter("E");
    let list = table.declare("List", &[e]);
    let str_sym = table.declare("Str", &[]);
    let num_sym = table.declare("Num", &[]);
    Names {
        table,
        t,
        u,
        list,
        str_sym,
        num_sym,
    }
}

fn mapping(
    bindings: impl IntoIterator<Item = (TypeSymbol, Ty<BoxBuilder>)>,
) -> TypeParameterMapping<BoxBuilder> {
    bindings
        .into_iter()
        .map(|(parameter, ty)| (parameter, MergedBound::new(ty)))
        .collect()
}

#[test]
fn test_empty_mapping_returns_input() {
    let n = names();
    let builder = BoxBuilder::new();
    let ty = builder.parameterized(n.list, [builder.reference(n.t)]);

    let substitutor = Substitutor::new(builder, TypeParameterMapping::new());
    let result = substitutor.substitute(&ty).unwrap();
    assert!(Rc::ptr_eq(result.interned(), ty.interned()));
}

#[test]
fn test_resolved_expressions_are_shared() {
    let n = names();
    let builder = BoxBuilder::new();
    let ty = builder.parameterized(n.list, [builder.reference(n.str_sym)]);

    let substitutor = Substitutor::new(builder, mapping([(n.t, builder.reference(n.num_sym))]));
    let result = substitutor.substitute(&ty).unwrap();
    assert!(Rc::ptr_eq(result.interned(), ty.interned()));
}

#[test]
fn test_foreign_resolved_expressions_are_rebuilt_in_target() {
    let n = names();
    let source = BoxBuilder::in_context(ContextId::new(1));
    let target = BoxBuilder::in_context(ContextId::new(2));
    let ty = source.array(source.reference(n.str_sym));

    let substitutor = Substitutor::new(target, mapping([(n.t, target.reference(n.num_sym))]));
    let result = substitutor.substitute(&ty).unwrap();
    assert!(result.is_resolved_in(target, target.context()));
    assert_eq!(result.display_named(target, &n.table), "Str[]");
}

#[test]
fn test_parameter_leaf_is_replaced() {
    let n = names();
    let builder = BoxBuilder::new();
    let substitutor = Substitutor::new(builder, mapping([(n.t, builder.reference(n.str_sym))]));

    let ty = builder.parameterized(n.list, [builder.array(builder.reference(n.t))]);
    let result = substitutor.substitute(&ty).unwrap();
    assert_eq!(result.display_named(builder, &n.table), "List<Str[]>");
    assert!(result.is_resolved_in(builder, builder.context()));
}

#[test]
fn test_unbound_parameters_are_kept() {
    let n = names();
    let builder = BoxBuilder::new();
    let substitutor = Substitutor::new(builder, mapping([(n.t, builder.reference(n.str_sym))]));

    let ty = builder.function([builder.reference(n.u)], Some(builder.reference(n.t)), []);
    let result = substitutor.substitute(&ty).unwrap();
    assert_eq!(result.display_named(builder, &n.table), "(U) => Str");
}

#[test]
fn test_transitive_bindings_resolve_in_one_call() {
    test_utils::init_test_logging();
    let n = names();
    let builder = BoxBuilder::new();
    let substitutor = Substitutor::new(
        builder,
        mapping([
            (n.t, builder.reference(n.u)),
            (n.u, builder.reference(n.str_sym)),
        ]),
    );

    let result = substitutor.substitute(&builder.reference(n.t)).unwrap();
    assert_eq!(result.display_named(builder, &n.table), "Str");
}

#[test]
fn test_self_bound_parameter_is_left_alone() {
    let n = names();
    let builder = BoxBuilder::new();
    let substitutor = Substitutor::new(builder, mapping([(n.u, builder.reference(n.u))]));

    let result = substitutor.substitute(&builder.reference(n.u)).unwrap();
    assert_eq!(result.parameter(builder), Some(n.u));
    assert_eq!(result.display_named(builder, &n.table), "U");
}

#[test]
fn test_function_shape_is_preserved() {
    let n = names();
    let builder = BoxBuilder::new();
    let t = builder.reference(n.t);
    let substitutor = Substitutor::new(builder, mapping([(n.t, builder.reference(n.str_sym))]));

    let function = builder.function([t.clone()], Some(t.clone()), [t]);
    let result = substitutor.substitute(&function).unwrap();
    assert_eq!(result.display_named(builder, &n.table), "<Str>(Str) => Str");

    let procedure = builder.function([builder.reference(n.t)], None, []);
    let result = substitutor.substitute(&procedure).unwrap();
    assert_eq!(result.display_named(builder, &n.table), "(Str) => void");
}

#[test]
fn test_compound_synonym_flag_is_preserved() {
    let n = names();
    let builder = BoxBuilder::new();
    let substitutor = Substitutor::new(builder, mapping([(n.t, builder.reference(n.str_sym))]));

    let synonym = builder.compound([builder.reference(n.t), builder.reference(n.u)], true);
    let result = substitutor.substitute(&synonym).unwrap();
    assert_eq!(result.display_named(builder, &n.table), "Str | U");

    let intersection = builder.compound([builder.reference(n.t), builder.reference(n.u)], false);
    let result = substitutor.substitute(&intersection).unwrap();
    assert_eq!(result.display_named(builder, &n.table), "Str & U");
}

#[test]
fn test_wildcard_bounds_are_substituted() {
    let n = names();
    let builder = BoxBuilder::new();
    let substitutor = Substitutor::new(builder, mapping([(n.t, builder.reference(n.str_sym))]));

    let upper = builder.wildcard_extends([builder.reference(n.t), builder.reference(n.u)]);
    let lower = builder.wildcard_super(builder.array(builder.reference(n.t)));
    assert_eq!(
        substitutor.substitute(&upper).unwrap().display_named(builder, &n.table),
        "? extends Str & U"
    );
    assert_eq!(
        substitutor.substitute(&lower).unwrap().display_named(builder, &n.table),
        "? super Str[]"
    );
}

#[test]
fn test_any_is_returned_unchanged() {
    let n = names();
    let builder = BoxBuilder::new();
    let substitutor = Substitutor::new(builder, mapping([(n.t, builder.reference(n.str_sym))]));
    let result = substitutor.substitute(&builder.any()).unwrap();
    assert!(matches!(result.kind(builder), TypeKind::Any));
}

#[test]
fn test_multi_hop_cycle_fails_by_default() {
    let n = names();
    let builder = BoxBuilder::new();
    let substitutor = Substitutor::new(
        builder,
        mapping([
            (n.t, builder.reference(n.u)),
            (n.u, builder.reference(n.t)),
        ]),
    );

    assert_eq!(
        substitutor.substitute(&builder.reference(n.t)),
        Err(UnifyError::CyclicBinding {
            parameter: n.t,
            chain: vec![n.t, n.u],
        })
    );
}

#[test]
fn test_f_bounded_cycle_fails_by_default() {
    let mut n = names();
    let builder = BoxBuilder::new();
    let comparable = n.table.declare("Comparable", &[n.u]);
    let substitutor = Substitutor::new(
        builder,
        mapping([(n.t, builder.parameterized(comparable, [builder.reference(n.t)]))]),
    );

    let err = substitutor.substitute(&builder.reference(n.t)).unwrap_err();
    assert!(matches!(err, UnifyError::CyclicBinding { parameter, .. } if parameter == n.t));
}

#[test]
fn test_multi_hop_cycle_preserved_on_request() {
    let n = names();
    let builder = BoxBuilder::new();
    let options = UnifyOptions {
        cycle_policy: CyclePolicy::Preserve,
        ..UnifyOptions::default()
    };
    let substitutor = Substitutor::with_options(
        builder,
        mapping([
            (n.t, builder.parameterized(n.list, [builder.reference(n.u)])),
            (n.u, builder.reference(n.t)),
        ]),
        options,
    );

    let result = substitutor.substitute(&builder.reference(n.t)).unwrap();
    assert_eq!(result.display_named(builder, &n.table), "List<T>");
}

#[test]
fn test_depth_limit_fails_closed() {
    let n = names();
    let builder = BoxBuilder::new();
    let options = UnifyOptions {
        max_depth: 4,
        ..UnifyOptions::default()
    };
    let substitutor = Substitutor::with_options(
        builder,
        mapping([(n.t, builder.reference(n.str_sym))]),
        options,
    );

    let mut deep = builder.reference(n.t);
    for _ in 0..6 {
        deep = builder.parameterized(n.list, [deep]);
    }
    assert_eq!(
        substitutor.substitute(&deep),
        Err(UnifyError::RecursionLimit {
            limit: 4,
            phase: Phase::Substituting
        })
    );

    let shallow = builder.parameterized(n.list, [builder.reference(n.t)]);
    assert!(substitutor.substitute(&shallow).is_ok());
}

#[test]
fn test_enhance_mapping_adds_and_replaces() {
    let n = names();
    let builder = BoxBuilder::new();
    let mut substitutor = Substitutor::new(builder, mapping([(n.t, builder.reference(n.str_sym))]));
    substitutor.enhance_mapping(mapping([
        (n.t, builder.reference(n.num_sym)),
        (n.u, builder.reference(n.str_sym)),
    ]));

    let ty = builder.compound([builder.reference(n.t), builder.reference(n.u)], false);
    let result = substitutor.substitute(&ty).unwrap();
    assert_eq!(result.display_named(builder, &n.table), "Num & Str");
    assert_eq!(substitutor.mapping().len(), 2);
}

#[test]
fn test_substitutor_reports_its_context() {
    let builder = BoxBuilder::in_context(ContextId::new(7));
    let substitutor = Substitutor::new(builder, TypeParameterMapping::new());
    assert_eq!(substitutor.context(), ContextId::new(7));
}

#[test]
fn test_arena_substitution() {
    let arena = Bump::new();
    let builder = ArenaBuilder::new(&arena);
    let t = TypeSymbol::parameter(0);
    let list = TypeSymbol::declarator(1, 1);
    let str_ty = builder.reference(TypeSymbol::declarator(2, 0));

    let mut bindings = TypeParameterMapping::new();
    bindings.insert(t, MergedBound::new(str_ty));
    let substitutor = Substitutor::new(builder, bindings);

    let result = substitutor
        .substitute(&builder.parameterized(list, [builder.reference(t)]))
        .unwrap();
    assert_eq!(result.as_parameterized(builder), Some((list, &[str_ty][..])));
    assert!(core::ptr::eq(*result.as_parameterized(builder).unwrap().1[0].interned(), *str_ty.interned()));
}

#[test]
fn test_single_pass_replaces_simultaneously() {
    let n = names();
    let builder = BoxBuilder::new();
    let swap = mapping([(n.t, builder.reference(n.u)), (n.u, builder.reference(n.t))]);
    let pair = builder.compound([builder.reference(n.t), builder.reference(n.u)], false);

    let single = Substitutor::single_pass(builder, swap.clone(), UnifyOptions::default());
    let result = single.substitute(&pair).unwrap();
    assert_eq!(result.display_named(builder, &n.table), "U & T");

    // The transitive substitutor sees the swap as a cycle.
    let err = Substitutor::new(builder, swap).substitute(&pair).unwrap_err();
    assert!(matches!(err, UnifyError::CyclicBinding { .. }));
}
