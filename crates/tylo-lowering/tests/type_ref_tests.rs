use super::*;
use crate::test_support::TestEnv;
use tylo_front::ClassKind;

#[test]
fn test_unresolved_reference_is_error() {
    let env = TestEnv::new();
    let lowered = env.with_converter(|converter| {
        converter.lower_type_ref(&TypeRef::Unresolved, ConversionTypeContext::DEFAULT)
    });
    assert_eq!(lowered, IrType::Error);
}

#[test]
fn test_implicit_builtins_map_directly() {
    let env = TestEnv::new();
    let cases = [
        (ImplicitBuiltinType::Nothing, &env.builtins.nothing_type),
        (ImplicitBuiltinType::Unit, &env.builtins.unit_type),
        (ImplicitBuiltinType::Boolean, &env.builtins.boolean_type),
        (ImplicitBuiltinType::String, &env.builtins.string_type),
        (ImplicitBuiltinType::Any, &env.builtins.any_type),
        (ImplicitBuiltinType::Int, &env.builtins.int_type),
        (ImplicitBuiltinType::NullableAny, &env.builtins.any_n_type),
        (ImplicitBuiltinType::NullableNothing, &env.builtins.nothing_n_type),
    ];

    env.with_converter(|converter| {
        for (builtin, expected) in cases {
            let lowered = converter.lower_type_ref(
                &TypeRef::ImplicitBuiltin(builtin),
                ConversionTypeContext::DEFAULT.definitely_not_null(),
            );
            assert_eq!(&lowered, expected);
        }
    });
}

#[test]
fn test_resolved_reference_carries_annotations() {
    let env = TestEnv::new();
    let marker = env.db.class_id("test/Marker");
    env.symbols.register_class(marker, ClassKind::AnnotationClass);

    let type_ref = TypeRef::Resolved {
        ty: env.string(),
        annotations: vec![FirAnnotation::new(marker)],
    };
    let lowered = env.with_converter(|converter| {
        converter.lower_type_ref(&type_ref, ConversionTypeContext::DEFAULT)
    });
    assert_eq!(env.render(&lowered), "@test/Marker lang/String");
}

#[test]
fn test_resolved_reference_uses_context() {
    let env = TestEnv::new();
    let nullable_string = env.db.with_nullability(env.string(), true);
    let type_ref = TypeRef::resolved(nullable_string);

    let (plain, forced) = env.with_converter(|converter| {
        (
            converter.lower_type_ref(&type_ref, ConversionTypeContext::DEFAULT),
            converter.lower_type_ref(
                &type_ref,
                ConversionTypeContext::DEFAULT.definitely_not_null(),
            ),
        )
    });
    assert!(plain.is_nullable());
    assert!(!forced.is_nullable());
}

#[test]
fn test_implicit_builtin_names_deserialize() {
    let parsed: Vec<ImplicitBuiltinType> =
        serde_json::from_str(r#"["nothing", "nullableAny", "int"]"#).expect("valid names");
    assert_eq!(
        parsed,
        vec![
            ImplicitBuiltinType::Nothing,
            ImplicitBuiltinType::NullableAny,
            ImplicitBuiltinType::Int,
        ]
    );
}
