use super::*;

struct Fixture {
    db: ConeInterner,
    comparable: crate::types::ClassId,
    list: crate::types::ClassId,
    number: ConeTypeId,
}

fn fixture() -> Fixture {
    let db = ConeInterner::new();
    let comparable = db.class_id("lang/Comparable");
    let list = db.class_id("lang/collections/List");
    let number = db.class_type(db.class_id("lang/Number"), vec![], false);
    Fixture {
        db,
        comparable,
        list,
        number,
    }
}

/// Captured type of `projection` whose only supertype is `Comparable<captured>`.
fn self_referential_capture(f: &Fixture, projection: ConeProjection) -> ConeTypeId {
    let ctor = f.db.captured_constructor(projection);
    let captured = f.db.captured(ctor, None, false);
    let bound = f
        .db
        .class_type(f.comparable, vec![ConeProjection::Invariant(captured)], false);
    f.db.set_captured_supertypes(ctor, vec![bound]);
    captured
}

#[test]
fn test_config_defaults_and_serde_names() {
    assert_eq!(
        ApproximatorConfig::default(),
        ApproximatorConfig::SubtypeCapturedTypes
    );
    let parsed: ApproximatorConfig = config_from_name("publicDeclaration");
    assert_eq!(parsed, ApproximatorConfig::PublicDeclaration);
}

fn config_from_name(name: &str) -> ApproximatorConfig {
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error, StrDeserializer};
    let deserializer: StrDeserializer<'_, Error> = name.into_deserializer();
    ApproximatorConfig::deserialize(deserializer).expect("known config name")
}

#[test]
fn test_plain_types_have_no_approximation() {
    let f = fixture();
    let approximator = CapturedTypeApproximator::new(&f.db);
    let config = ApproximatorConfig::default();

    assert_eq!(approximator.approximate_to_super_type(f.number, config), None);
    assert_eq!(
        approximator.approximate_to_super_type(ConeTypeId::ERROR, config),
        None
    );
    let list = f
        .db
        .class_type(f.list, vec![ConeProjection::Out(f.number)], false);
    assert_eq!(approximator.approximate_to_super_type(list, config), None);
}

#[test]
fn test_captured_type_approximates_to_its_bound() {
    let f = fixture();
    let ctor = f.db.captured_constructor(ConeProjection::Out(f.number));
    f.db.set_captured_supertypes(ctor, vec![f.number]);
    let captured = f.db.captured(ctor, None, true);

    let approximator = CapturedTypeApproximator::new(&f.db);
    assert_eq!(
        approximator.approximate_to_super_type(captured, ApproximatorConfig::default()),
        Some(f.db.with_nullability(f.number, true))
    );
}

#[test]
fn test_captured_type_without_supertypes_has_no_approximation() {
    let f = fixture();
    let ctor = f.db.captured_constructor(ConeProjection::Star);
    let captured = f.db.captured(ctor, None, false);

    let approximator = CapturedTypeApproximator::new(&f.db);
    assert_eq!(
        approximator.approximate_to_super_type(captured, ApproximatorConfig::default()),
        None
    );
}

#[test]
fn test_self_referential_capture_terminates_with_star() {
    let f = fixture();
    let captured = self_referential_capture(&f, ConeProjection::Star);

    let approximator = CapturedTypeApproximator::new(&f.db);
    let result = approximator.approximate_to_super_type(captured, ApproximatorConfig::default());
    assert_eq!(
        result,
        Some(
            f.db
                .class_type(f.comparable, vec![ConeProjection::Star], false)
        )
    );
}

#[test]
fn test_captured_argument_uses_captured_projection() {
    let f = fixture();
    let out_ctor = f.db.captured_constructor(ConeProjection::Out(f.number));
    f.db.set_captured_supertypes(out_ctor, vec![f.number]);
    let out_captured = f.db.captured(out_ctor, None, false);

    let in_ctor = f.db.captured_constructor(ConeProjection::In(f.number));
    f.db.set_captured_supertypes(in_ctor, vec![f.number]);
    let in_captured = f.db.captured(in_ctor, None, false);

    let approximator = CapturedTypeApproximator::new(&f.db);
    let config = ApproximatorConfig::default();

    let out_list = f
        .db
        .class_type(f.list, vec![ConeProjection::Invariant(out_captured)], false);
    assert_eq!(
        approximator.approximate_to_super_type(out_list, config),
        Some(
            f.db
                .class_type(f.list, vec![ConeProjection::Out(f.number)], false)
        )
    );

    let in_list = f
        .db
        .class_type(f.list, vec![ConeProjection::Invariant(in_captured)], false);
    assert_eq!(
        approximator.approximate_to_super_type(in_list, config),
        Some(
            f.db
                .class_type(f.list, vec![ConeProjection::In(f.number)], false)
        )
    );
}

#[test]
fn test_in_position_keeps_only_in_captures() {
    let f = fixture();
    let out_ctor = f.db.captured_constructor(ConeProjection::Out(f.number));
    f.db.set_captured_supertypes(out_ctor, vec![f.number]);
    let out_captured = f.db.captured(out_ctor, None, false);

    let approximator = CapturedTypeApproximator::new(&f.db);
    let sink = f
        .db
        .class_type(f.comparable, vec![ConeProjection::In(out_captured)], false);
    assert_eq!(
        approximator.approximate_to_super_type(sink, ApproximatorConfig::default()),
        Some(
            f.db
                .class_type(f.comparable, vec![ConeProjection::Star], false)
        )
    );
}

#[test]
fn test_nested_changes_become_out() {
    let f = fixture();
    let ctor = f.db.captured_constructor(ConeProjection::Star);
    f.db.set_captured_supertypes(ctor, vec![f.number]);
    let captured = f.db.captured(ctor, None, false);

    let inner = f
        .db
        .class_type(f.list, vec![ConeProjection::Invariant(captured)], false);
    let outer = f
        .db
        .class_type(f.list, vec![ConeProjection::Invariant(inner)], false);

    let approximator = CapturedTypeApproximator::new(&f.db);
    let expected_inner = f.db.class_type(f.list, vec![ConeProjection::Star], false);
    assert_eq!(
        approximator.approximate_to_super_type(outer, ApproximatorConfig::default()),
        Some(
            f.db
                .class_type(f.list, vec![ConeProjection::Out(expected_inner)], false)
        )
    );
}

#[test]
fn test_public_declaration_collapses_intersections() {
    let f = fixture();
    let other = f.db.class_type(f.db.class_id("test/Other"), vec![], false);
    let intersection = f.db.intersection(vec![f.number, other]);

    let approximator = CapturedTypeApproximator::new(&f.db);
    assert_eq!(
        approximator.approximate_to_super_type(intersection, ApproximatorConfig::default()),
        None
    );
    assert_eq!(
        approximator
            .approximate_to_super_type(intersection, ApproximatorConfig::PublicDeclaration),
        Some(f.number)
    );
}

#[test]
fn test_wrappers_approximate_their_contents() {
    let f = fixture();
    let ctor = f.db.captured_constructor(ConeProjection::Out(f.number));
    f.db.set_captured_supertypes(ctor, vec![f.number]);
    let captured = f.db.captured(ctor, None, false);

    let approximator = CapturedTypeApproximator::new(&f.db);
    let config = ApproximatorConfig::default();

    let dnn = f.db.definitely_not_null(captured);
    assert_eq!(
        approximator.approximate_to_super_type(dnn, config),
        Some(f.db.definitely_not_null(f.number))
    );

    let flexible = f.db.flexible(f.number, captured);
    assert_eq!(
        approximator.approximate_to_super_type(flexible, config),
        Some(f.db.flexible(f.number, f.number))
    );
}
