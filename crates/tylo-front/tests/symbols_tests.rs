use super::*;
use crate::intern::ConeInterner;

#[test]
fn test_register_and_resolve_class() {
    let db = ConeInterner::new();
    let table = FrontSymbolTable::new();
    let list = db.class_id("lang/collections/List");

    assert!(table.is_empty());
    table.register_class(list, ClassKind::Interface);

    assert_eq!(table.len(), 1);
    assert!(table.contains_classifier(list));
    assert_eq!(
        table.to_symbol(LookupTag::Class(list)),
        Some(FrontSymbol::Class(list, ClassKind::Interface))
    );
    assert_eq!(
        table.classifier(list),
        Some(ClassifierDecl::Class {
            kind: ClassKind::Interface
        })
    );
}

#[test]
fn test_unknown_tags_resolve_to_nothing() {
    let db = ConeInterner::new();
    let table = FrontSymbolTable::new();

    assert_eq!(table.to_symbol(LookupTag::Class(db.class_id("test/Foo"))), None);
    assert_eq!(table.to_symbol(LookupTag::TypeParameter(TypeParamId(7))), None);
}

#[test]
fn test_type_alias_symbol() {
    let db = ConeInterner::new();
    let table = FrontSymbolTable::new();
    let alias = db.class_id("test/Names");
    let t = table.declare_type_parameter(db.intern_string("T"));
    let expanded = db.type_parameter_type(t, false);

    table.register_type_alias(alias, vec![t], expanded);

    assert_eq!(
        table.to_symbol(LookupTag::Class(alias)),
        Some(FrontSymbol::TypeAlias(alias))
    );
    assert_eq!(table.type_alias(alias), Some((vec![t], expanded)));
}

#[test]
fn test_type_alias_of_class_is_none() {
    let db = ConeInterner::new();
    let table = FrontSymbolTable::new();
    let class = db.class_id("test/Plain");
    table.register_class(class, ClassKind::Class);
    assert_eq!(table.type_alias(class), None);
}

#[test]
fn test_type_parameters_get_fresh_ids() {
    let db = ConeInterner::new();
    let table = FrontSymbolTable::new();
    let name = db.intern_string("T");

    let first = table.declare_type_parameter(name);
    let second = table.declare_type_parameter(name);
    assert_ne!(first, second);
    assert_eq!(
        table.to_symbol(LookupTag::TypeParameter(second)),
        Some(FrontSymbol::TypeParameter(second))
    );
}

#[test]
fn test_type_parameter_keeps_its_name() {
    let db = ConeInterner::new();
    let table = FrontSymbolTable::new();

    let t = table.declare_type_parameter(db.intern_string("T"));
    let decl = table.type_parameter(t).expect("declared");
    assert_eq!(db.resolve_atom(decl.name), "T");
    assert_eq!(table.type_parameter(TypeParamId(t.0 + 1)), None);
}

#[test]
fn test_concurrent_registration() {
    use rayon::prelude::*;

    let db = ConeInterner::new();
    let table = FrontSymbolTable::new();

    (0..64).into_par_iter().for_each(|i| {
        table.register_class(db.class_id(&format!("test/C{i}")), ClassKind::Class);
    });

    assert_eq!(table.len(), 64);
}
