use super::*;
use crate::test_support::TestEnv;
use tylo_front::ClassKind;

#[test]
fn test_class_symbols_are_cached_by_name() {
    let env = TestEnv::new();
    let storage = LazyClassifierStorage::new(&env.db, &env.symbols, &env.ir_symbols);
    let list = env.class("lang/collections/List");

    let first = storage.resolve_symbol(
        &FrontSymbol::Class(list, ClassKind::Class),
        ConversionTypeContext::DEFAULT,
    );
    let second = storage.resolve_symbol(
        &FrontSymbol::Class(list, ClassKind::Class),
        ConversionTypeContext::DEFAULT,
    );
    assert_eq!(first, second);
    assert_eq!(
        first,
        env.ir_symbols
            .class_by_name("lang/collections/List")
            .map(IrClassifierSymbol::Class)
    );
}

#[test]
fn test_type_parameter_symbols_per_origin() {
    let env = TestEnv::new();
    let storage = LazyClassifierStorage::new(&env.db, &env.symbols, &env.ir_symbols);
    let t = env.type_parameter("T");

    let regular = storage.type_parameter_symbol(t, ConversionTypeOrigin::Default);
    let again = storage.type_parameter_symbol(t, ConversionTypeOrigin::Default);
    let setter = storage.type_parameter_symbol(t, ConversionTypeOrigin::Setter);

    assert!(regular.is_some());
    assert_eq!(regular, again);
    assert_ne!(regular, setter);

    let setter = setter.expect("declared parameter");
    assert_eq!(
        env.ir_symbols.type_parameter_flavor(setter),
        Some(TypeParameterFlavor::Setter)
    );
    assert_eq!(env.ir_symbols.type_parameter_name(setter).as_deref(), Some("T"));
}

#[test]
fn test_undeclared_type_parameter_is_not_found() {
    let env = TestEnv::new();
    let storage = LazyClassifierStorage::new(&env.db, &env.symbols, &env.ir_symbols);
    assert_eq!(
        storage.resolve_symbol(
            &FrontSymbol::TypeParameter(TypeParamId(404)),
            ConversionTypeContext::DEFAULT
        ),
        None
    );
}

#[test]
fn test_alias_resolves_to_underlying_class() {
    let env = TestEnv::new();
    let storage = LazyClassifierStorage::new(&env.db, &env.symbols, &env.ir_symbols);
    let list = env.class("lang/collections/List");
    let strings = env.db.class_id("test/Strings");
    let names = env.db.class_id("test/Names");
    env.symbols.register_type_alias(
        strings,
        vec![],
        env.class_type(list, vec![tylo_front::ConeProjection::Invariant(env.string())]),
    );
    env.symbols
        .register_type_alias(names, vec![], env.class_type(strings, vec![]));

    let resolved = storage.resolve_symbol(
        &FrontSymbol::TypeAlias(names),
        ConversionTypeContext::DEFAULT,
    );
    assert_eq!(resolved, Some(storage.class_symbol(list).into()));
}

#[test]
fn test_cyclic_alias_is_not_found() {
    let env = TestEnv::new();
    let storage = LazyClassifierStorage::new(&env.db, &env.symbols, &env.ir_symbols);
    let a = env.db.class_id("test/A");
    let b = env.db.class_id("test/B");
    env.symbols
        .register_type_alias(a, vec![], env.class_type(b, vec![]));
    env.symbols
        .register_type_alias(b, vec![], env.class_type(a, vec![]));

    assert_eq!(
        storage.resolve_symbol(&FrontSymbol::TypeAlias(a), ConversionTypeContext::DEFAULT),
        None
    );
}

#[test]
fn test_alias_to_unknown_class_is_not_found() {
    let env = TestEnv::new();
    let storage = LazyClassifierStorage::new(&env.db, &env.symbols, &env.ir_symbols);
    let alias = env.db.class_id("test/Dangling");
    let missing = env.db.class_id("test/Missing");
    env.symbols
        .register_type_alias(alias, vec![], env.class_type(missing, vec![]));

    assert_eq!(
        storage.resolve_symbol(&FrontSymbol::TypeAlias(alias), ConversionTypeContext::DEFAULT),
        None
    );
}

#[test]
fn test_concurrent_resolution_agrees() {
    use rayon::prelude::*;

    let env = TestEnv::new();
    let storage = LazyClassifierStorage::new(&env.db, &env.symbols, &env.ir_symbols);
    let t = env.type_parameter("T");
    let classes: Vec<ClassId> = (0..8).map(|i| env.class(&format!("test/C{i}"))).collect();

    let resolved: Vec<_> = (0..256)
        .into_par_iter()
        .map(|i| {
            let class = storage.class_symbol(classes[i % classes.len()]);
            let param = storage.type_parameter_symbol(t, ConversionTypeOrigin::Default);
            (i, class, param)
        })
        .collect();

    let param = storage.type_parameter_symbol(t, ConversionTypeOrigin::Default);
    for (i, class, resolved_param) in resolved {
        assert_eq!(class, storage.class_symbol(classes[i % classes.len()]));
        assert_eq!(resolved_param, param);
    }
    assert_eq!(env.ir_symbols.type_parameter_count(), 1);
}

#[test]
fn test_storages_sharing_a_cache_agree() {
    let env = TestEnv::new();
    let t = env.type_parameter("T");
    let foo = env.class("test/Foo");
    let cache = Arc::new(ClassifierSymbolCache::new());

    let first = LazyClassifierStorage::with_cache(
        &env.db,
        &env.symbols,
        &env.ir_symbols,
        Arc::clone(&cache),
    );
    let second = LazyClassifierStorage::with_cache(
        &env.db,
        &env.symbols,
        &env.ir_symbols,
        Arc::clone(&cache),
    );

    assert_eq!(
        first.type_parameter_symbol(t, ConversionTypeOrigin::Default),
        second.type_parameter_symbol(t, ConversionTypeOrigin::Default)
    );
    assert_eq!(first.class_symbol(foo), second.class_symbol(foo));
    assert_eq!(cache.type_parameter_count(), 1);
    assert_eq!(cache.class_count(), 1);

    let unshared = LazyClassifierStorage::new(&env.db, &env.symbols, &env.ir_symbols);
    assert_ne!(
        unshared.type_parameter_symbol(t, ConversionTypeOrigin::Default),
        first.type_parameter_symbol(t, ConversionTypeOrigin::Default)
    );
}
