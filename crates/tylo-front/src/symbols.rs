//! Front-end symbol table.
//!
//! Maps lookup tags to the front-end declarations behind them: classes,
//! type aliases and type parameters. The lowering engine only asks one
//! question of it, "which symbol does this tag name, if any?", but the
//! table also keeps what alias expansion and classifier storage need.
//!
//! Uses `DashMap` so several lowering threads can query it while the front
//! end keeps registering declarations.

use crate::types::{ClassId, ConeTypeId, LookupTag, TypeParamId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;
use tylo_common::interner::Atom;

/// Global counter for assigning unique instance ids to tables.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Kind of a class-like declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Object,
    AnnotationClass,
}

/// A class-like declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassifierDecl {
    /// Class, interface, object or annotation class.
    Class { kind: ClassKind },
    /// `typealias Name<params> = expanded`
    TypeAlias {
        params: Vec<TypeParamId>,
        expanded: ConeTypeId,
    },
}

/// A declared type parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamDecl {
    pub name: Atom,
}

/// What a lookup tag resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrontSymbol {
    Class(ClassId, ClassKind),
    TypeAlias(ClassId),
    TypeParameter(TypeParamId),
}

/// Thread-safe storage for front-end declarations.
pub struct FrontSymbolTable {
    /// Unique instance id for debugging
    instance_id: u64,
    classifiers: DashMap<ClassId, ClassifierDecl>,
    type_params: DashMap<TypeParamId, TypeParamDecl>,
    next_type_param: AtomicU32,
}

impl Default for FrontSymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontSymbolTable {
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::SeqCst);
        trace!(instance_id, "FrontSymbolTable::new");
        Self {
            instance_id,
            classifiers: DashMap::new(),
            type_params: DashMap::new(),
            next_type_param: AtomicU32::new(0),
        }
    }

    /// Register (or re-register) a class-like declaration.
    pub fn register_class(&self, id: ClassId, kind: ClassKind) {
        trace!(instance_id = self.instance_id, class = id.0.index(), ?kind, "register_class");
        self.classifiers.insert(id, ClassifierDecl::Class { kind });
    }

    /// Register a type alias with its type parameters and expansion.
    pub fn register_type_alias(&self, id: ClassId, params: Vec<TypeParamId>, expanded: ConeTypeId) {
        trace!(instance_id = self.instance_id, alias = id.0.index(), "register_type_alias");
        self.classifiers
            .insert(id, ClassifierDecl::TypeAlias { params, expanded });
    }

    /// Declare a fresh type parameter.
    pub fn declare_type_parameter(&self, name: Atom) -> TypeParamId {
        let id = TypeParamId(self.next_type_param.fetch_add(1, Ordering::SeqCst));
        self.type_params.insert(id, TypeParamDecl { name });
        id
    }

    pub fn classifier(&self, id: ClassId) -> Option<ClassifierDecl> {
        self.classifiers.get(&id).map(|r| r.clone())
    }

    pub fn contains_classifier(&self, id: ClassId) -> bool {
        self.classifiers.contains_key(&id)
    }

    pub fn type_parameter(&self, id: TypeParamId) -> Option<TypeParamDecl> {
        self.type_params.get(&id).map(|r| r.clone())
    }

    /// Parameters and expansion of a type alias. `None` for anything else.
    pub fn type_alias(&self, id: ClassId) -> Option<(Vec<TypeParamId>, ConeTypeId)> {
        match self.classifiers.get(&id)?.value() {
            ClassifierDecl::TypeAlias { params, expanded } => Some((params.clone(), *expanded)),
            ClassifierDecl::Class { .. } => None,
        }
    }

    /// Resolve a lookup tag to the declaration it names.
    pub fn to_symbol(&self, tag: LookupTag) -> Option<FrontSymbol> {
        match tag {
            LookupTag::Class(id) => match self.classifiers.get(&id)?.value() {
                ClassifierDecl::Class { kind } => Some(FrontSymbol::Class(id, *kind)),
                ClassifierDecl::TypeAlias { .. } => Some(FrontSymbol::TypeAlias(id)),
            },
            LookupTag::TypeParameter(id) => self
                .type_params
                .contains_key(&id)
                .then_some(FrontSymbol::TypeParameter(id)),
        }
    }

    /// Number of class-like declarations.
    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/symbols_tests.rs"]
mod tests;
