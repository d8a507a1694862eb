//! Classifier storage: front-end symbols to back-end symbols.
//!
//! The lowering engine consults the storage for every classifier the
//! built-in table does not know. `LazyClassifierStorage` declares back-end
//! symbols on first request and records them in a `ClassifierSymbolCache`,
//! so repeated and concurrent requests for the same classifier agree. Two
//! storages sharing one cache hand out the same symbols.

use crate::context::{ConversionTypeContext, ConversionTypeOrigin};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, trace};
use tylo_front::{
    ClassId, ConeInterner, ConeTypeData, FrontSymbol, FrontSymbolTable, RecursionGuard,
    RecursionProfile, TypeParamId,
};
use tylo_ir::{
    IrClassSymbol, IrClassifierSymbol, IrSymbolTable, IrTypeParameterSymbol, TypeParameterFlavor,
};

/// Source of back-end classifier symbols.
pub trait ClassifierStorage: Send + Sync {
    /// Back-end symbol for `symbol`, materialized on demand.
    fn resolve_symbol(
        &self,
        symbol: &FrontSymbol,
        context: ConversionTypeContext,
    ) -> Option<IrClassifierSymbol>;
}

/// Back-end symbols already materialized for front-end classifiers.
#[derive(Default)]
pub struct ClassifierSymbolCache {
    classes: DashMap<ClassId, IrClassSymbol>,
    type_parameters: DashMap<(TypeParamId, ConversionTypeOrigin), IrTypeParameterSymbol>,
}

impl ClassifierSymbolCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn type_parameter_count(&self) -> usize {
        self.type_parameters.len()
    }
}

pub struct LazyClassifierStorage<'a> {
    db: &'a ConeInterner,
    symbols: &'a FrontSymbolTable,
    ir_symbols: &'a IrSymbolTable,
    cache: Arc<ClassifierSymbolCache>,
}

impl<'a> LazyClassifierStorage<'a> {
    /// Storage with a cache of its own.
    pub fn new(
        db: &'a ConeInterner,
        symbols: &'a FrontSymbolTable,
        ir_symbols: &'a IrSymbolTable,
    ) -> Self {
        Self::with_cache(db, symbols, ir_symbols, Arc::new(ClassifierSymbolCache::new()))
    }

    pub fn with_cache(
        db: &'a ConeInterner,
        symbols: &'a FrontSymbolTable,
        ir_symbols: &'a IrSymbolTable,
        cache: Arc<ClassifierSymbolCache>,
    ) -> Self {
        Self {
            db,
            symbols,
            ir_symbols,
            cache,
        }
    }

    pub fn class_symbol(&self, class_id: ClassId) -> IrClassSymbol {
        if let Some(symbol) = self.cache.classes.get(&class_id) {
            return *symbol;
        }
        *self
            .cache
            .classes
            .entry(class_id)
            .or_insert_with(|| self.ir_symbols.declare_class(&self.db.class_name(class_id)))
    }

    /// Type-parameter symbol of `param` as seen from `origin`.
    ///
    /// Setter signatures get a symbol of their own, distinct from the one
    /// every other position shares.
    pub fn type_parameter_symbol(
        &self,
        param: TypeParamId,
        origin: ConversionTypeOrigin,
    ) -> Option<IrTypeParameterSymbol> {
        if let Some(symbol) = self.cache.type_parameters.get(&(param, origin)) {
            return Some(*symbol);
        }
        let decl = self.symbols.type_parameter(param)?;
        let flavor = match origin {
            ConversionTypeOrigin::Default => TypeParameterFlavor::Regular,
            ConversionTypeOrigin::Setter => TypeParameterFlavor::Setter,
        };
        let symbol = *self
            .cache
            .type_parameters
            .entry((param, origin))
            .or_insert_with(|| {
                let name: Arc<str> = self.db.resolve_atom_ref(decl.name);
                self.ir_symbols.declare_type_parameter(&name, flavor)
            });
        Some(symbol)
    }

    /// Follow a type alias through its expansion to the classifier it names.
    fn alias_target(
        &self,
        alias: ClassId,
        context: ConversionTypeContext,
    ) -> Option<IrClassifierSymbol> {
        let mut guard: RecursionGuard<ClassId> =
            RecursionGuard::with_profile(RecursionProfile::AliasExpansion);
        let mut entered = Vec::new();
        let mut current = alias;

        let target = loop {
            if !guard.enter(current).is_entered() {
                debug!(alias = %self.db.class_name(alias), "cyclic or too deep type alias");
                break None;
            }
            entered.push(current);

            let Some((_, expanded)) = self.symbols.type_alias(current) else {
                break None;
            };
            let Some(ConeTypeData::LookupTagBased { tag, .. }) = self.db.lookup(expanded) else {
                break None;
            };
            match self.symbols.to_symbol(tag) {
                Some(FrontSymbol::TypeAlias(next)) => current = next,
                Some(symbol) => break Some(symbol),
                None => break None,
            }
        };

        for class_id in entered {
            guard.leave(class_id);
        }
        self.resolve_symbol(&target?, context)
    }
}

impl ClassifierStorage for LazyClassifierStorage<'_> {
    fn resolve_symbol(
        &self,
        symbol: &FrontSymbol,
        context: ConversionTypeContext,
    ) -> Option<IrClassifierSymbol> {
        trace!(?symbol, ?context, "resolve_symbol");
        match *symbol {
            FrontSymbol::Class(class_id, _) => Some(self.class_symbol(class_id).into()),
            FrontSymbol::TypeParameter(param) => self
                .type_parameter_symbol(param, context.origin)
                .map(IrClassifierSymbol::from),
            FrontSymbol::TypeAlias(alias) => self.alias_target(alias, context),
        }
    }
}

#[cfg(test)]
#[path = "../tests/storage_tests.rs"]
mod tests;
