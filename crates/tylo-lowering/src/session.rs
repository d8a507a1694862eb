//! An owned lowering session.
//!
//! `TypeConverter` only borrows its collaborators. `LoweringSession` owns
//! the long-lived ones (type store, symbol tables, built-ins, the classifier
//! symbol cache, options) and builds a converter over them on demand.

use crate::annotations::AnnotationGenerator;
use crate::builtin_table::BuiltinSymbolTable;
use crate::convert::{LoweringComponents, TypeConverter};
use crate::options::LoweringOptions;
use crate::storage::{ClassifierSymbolCache, LazyClassifierStorage};
use std::sync::Arc;
use tylo_front::{
    CapturedTypeApproximator, ConeInterner, FrontSymbolTable, StandardClassIds, TypeApproximator,
};
use tylo_ir::{IrBuiltIns, IrSymbolTable, IrType, IrTypeFormatter};

pub struct LoweringSession {
    pub db: ConeInterner,
    pub symbols: FrontSymbolTable,
    pub ir_symbols: IrSymbolTable,
    pub standard: StandardClassIds,
    pub builtins: IrBuiltIns,
    pub builtin_table: BuiltinSymbolTable,
    pub symbol_cache: Arc<ClassifierSymbolCache>,
    pub options: LoweringOptions,
}

impl Default for LoweringSession {
    fn default() -> Self {
        Self::new(LoweringOptions::default())
    }
}

impl LoweringSession {
    /// Fresh session with the built-in classifiers already declared.
    pub fn new(options: LoweringOptions) -> Self {
        let db = ConeInterner::new();
        let symbols = FrontSymbolTable::new();
        let ir_symbols = IrSymbolTable::new();
        let standard = StandardClassIds::new(&db);
        standard.register_in(&symbols);
        let builtins = IrBuiltIns::new(&ir_symbols);
        let builtin_table = BuiltinSymbolTable::new(&db, &standard, &builtins);
        Self {
            db,
            symbols,
            ir_symbols,
            standard,
            builtins,
            builtin_table,
            symbol_cache: Arc::new(ClassifierSymbolCache::new()),
            options,
        }
    }

    /// Run `f` with a converter using the captured-type approximator.
    ///
    /// Every converter of a session shares its symbol cache, so a classifier
    /// lowers to the same back-end symbol across calls.
    pub fn with_converter<R>(&self, f: impl FnOnce(&TypeConverter<'_>) -> R) -> R {
        let approximator = CapturedTypeApproximator::new(&self.db);
        self.with_approximator(&approximator, f)
    }

    pub fn with_approximator<R>(
        &self,
        approximator: &dyn TypeApproximator,
        f: impl FnOnce(&TypeConverter<'_>) -> R,
    ) -> R {
        let storage = LazyClassifierStorage::with_cache(
            &self.db,
            &self.symbols,
            &self.ir_symbols,
            Arc::clone(&self.symbol_cache),
        );
        let annotations = AnnotationGenerator::new(&self.db, &self.symbols, &storage);
        let converter = TypeConverter::new(LoweringComponents {
            db: &self.db,
            symbols: &self.symbols,
            builtins: &self.builtins,
            builtin_table: &self.builtin_table,
            storage: &storage,
            annotations: &annotations,
            approximator,
            options: &self.options,
        });
        f(&converter)
    }

    pub fn render(&self, ty: &IrType) -> String {
        IrTypeFormatter::new(&self.ir_symbols).format(ty)
    }
}

#[cfg(test)]
#[path = "../tests/session_tests.rs"]
mod tests;
