//! Classifier symbol resolution: built-in table first, storage second.

use crate::builtin_table::BuiltinSymbolTable;
use crate::context::ConversionTypeContext;
use crate::storage::ClassifierStorage;
use tracing::trace;
use tylo_front::{FrontSymbolTable, LookupTag};
use tylo_ir::IrClassifierSymbol;

pub struct ClassifierResolver<'a> {
    builtins: &'a BuiltinSymbolTable,
    symbols: &'a FrontSymbolTable,
    storage: &'a dyn ClassifierStorage,
}

impl<'a> ClassifierResolver<'a> {
    pub fn new(
        builtins: &'a BuiltinSymbolTable,
        symbols: &'a FrontSymbolTable,
        storage: &'a dyn ClassifierStorage,
    ) -> Self {
        Self {
            builtins,
            symbols,
            storage,
        }
    }

    /// Back-end symbol for the classifier `tag` names, `None` if unresolvable.
    pub fn resolve(
        &self,
        tag: LookupTag,
        context: ConversionTypeContext,
    ) -> Option<IrClassifierSymbol> {
        if let Some(symbol) = self.builtins.class_symbol(tag.class_id()) {
            return Some(symbol.into());
        }
        let Some(front_symbol) = self.symbols.to_symbol(tag) else {
            trace!(?tag, "no front-end symbol");
            return None;
        };
        self.storage.resolve_symbol(&front_symbol, context)
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
