//! Back-end symbols.
//!
//! A symbol is the IR identity of a declared entity. Symbols are plain `u32`
//! handles; names and flavors live in the `IrSymbolTable`, which is shared
//! by every lowering thread.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;

/// Global counter for assigning unique instance ids to tables.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IrClassSymbol(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IrTypeParameterSymbol(pub u32);

/// What a simple type points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum IrClassifierSymbol {
    Class(IrClassSymbol),
    TypeParameter(IrTypeParameterSymbol),
}

impl From<IrClassSymbol> for IrClassifierSymbol {
    fn from(symbol: IrClassSymbol) -> Self {
        IrClassifierSymbol::Class(symbol)
    }
}

impl From<IrTypeParameterSymbol> for IrClassifierSymbol {
    fn from(symbol: IrTypeParameterSymbol) -> Self {
        IrClassifierSymbol::TypeParameter(symbol)
    }
}

/// Where a type-parameter symbol is declared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeParameterFlavor {
    /// Declared by a class, function or property.
    Regular,
    /// Copy owned by a property setter.
    Setter,
}

struct TypeParameterEntry {
    name: Arc<str>,
    flavor: TypeParameterFlavor,
}

/// Registry of back-end symbols.
pub struct IrSymbolTable {
    instance_id: u64,
    class_names: DashMap<IrClassSymbol, Arc<str>>,
    classes_by_name: DashMap<Arc<str>, IrClassSymbol>,
    type_parameters: DashMap<IrTypeParameterSymbol, TypeParameterEntry>,
    next_class: AtomicU32,
    next_type_parameter: AtomicU32,
}

impl Default for IrSymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl IrSymbolTable {
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::SeqCst);
        trace!(instance_id, "IrSymbolTable::new");
        Self {
            instance_id,
            class_names: DashMap::new(),
            classes_by_name: DashMap::new(),
            type_parameters: DashMap::new(),
            next_class: AtomicU32::new(0),
            next_type_parameter: AtomicU32::new(0),
        }
    }

    /// Symbol of the class named `fq_name`, declared on first request.
    pub fn declare_class(&self, fq_name: &str) -> IrClassSymbol {
        if let Some(existing) = self.classes_by_name.get(fq_name) {
            return *existing;
        }
        match self.classes_by_name.entry(Arc::from(fq_name)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let symbol = IrClassSymbol(self.next_class.fetch_add(1, Ordering::SeqCst));
                trace!(instance_id = self.instance_id, symbol = symbol.0, fq_name, "declare_class");
                self.class_names.insert(symbol, entry.key().clone());
                entry.insert(symbol);
                symbol
            }
        }
    }

    /// Declare a fresh type-parameter symbol. Every call yields a new symbol.
    pub fn declare_type_parameter(
        &self,
        name: &str,
        flavor: TypeParameterFlavor,
    ) -> IrTypeParameterSymbol {
        let symbol =
            IrTypeParameterSymbol(self.next_type_parameter.fetch_add(1, Ordering::SeqCst));
        trace!(instance_id = self.instance_id, symbol = symbol.0, name, ?flavor, "declare_type_parameter");
        self.type_parameters.insert(
            symbol,
            TypeParameterEntry {
                name: Arc::from(name),
                flavor,
            },
        );
        symbol
    }

    pub fn class_by_name(&self, fq_name: &str) -> Option<IrClassSymbol> {
        self.classes_by_name.get(fq_name).map(|r| *r)
    }

    pub fn class_name(&self, symbol: IrClassSymbol) -> Option<Arc<str>> {
        self.class_names.get(&symbol).map(|r| r.clone())
    }

    pub fn type_parameter_name(&self, symbol: IrTypeParameterSymbol) -> Option<Arc<str>> {
        self.type_parameters.get(&symbol).map(|r| r.name.clone())
    }

    pub fn type_parameter_flavor(&self, symbol: IrTypeParameterSymbol) -> Option<TypeParameterFlavor> {
        self.type_parameters.get(&symbol).map(|r| r.flavor)
    }

    /// Display name of any classifier symbol.
    pub fn classifier_name(&self, symbol: IrClassifierSymbol) -> Option<Arc<str>> {
        match symbol {
            IrClassifierSymbol::Class(class) => self.class_name(class),
            IrClassifierSymbol::TypeParameter(param) => self.type_parameter_name(param),
        }
    }

    pub fn class_count(&self) -> usize {
        self.class_names.len()
    }

    pub fn type_parameter_count(&self) -> usize {
        self.type_parameters.len()
    }
}

#[cfg(test)]
#[path = "../tests/symbols_tests.rs"]
mod tests;
