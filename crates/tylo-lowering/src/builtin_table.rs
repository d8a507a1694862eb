//! Fast path from well-known classifier identities to back-end built-ins.
//!
//! Built once from the standard class ids and the back end's `IrBuiltIns`,
//! read-only afterwards. Lookups never allocate.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use tylo_front::{ClassId, ConeInterner, StandardClassIds};
use tylo_ir::{IrBuiltIns, IrClassSymbol, IrType};

pub struct BuiltinSymbolTable {
    symbols: FxHashMap<ClassId, IrClassSymbol>,
    types: FxHashMap<ClassId, IrType>,
    element_type_by_primitive_array: FxHashMap<ClassId, ClassId>,
    primitive_array_for_type: FxHashMap<IrType, IrClassSymbol>,
    /// Names of every identity above, for fault messages.
    names: FxHashMap<ClassId, Arc<str>>,
}

impl BuiltinSymbolTable {
    pub fn new(db: &ConeInterner, standard: &StandardClassIds, builtins: &IrBuiltIns) -> Self {
        let pairs = [
            (standard.nothing, builtins.nothing_class, &builtins.nothing_type),
            (standard.unit, builtins.unit_class, &builtins.unit_type),
            (standard.boolean, builtins.boolean_class, &builtins.boolean_type),
            (standard.string, builtins.string_class, &builtins.string_type),
            (standard.any, builtins.any_class, &builtins.any_type),
            (standard.long, builtins.long_class, &builtins.long_type),
            (standard.int, builtins.int_class, &builtins.int_type),
            (standard.short, builtins.short_class, &builtins.short_type),
            (standard.byte, builtins.byte_class, &builtins.byte_type),
            (standard.float, builtins.float_class, &builtins.float_type),
            (standard.double, builtins.double_class, &builtins.double_type),
            (standard.char, builtins.char_class, &builtins.char_type),
        ];

        let mut symbols: FxHashMap<ClassId, IrClassSymbol> = pairs
            .iter()
            .map(|&(class_id, symbol, _)| (class_id, symbol))
            .collect();
        symbols.insert(standard.array, builtins.array_class);

        let types = pairs
            .iter()
            .map(|&(class_id, _, ty)| (class_id, ty.clone()))
            .collect();

        let element_type_by_primitive_array = standard.element_type_by_primitive_array();

        let names = symbols
            .keys()
            .chain(element_type_by_primitive_array.keys())
            .map(|&class_id| (class_id, db.class_name(class_id)))
            .collect();

        Self {
            symbols,
            types,
            element_type_by_primitive_array,
            primitive_array_for_type: builtins.primitive_array_for_type.clone(),
            names,
        }
    }

    /// Built-in class symbol for `class_id`, primitive arrays included.
    pub fn class_symbol(&self, class_id: Option<ClassId>) -> Option<IrClassSymbol> {
        let class_id = class_id?;
        self.symbols
            .get(&class_id)
            .copied()
            .or_else(|| self.primitive_array_symbol(class_id))
    }

    /// Built-in type for `class_id`. `Array` has a symbol but no type.
    pub fn class_type(&self, class_id: ClassId) -> Option<&IrType> {
        self.types.get(&class_id)
    }

    /// Symbol of the primitive array `class_id`, derived through its element
    /// type. `None` when `class_id` is not a primitive array.
    ///
    /// # Panics
    ///
    /// When `class_id` is a primitive array but the back end has no array
    /// class for its element type.
    pub fn primitive_array_symbol(&self, class_id: ClassId) -> Option<IrClassSymbol> {
        let element = *self.element_type_by_primitive_array.get(&class_id)?;
        let symbol = self
            .types
            .get(&element)
            .and_then(|element_type| self.primitive_array_for_type.get(element_type));
        match symbol {
            Some(&symbol) => Some(symbol),
            None => panic!(
                "Strange primitive element type {} from array: {}",
                self.name(element),
                self.name(class_id)
            ),
        }
    }

    fn name(&self, class_id: ClassId) -> Arc<str> {
        self.names
            .get(&class_id)
            .cloned()
            .unwrap_or_else(|| Arc::from(format!("{class_id:?}")))
    }
}

#[cfg(test)]
#[path = "../tests/builtin_table_tests.rs"]
mod tests;
