//! The back end's built-in symbols and types.
//!
//! `IrBuiltIns` declares the built-in classes in an `IrSymbolTable` once and
//! keeps both the class symbols and the matching non-null types. The
//! primitive-array table is keyed by the primitive *type*, the way back-end
//! code generators look it up.

use crate::symbols::{IrClassSymbol, IrSymbolTable};
use crate::types::{IrConstructorCall, IrType};
use rustc_hash::FxHashMap;
use tylo_common::BUILTINS_PACKAGE;

/// `(primitive, primitive array)` class names.
const PRIMITIVES: [(&str, &str); 8] = [
    ("Boolean", "BooleanArray"),
    ("Char", "CharArray"),
    ("Byte", "ByteArray"),
    ("Short", "ShortArray"),
    ("Int", "IntArray"),
    ("Long", "LongArray"),
    ("Float", "FloatArray"),
    ("Double", "DoubleArray"),
];

#[derive(Clone, Debug)]
pub struct IrBuiltIns {
    pub any_class: IrClassSymbol,
    pub nothing_class: IrClassSymbol,
    pub unit_class: IrClassSymbol,
    pub boolean_class: IrClassSymbol,
    pub char_class: IrClassSymbol,
    pub byte_class: IrClassSymbol,
    pub short_class: IrClassSymbol,
    pub int_class: IrClassSymbol,
    pub long_class: IrClassSymbol,
    pub float_class: IrClassSymbol,
    pub double_class: IrClassSymbol,
    pub string_class: IrClassSymbol,
    pub array_class: IrClassSymbol,
    pub extension_function_type_class: IrClassSymbol,

    pub any_type: IrType,
    pub any_n_type: IrType,
    pub nothing_type: IrType,
    pub nothing_n_type: IrType,
    pub unit_type: IrType,
    pub boolean_type: IrType,
    pub char_type: IrType,
    pub byte_type: IrType,
    pub short_type: IrType,
    pub int_type: IrType,
    pub long_type: IrType,
    pub float_type: IrType,
    pub double_type: IrType,
    pub string_type: IrType,

    /// `Int -> IntArray`, keyed by the non-null primitive type.
    pub primitive_array_for_type: FxHashMap<IrType, IrClassSymbol>,
}

impl IrBuiltIns {
    pub fn new(symbols: &IrSymbolTable) -> Self {
        let class = |name: &str| symbols.declare_class(&format!("{BUILTINS_PACKAGE}/{name}"));

        let primitive_array_for_type = PRIMITIVES
            .iter()
            .map(|&(primitive, array)| (IrType::simple(class(primitive)), class(array)))
            .collect();

        let any_class = class("Any");
        let nothing_class = class("Nothing");
        let boolean_class = class("Boolean");
        let char_class = class("Char");
        let byte_class = class("Byte");
        let short_class = class("Short");
        let int_class = class("Int");
        let long_class = class("Long");
        let float_class = class("Float");
        let double_class = class("Double");
        let string_class = class("String");
        let unit_class = class("Unit");

        Self {
            any_class,
            nothing_class,
            unit_class,
            boolean_class,
            char_class,
            byte_class,
            short_class,
            int_class,
            long_class,
            float_class,
            double_class,
            string_class,
            array_class: class("Array"),
            extension_function_type_class: class("ExtensionFunctionType"),

            any_type: IrType::simple(any_class),
            any_n_type: IrType::simple(any_class).with_nullability(true),
            nothing_type: IrType::simple(nothing_class),
            nothing_n_type: IrType::simple(nothing_class).with_nullability(true),
            unit_type: IrType::simple(unit_class),
            boolean_type: IrType::simple(boolean_class),
            char_type: IrType::simple(char_class),
            byte_type: IrType::simple(byte_class),
            short_type: IrType::simple(short_class),
            int_type: IrType::simple(int_class),
            long_type: IrType::simple(long_class),
            float_type: IrType::simple(float_class),
            double_type: IrType::simple(double_class),
            string_type: IrType::simple(string_class),

            primitive_array_for_type,
        }
    }

    /// Marker annotation for `A.(B) -> C` function types.
    pub fn extension_function_type_annotation_call(&self) -> IrConstructorCall {
        IrConstructorCall::new(self.extension_function_type_class)
    }
}

#[cfg(test)]
#[path = "../tests/builtins_tests.rs"]
mod tests;
