//! Identities of the language's built-in classifiers.

use crate::intern::ConeInterner;
use crate::symbols::{ClassKind, FrontSymbolTable};
use crate::types::ClassId;
use rustc_hash::FxHashMap;
pub use tylo_common::BUILTINS_PACKAGE;

/// Class ids of the built-in classifiers, interned once per session.
#[derive(Clone, Debug)]
pub struct StandardClassIds {
    pub any: ClassId,
    pub nothing: ClassId,
    pub unit: ClassId,
    pub boolean: ClassId,
    pub char: ClassId,
    pub byte: ClassId,
    pub short: ClassId,
    pub int: ClassId,
    pub long: ClassId,
    pub float: ClassId,
    pub double: ClassId,
    pub string: ClassId,
    pub number: ClassId,
    pub array: ClassId,
    pub extension_function_type: ClassId,
    primitive_arrays: Vec<(ClassId, ClassId)>,
}

impl StandardClassIds {
    pub fn new(db: &ConeInterner) -> Self {
        let id = |name: &str| db.class_id(&format!("{BUILTINS_PACKAGE}/{name}"));

        let boolean = id("Boolean");
        let char = id("Char");
        let byte = id("Byte");
        let short = id("Short");
        let int = id("Int");
        let long = id("Long");
        let float = id("Float");
        let double = id("Double");

        let primitive_arrays = [
            ("BooleanArray", boolean),
            ("CharArray", char),
            ("ByteArray", byte),
            ("ShortArray", short),
            ("IntArray", int),
            ("LongArray", long),
            ("FloatArray", float),
            ("DoubleArray", double),
        ]
        .into_iter()
        .map(|(array_name, element)| (id(array_name), element))
        .collect();

        Self {
            any: id("Any"),
            nothing: id("Nothing"),
            unit: id("Unit"),
            boolean,
            char,
            byte,
            short,
            int,
            long,
            float,
            double,
            string: id("String"),
            number: id("Number"),
            array: id("Array"),
            extension_function_type: id("ExtensionFunctionType"),
            primitive_arrays,
        }
    }

    /// The eight primitive classifiers, in declaration order.
    pub fn primitive_types(&self) -> [ClassId; 8] {
        [
            self.boolean,
            self.char,
            self.byte,
            self.short,
            self.int,
            self.long,
            self.float,
            self.double,
        ]
    }

    /// `IntArray -> Int`, `BooleanArray -> Boolean`, ...
    pub fn element_type_by_primitive_array(&self) -> FxHashMap<ClassId, ClassId> {
        self.primitive_arrays.iter().copied().collect()
    }

    /// `Int -> IntArray`, `Boolean -> BooleanArray`, ...
    pub fn primitive_array_by_element_type(&self) -> FxHashMap<ClassId, ClassId> {
        self.primitive_arrays
            .iter()
            .map(|&(array, element)| (element, array))
            .collect()
    }

    /// Declare every built-in classifier in `symbols`, the way a front end
    /// sees the standard library.
    pub fn register_in(&self, symbols: &FrontSymbolTable) {
        let classes = [
            self.any,
            self.nothing,
            self.unit,
            self.string,
            self.number,
            self.array,
        ];
        for class_id in classes.into_iter().chain(self.primitive_types()) {
            symbols.register_class(class_id, ClassKind::Class);
        }
        for &(array, _) in &self.primitive_arrays {
            symbols.register_class(array, ClassKind::Class);
        }
        symbols.register_class(self.extension_function_type, ClassKind::AnnotationClass);
    }
}
