//! Lowering of type references.
//!
//! The front end wraps every type it hands over in a reference. Implicit
//! references to a handful of built-in types skip resolution entirely.

use crate::context::ConversionTypeContext;
use crate::convert::TypeConverter;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tylo_front::{ConeTypeId, FirAnnotation};
use tylo_ir::IrType;

/// Built-in types the front end can reference without resolving anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImplicitBuiltinType {
    Nothing,
    Unit,
    Boolean,
    String,
    Any,
    Int,
    NullableAny,
    NullableNothing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    /// Resolution failed or never ran.
    Unresolved,
    Resolved {
        ty: ConeTypeId,
        annotations: Vec<FirAnnotation>,
    },
    ImplicitBuiltin(ImplicitBuiltinType),
}

impl TypeRef {
    pub fn resolved(ty: ConeTypeId) -> Self {
        TypeRef::Resolved {
            ty,
            annotations: Vec::new(),
        }
    }
}

impl TypeConverter<'_> {
    pub fn lower_type_ref(&self, type_ref: &TypeRef, context: ConversionTypeContext) -> IrType {
        match type_ref {
            TypeRef::Unresolved => IrType::Error,
            TypeRef::ImplicitBuiltin(builtin) => self.implicit_builtin_type(*builtin),
            TypeRef::Resolved { ty, annotations } => {
                let mut visited = FxHashSet::default();
                self.lower_type_with(*ty, context, &mut visited, annotations)
            }
        }
    }

    fn implicit_builtin_type(&self, builtin: ImplicitBuiltinType) -> IrType {
        let builtins = self.components.builtins;
        match builtin {
            ImplicitBuiltinType::Nothing => builtins.nothing_type.clone(),
            ImplicitBuiltinType::Unit => builtins.unit_type.clone(),
            ImplicitBuiltinType::Boolean => builtins.boolean_type.clone(),
            ImplicitBuiltinType::String => builtins.string_type.clone(),
            ImplicitBuiltinType::Any => builtins.any_type.clone(),
            ImplicitBuiltinType::Int => builtins.int_type.clone(),
            ImplicitBuiltinType::NullableAny => builtins.any_n_type.clone(),
            ImplicitBuiltinType::NullableNothing => builtins.nothing_n_type.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/type_ref_tests.rs"]
mod tests;
