//! Back-end intermediate representation of types.
//!
//! - `symbols`: class and type-parameter symbols and their registry
//! - `types`: IR types, type arguments and annotation calls
//! - `builtins`: the back end's built-in symbols and types
//! - `format`: human-readable rendering of IR types

pub mod builtins;
pub mod format;
pub mod symbols;
pub mod types;

pub use builtins::IrBuiltIns;
pub use format::IrTypeFormatter;
pub use symbols::{
    IrClassSymbol, IrClassifierSymbol, IrSymbolTable, IrTypeParameterSymbol, TypeParameterFlavor,
};
pub use types::{
    make_type_projection, IrConst, IrConstructorCall, IrSimpleType, IrType, IrTypeArgument, Variance,
};
