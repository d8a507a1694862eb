//! Lowering of resolved front-end types to back-end IR types.
//!
//! Components, leaves first:
//! - `builtin_table`: fixed mapping of well-known classifiers to built-ins
//! - `resolver`: built-in table first, then the classifier storage
//! - `convert`: the recursive lowering engine
//! - `arguments`: type-argument projections, with captured-type
//!   approximation
//!
//! and the collaborators they consume: `storage`, `annotations`, `context`,
//! `options`, `type_ref`, and `session`, which owns a complete set of them.
//!
//! ```ignore
//! let converter = TypeConverter::new(components);
//! let ir = converter.lower_type(ty, ConversionTypeContext::DEFAULT);
//! ```

pub mod annotations;
mod arguments;
pub mod builtin_table;
pub mod context;
pub mod convert;
pub mod options;
pub mod resolver;
pub mod session;
pub mod storage;
pub mod type_ref;

#[cfg(test)]
pub(crate) mod test_support;

pub use annotations::{AnnotationGenerator, AnnotationTranslator};
pub use builtin_table::BuiltinSymbolTable;
pub use context::{ConversionTypeContext, ConversionTypeOrigin};
pub use convert::{LoweringComponents, TypeConverter};
pub use options::LoweringOptions;
pub use resolver::ClassifierResolver;
pub use session::LoweringSession;
pub use storage::{ClassifierStorage, ClassifierSymbolCache, LazyClassifierStorage};
pub use type_ref::{ImplicitBuiltinType, TypeRef};
