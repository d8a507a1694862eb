//! Resolved ("cone") type model for tylo.
//!
//! Holds everything the lowering engine reads from the front end:
//! - `types` / `intern`: interned resolved types
//! - `standard`: identities of the built-in classifiers
//! - `symbols`: the front-end symbol table
//! - `expand`: type-alias expansion
//! - `approximate`: supertype approximation of captured types
//! - `recursion`: cycle and depth guard shared by the traversals above

pub mod approximate;
pub mod expand;
pub mod intern;
pub mod recursion;
pub mod standard;
pub mod symbols;
pub mod types;

pub use approximate::{ApproximatorConfig, CapturedTypeApproximator, TypeApproximator};
pub use expand::fully_expanded_type;
pub use intern::ConeInterner;
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use standard::{StandardClassIds, BUILTINS_PACKAGE};
pub use symbols::{ClassKind, ClassifierDecl, FrontSymbol, FrontSymbolTable, TypeParamDecl};
pub use types::*;
