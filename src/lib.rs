//! tylo: lowering of resolved front-end types into back-end IR types.
//!
//! The work happens in the member crates, re-exported here:
//!
//! - [`common`]: string interning and recursion limits
//! - [`front`]: the resolved type model, symbol table, alias expansion and
//!   captured-type approximation
//! - [`ir`]: IR types, IR symbols and the built-in symbols
//! - [`lowering`]: the lowering engine
//!
//! ```ignore
//! use tylo::lowering::{ConversionTypeContext, LoweringSession};
//!
//! let session = LoweringSession::default();
//! let string = session.db.class_type(session.standard.string, vec![], true);
//! let ir = session.with_converter(|c| c.lower_type(string, ConversionTypeContext::DEFAULT));
//! assert_eq!(session.render(&ir), "lang/String?");
//! ```

pub use tylo_common as common;
pub use tylo_front as front;
pub use tylo_ir as ir;
pub use tylo_lowering as lowering;

pub mod tracing_config;
