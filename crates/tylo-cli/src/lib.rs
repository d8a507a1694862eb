//! Debug driver for the tylo type-lowering engine.
//!
//! `tylo-lower` reads a JSON fixture describing a small type universe,
//! lowers every listed type and prints the results.

pub mod args;
pub mod driver;
pub mod fixture;
