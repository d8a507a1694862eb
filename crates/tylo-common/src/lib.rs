//! Common types and utilities for the tylo workspace.
//!
//! This crate provides foundational pieces used across all tylo crates:
//! - Name interning (`Atom`, `NameInterner`)
//! - Centralized limits and thresholds

// String interning for classifier names
pub mod interner;
pub use interner::{Atom, NameInterner};

// Centralized limits and thresholds
pub mod limits;

/// Package that holds the built-in classifiers, e.g. `lang/Int`.
pub const BUILTINS_PACKAGE: &str = "lang";
