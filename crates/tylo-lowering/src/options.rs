//! Lowering configuration.

use serde::{Deserialize, Serialize};
use tylo_front::ApproximatorConfig;

/// Options of a lowering session.
///
/// Deserialized from camelCase JSON; missing fields take their defaults:
///
/// ```json
/// { "capturedArgumentApproximation": "publicDeclaration" }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoweringOptions {
    /// Approximation requested for arguments that refer to a captured type
    /// already being lowered.
    pub captured_argument_approximation: ApproximatorConfig,
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
