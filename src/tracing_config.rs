//! Logging for the lowering tools.
//!
//! `TYLO_LOG` takes an `EnvFilter` directive (falling back to `RUST_LOG`);
//! `TYLO_LOG_FORMAT` picks `text`, `tree` or `json`. With neither variable
//! set no subscriber is installed.
//!
//! ```bash
//! TYLO_LOG=tylo_lowering::convert=trace TYLO_LOG_FORMAT=tree tylo-lower fixture.json
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    /// Indented span tree (`tracing-tree`).
    Tree,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Case-insensitive; anything unrecognized is `Text`.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

fn filter_from_env() -> Option<EnvFilter> {
    match std::env::var("TYLO_LOG") {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if std::env::var("RUST_LOG").is_ok() => Some(EnvFilter::from_default_env()),
        Err(_) => None,
    }
}

/// Install the global subscriber, writing to stderr. Stdout is left to the
/// lowered types.
pub fn init_tracing() {
    let Some(filter) = filter_from_env() else {
        return;
    };
    let format = LogFormat::parse(&std::env::var("TYLO_LOG_FORMAT").unwrap_or_default());

    match format {
        LogFormat::Tree => {
            let layer = tracing_tree::HierarchicalLayer::new(2)
                .with_indent_lines(true)
                .with_targets(true)
                .with_deferred_spans(true);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
    }
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tests;
