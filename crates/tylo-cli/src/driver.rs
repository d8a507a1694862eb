//! Lowering of a loaded fixture and rendering of the results.

use crate::args::{CliArgs, OutputFormat};
use crate::fixture::{FixtureEntry, LoadedFixture, load_fixture};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use tylo::ir::IrType;

/// One lowered fixture entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoweredEntry {
    pub name: String,
    pub ty: IrType,
    pub rendered: String,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    rendered: &'a str,
    ir: &'a IrType,
}

/// Lower every entry of `loaded`, in fixture order.
///
/// All entries share one converter, so classifier symbols materialized for
/// one entry are reused by the others.
pub fn lower_all(loaded: &LoadedFixture, parallel: bool) -> Vec<LoweredEntry> {
    let session = &loaded.session;
    session.with_converter(|converter| {
        let lower = |entry: &FixtureEntry| {
            let ty = converter.lower_type_ref(&entry.type_ref, entry.context);
            LoweredEntry {
                name: entry.name.clone(),
                rendered: session.render(&ty),
                ty,
            }
        };
        if parallel {
            loaded.entries.par_iter().map(lower).collect()
        } else {
            loaded.entries.iter().map(lower).collect()
        }
    })
}

pub fn render(entries: &[LoweredEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for entry in entries {
                out.push_str(&entry.name);
                out.push_str(": ");
                out.push_str(&entry.rendered);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let json: Vec<JsonEntry<'_>> = entries
                .iter()
                .map(|entry| JsonEntry {
                    name: &entry.name,
                    rendered: &entry.rendered,
                    ir: &entry.ty,
                })
                .collect();
            let mut out =
                serde_json::to_string_pretty(&json).context("failed to serialize lowered types")?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Load, lower and render the fixture named by `args`.
pub fn run(args: &CliArgs) -> Result<String> {
    let loaded = load_fixture(&args.fixture)?;
    let entries = lower_all(&loaded, args.parallel);
    info!(
        fixture = %args.fixture.display(),
        entries = entries.len(),
        parallel = args.parallel,
        "lowered fixture"
    );
    render(&entries, args.format)
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
