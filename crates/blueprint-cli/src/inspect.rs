//! JSON view of the analyzed types of a source file

use crate::manifest::Manifest;
use anyhow::{Context, Result};
use blueprint_codegen::{GeneratorOptions, TypeSummary, scan};
use std::path::Path;

/// Summaries of the annotated types in one source text
#[derive(Debug, Default)]
pub struct Inspection {
    pub types: Vec<TypeSummary>,
    pub failures: Vec<String>,
}

pub fn inspect_source(source: &str, options: &GeneratorOptions) -> Result<Inspection> {
    let items = scan::scan_source(source).context("Failed to parse Rust source")?;
    let mut inspection = Inspection::default();

    for item in &items {
        match item.analyze(options) {
            Ok(info) => inspection.types.push(info.summary()),
            Err(err) => inspection.failures.push(format!("{}: {err}", item.ident())),
        }
    }

    Ok(inspection)
}

/// Inspect command implementation
pub fn run(input: &Path, manifest: &Manifest) -> Result<()> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read source file: {}", input.display()))?;

    let inspection = inspect_source(&source, &manifest.generator.options)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    let json = serde_json::to_string_pretty(&inspection.types)
        .context("Failed to serialize type information")?;
    println!("{json}");

    if !inspection.failures.is_empty() {
        for failure in &inspection.failures {
            eprintln!("error: {failure}");
        }
        anyhow::bail!(
            "{} type(s) could not be analyzed",
            inspection.failures.len()
        );
    }

    Ok(())
}
