//! Generated sources for annotated types
//!
//! Each annotated type in the scanned files gets one
//! `<snake_case_name>_generated.rs` holding the items the macros would
//! expand to, formatted for reading and checking in.

use crate::emit;
use crate::manifest::Manifest;
use anyhow::{Context, Result};
use blueprint_codegen::naming::to_snake_case;
use blueprint_codegen::{GeneratorOptions, scan};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Generated source of one annotated type
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub type_name: String,
    pub file_name: String,
    pub contents: String,
}

/// Result of generating from one source text
#[derive(Debug, Default)]
pub struct SourceOutput {
    pub files: Vec<GeneratedFile>,
    /// One message per type whose analysis failed
    pub failures: Vec<String>,
}

/// Files written by a whole generation run
#[derive(Debug, Default)]
pub struct Report {
    pub written: Vec<PathBuf>,
    pub failures: Vec<String>,
}

/// Name of the generated file for a type
pub fn file_name(type_name: &str) -> String {
    format!("{}_generated.rs", to_snake_case(type_name))
}

/// Generate from source text. `origin` only labels the generated header.
pub fn generate_source(
    source: &str,
    origin: &str,
    options: &GeneratorOptions,
) -> Result<SourceOutput> {
    let items = scan::scan_source(source).context("Failed to parse Rust source")?;
    let mut output = SourceOutput::default();

    for item in &items {
        let type_name = item.ident().to_string();
        match item.expand(options) {
            Ok(tokens) => {
                let contents = emit::render(tokens, origin)
                    .with_context(|| format!("Failed to render {type_name}"))?;
                output.files.push(GeneratedFile {
                    file_name: file_name(&type_name),
                    type_name,
                    contents,
                });
            }
            Err(err) => {
                tracing::debug!(type_name = %type_name, "analysis failed");
                output.failures.push(format!("{origin}: {type_name}: {err}"));
            }
        }
    }

    Ok(output)
}

/// Generate every input into `output_dir`, continuing past failed types.
pub fn generate_files(
    inputs: &[PathBuf],
    output_dir: &Path,
    options: &GeneratorOptions,
) -> Result<Report> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let mut report = Report::default();
    let mut seen = HashSet::new();

    for input in inputs {
        let source = fs::read_to_string(input)
            .with_context(|| format!("Failed to read source file: {}", input.display()))?;
        let origin = input.display().to_string();

        let output = generate_source(&source, &origin, options)
            .with_context(|| format!("Failed to process {}", input.display()))?;
        if output.files.is_empty() && output.failures.is_empty() {
            tracing::warn!(input = %origin, "no annotated items found");
        }

        for file in output.files {
            if !seen.insert(file.file_name.clone()) {
                tracing::warn!(file = %file.file_name, "overwriting output of an earlier input");
            }
            let path = output_dir.join(&file.file_name);
            fs::write(&path, &file.contents)
                .with_context(|| format!("Failed to write generated file: {}", path.display()))?;
            tracing::info!(type_name = %file.type_name, path = %path.display(), "generated");
            report.written.push(path);
        }
        report.failures.extend(output.failures);
    }

    Ok(report)
}

/// Generate command implementation
pub fn run(inputs: &[PathBuf], output: Option<PathBuf>, manifest: &Manifest) -> Result<()> {
    let output_dir = output.unwrap_or_else(|| manifest.generator.output.clone());

    let report = generate_files(inputs, &output_dir, &manifest.generator.options)?;

    for path in &report.written {
        println!("Generated: {}", path.display());
    }

    if !report.failures.is_empty() {
        for failure in &report.failures {
            eprintln!("error: {failure}");
        }
        anyhow::bail!(
            "{} type(s) could not be generated",
            report.failures.len()
        );
    }

    println!(
        "\n{} file(s) written to {}",
        report.written.len(),
        output_dir.display()
    );

    Ok(())
}
