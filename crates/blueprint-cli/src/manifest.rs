//! Manifest parsing and validation

use anyhow::{Context, Result};
use blueprint_codegen::GeneratorOptions;
use blueprint_logging::Level;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest looked up in the working directory when none is given
pub const DEFAULT_MANIFEST: &str = "blueprint.toml";

/// blueprint.toml manifest structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub generator: GeneratorSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    /// Directory receiving the generated sources
    pub output: PathBuf,

    #[serde(flatten)]
    pub options: GeneratorOptions,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            output: PathBuf::from("target/generated"),
            options: GeneratorOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default level, overridden by `RUST_LOG`
    pub level: Level,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: Level::Information,
        }
    }
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
            .with_context(|| format!("Invalid manifest: {:?}", path.as_ref()))
    }

    /// Parse manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Load the given manifest, or `blueprint.toml` if present, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let manifest = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_MANIFEST).is_file() => Self::from_file(DEFAULT_MANIFEST)?,
            None => Self::default(),
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        let options = &self.generator.options;

        if self.generator.output.as_os_str().is_empty() {
            anyhow::bail!("Generator output directory cannot be empty");
        }

        for (key, suffix) in [
            ("builder_suffix", &options.builder_suffix),
            ("subclass_suffix", &options.subclass_suffix),
        ] {
            if !is_valid_suffix(suffix) {
                anyhow::bail!(
                    "{key} '{suffix}' must be a non-empty identifier tail (letters, digits, '_')"
                );
            }
        }

        if options.builder_suffix == options.subclass_suffix {
            anyhow::bail!(
                "builder_suffix and subclass_suffix are both '{}'; generated names would collide",
                options.builder_suffix
            );
        }

        Ok(())
    }
}

/// Whether the suffix can be appended to an identifier
fn is_valid_suffix(suffix: &str) -> bool {
    !suffix.is_empty() && suffix.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Check command implementation
pub fn check(manifest_path: Option<PathBuf>) -> Result<()> {
    let path = manifest_path.unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));

    println!("Checking manifest: {}", path.display());

    let manifest = Manifest::from_file(&path)?;
    manifest.validate()?;

    let options = &manifest.generator.options;
    println!("✓ Output: {}", manifest.generator.output.display());
    println!(
        "✓ Suffixes: builder '{}', subclass '{}'",
        options.builder_suffix, options.subclass_suffix
    );
    println!(
        "✓ Generators: builders {}, representing {}, converters {}",
        options.builders, options.representing, options.converters
    );
    println!("✓ Logging: {}", manifest.logging.level);
    println!("\nManifest is valid!");

    Ok(())
}
