//! blueprint CLI - Generated sources from annotated Rust files
//!
//! Commands:
//! - `blueprint generate` - Write the generated items of each annotated type
//! - `blueprint inspect` - Print the analyzed types as JSON
//! - `blueprint check` - Validate a blueprint.toml manifest

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod emit;
mod generate;
mod inspect;
mod manifest;

#[derive(Parser)]
#[command(name = "blueprint")]
#[command(author, version, about = "Generated sources for blueprint builders and subclasses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one `<name>_generated.rs` per annotated type
    Generate {
        /// Rust source files to scan
        #[arg(short, long = "input", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Output directory (default: `generator.output` of the manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to blueprint.toml
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Print the analyzed types of a source file as JSON
    Inspect {
        /// Rust source file to scan
        #[arg(short, long)]
        input: PathBuf,

        /// Path to blueprint.toml
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Validate a blueprint.toml manifest
    Check {
        /// Path to blueprint.toml (default: ./blueprint.toml)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            inputs,
            output,
            manifest: manifest_path,
        } => {
            let manifest = manifest::Manifest::load(manifest_path.as_deref())?;
            blueprint_logging::init_logging(manifest.logging.level);
            generate::run(&inputs, output, &manifest)?;
        }
        Commands::Inspect {
            input,
            manifest: manifest_path,
        } => {
            let manifest = manifest::Manifest::load(manifest_path.as_deref())?;
            blueprint_logging::init_logging(manifest.logging.level);
            inspect::run(&input, &manifest)?;
        }
        Commands::Check { manifest } => {
            manifest::check(manifest)?;
        }
    }

    Ok(())
}
