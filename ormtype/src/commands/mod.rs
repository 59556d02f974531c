mod completions;
mod generate;
mod inspect;
mod mappings;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use inspect::InspectCommand;
use mappings::MappingsCommand;
use ormtype_codegen::pipeline::PipelineError;
use ormtype_manifest::GenerationConfig;
use tracing::debug;

/// Extension trait for exiting on diagnostic errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for ormtype_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for std::result::Result<T, PipelineError> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

/// Load ormtype.toml, falling back to defaults when the file does not exist.
pub(crate) fn load_config(path: &Path) -> ormtype_manifest::Result<GenerationConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(GenerationConfig::default());
    }
    GenerationConfig::from_file(path)
}

/// Directory snapshot paths in the config are resolved against.
pub(crate) fn config_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[derive(Parser)]
#[command(name = "ormtype")]
#[command(version)]
#[command(about = "Generate TypeScript types from ORM models")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Mappings(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript definitions from the schema snapshots
    Generate(GenerateCommand),

    /// Show how database types map to TypeScript
    Mappings(MappingsCommand),

    /// Show the metadata extracted for one model
    Inspect(InspectCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
