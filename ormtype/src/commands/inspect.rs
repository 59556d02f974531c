use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use ormtype_codegen::snapshot::SnapshotSource;

use super::{UnwrapOrExit, config_dir, load_config};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct InspectCommand {
    /// Model to inspect (short or qualified class name)
    pub model: String,

    /// Path to ormtype.toml
    #[arg(short, long, default_value = "ormtype.toml")]
    pub config: PathBuf,

    /// Print the extracted metadata as JSON
    #[arg(long)]
    pub json: bool,
}

impl InspectCommand {
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.config).unwrap_or_exit();
        let source = SnapshotSource::load_relative(&config.discovery, &config_dir(&self.config))
            .unwrap_or_exit();

        let report = ops::inspect(&source, &config, &self.model, self.json)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
