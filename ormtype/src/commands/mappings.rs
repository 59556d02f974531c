use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{UnwrapOrExit, load_config};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct MappingsCommand {
    /// Path to ormtype.toml
    #[arg(short, long, default_value = "ormtype.toml")]
    pub config: PathBuf,
}

impl MappingsCommand {
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.config).unwrap_or_exit();

        ops::mappings(&config).render(&mut TerminalOutput::new());
        Ok(())
    }
}
