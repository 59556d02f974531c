use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use ormtype_codegen::snapshot::SnapshotSource;
use ormtype_manifest::{EnumStyle, GenerationConfig, WriterKind};

use super::{UnwrapOrExit, config_dir, load_config};
use crate::{
    ops::{self, generate::EmitOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Only generate this model (short or qualified class name)
    pub model: Option<String>,

    /// Path to ormtype.toml
    #[arg(short, long, default_value = "ormtype.toml")]
    pub config: PathBuf,

    /// Output directory (overrides output.path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Writer to use: interface, type or json
    #[arg(long)]
    pub writer: Option<WriterKind>,

    /// Enum style: const_object, ts_enum or union
    #[arg(long)]
    pub enum_style: Option<EnumStyle>,

    /// Wrap declarations in `declare namespace <NAME>`
    #[arg(long, value_name = "NAME")]
    pub global: Option<String>,

    /// Pluralize model type names
    #[arg(long)]
    pub plurals: bool,

    /// Emit <Model>Resource and <Model>Collection wrappers
    #[arg(long)]
    pub api_resources: bool,

    /// Emit a type with each model's fillable attributes
    #[arg(long)]
    pub fillables: bool,

    /// Suffix for fillable type names
    #[arg(long, value_name = "SUFFIX")]
    pub fillable_suffix: Option<String>,

    /// Skip relations
    #[arg(long)]
    pub no_relations: bool,

    /// Mark relations optional
    #[arg(long)]
    pub optional_relations: bool,

    /// Skip `<relation>_count` properties
    #[arg(long)]
    pub no_counts: bool,

    /// Mark `<relation>_count` properties optional
    #[arg(long)]
    pub optional_counts: bool,

    /// Skip `<relation>_exists` properties
    #[arg(long)]
    pub no_exists: bool,

    /// Mark `<relation>_exists` properties optional
    #[arg(long)]
    pub optional_exists: bool,

    /// Skip `<relation>_sum_<column>` properties
    #[arg(long)]
    pub no_sums: bool,

    /// Mark `<relation>_sum_<column>` properties optional
    #[arg(long)]
    pub optional_sums: bool,

    /// Leave hidden attributes out entirely
    #[arg(long)]
    pub no_hidden: bool,

    /// Type timestamp columns as Date
    #[arg(long)]
    pub timestamps_as_date: bool,

    /// Mark nullable columns optional
    #[arg(long)]
    pub optional_nullables: bool,

    /// Introspect every model through this connection
    #[arg(long)]
    pub connection: Option<String>,

    /// Abort on the first model that fails
    #[arg(long)]
    pub strict: bool,

    /// Skip the external formatter
    #[arg(long)]
    pub no_format: bool,

    /// Print the output instead of writing files
    #[arg(long)]
    pub stdout: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let config = self.apply(load_config(&self.config).unwrap_or_exit());
        let source = SnapshotSource::load_relative(&config.discovery, &config_dir(&self.config))
            .unwrap_or_exit();

        let result = ops::generate(source, &config).unwrap_or_exit();
        let report = ops::emit(
            result,
            &config,
            EmitOptions {
                stdout: self.stdout,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    /// Layer command-line flags over the file configuration.
    ///
    /// Boolean flags only ever switch a setting on (or off for `--no-*`);
    /// an absent flag keeps the file value.
    fn apply(&self, mut config: GenerationConfig) -> GenerationConfig {
        if let Some(model) = &self.model {
            config.discovery.only = Some(model.clone());
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }

        let writer = &mut config.writer;
        if let Some(kind) = self.writer {
            writer.default = kind;
        }
        if let Some(style) = self.enum_style {
            writer.enum_style = style;
        }
        if let Some(namespace) = &self.global {
            writer.global_namespace = Some(namespace.clone());
        }
        writer.plurals |= self.plurals;
        writer.api_resources |= self.api_resources;
        writer.fillable_types |= self.fillables;
        if let Some(suffix) = &self.fillable_suffix {
            writer.fillable_suffix = suffix.clone();
        }

        let relations = &mut config.relations;
        relations.enabled &= !self.no_relations;
        relations.optional |= self.optional_relations;
        relations.counts.enabled &= !self.no_counts;
        relations.counts.optional |= self.optional_counts;
        relations.exists.enabled &= !self.no_exists;
        relations.exists.optional |= self.optional_exists;
        relations.sums.enabled &= !self.no_sums;
        relations.sums.optional |= self.optional_sums;

        config.visibility.include_hidden &= !self.no_hidden;
        config.visibility.optional_nullables |= self.optional_nullables;
        config.mappings.timestamps_as_date |= self.timestamps_as_date;

        if let Some(connection) = &self.connection {
            config.introspection.connection = Some(connection.clone());
        }
        config.pipeline.bail_on_error |= self.strict;
        config.formatter.enabled &= !self.no_format;

        config
    }
}
