//! Output writer abstraction.

use eyre::Result;
use indexmap::IndexMap;
use ormtype_core::{Case, GenerationResult, WriterOutput};
use ormtype_manifest::{EnumStyle, GenerationConfig, WriterKind};

use crate::builder::Indent;

/// Everything a writer needs to know about packaging and naming.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    pub kind: WriterKind,
    pub enum_style: EnumStyle,
    /// Wrap the bundle in `declare namespace <name> { ... }`
    pub global_namespace: Option<String>,
    pub plurals: bool,
    pub api_resources: bool,
    pub fillable_types: bool,
    pub fillable_suffix: String,
    pub column_case: Case,
    pub relation_case: Case,
    pub indent: Indent,
    pub per_model_files: bool,
    pub barrel_export: bool,
    pub enum_directory: String,
    pub single_file_name: String,
    /// Type aliases emitted verbatim ahead of the models
    pub standalone: IndexMap<String, String>,
}

impl WriterOptions {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            kind: config.writer.default,
            enum_style: config.writer.enum_style,
            global_namespace: config.writer.global_namespace.clone(),
            plurals: config.writer.plurals,
            api_resources: config.writer.api_resources,
            fillable_types: config.writer.fillable_types,
            fillable_suffix: config.writer.fillable_suffix.clone(),
            column_case: config.case.columns,
            relation_case: config.case.relations,
            indent: Indent::spaces(config.output.indent),
            per_model_files: config.output.per_model_files,
            barrel_export: config.output.barrel_export,
            enum_directory: config.output.enum_directory.clone(),
            single_file_name: config.output.single_file_name.clone(),
            standalone: config.mappings.standalone.clone(),
        }
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}

/// Serializes a [`GenerationResult`] into files or a single text blob.
pub trait Writer {
    fn name(&self) -> &'static str;

    /// File extension of the produced output, without the dot.
    fn extension(&self) -> &'static str;

    fn write(&self, result: &GenerationResult, options: &WriterOptions) -> Result<WriterOutput>;
}

impl<T: Writer + ?Sized> Writer for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn extension(&self) -> &'static str {
        (**self).extension()
    }

    fn write(&self, result: &GenerationResult, options: &WriterOptions) -> Result<WriterOutput> {
        (**self).write(result, options)
    }
}
