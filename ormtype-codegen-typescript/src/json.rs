//! JSON writer for tooling that consumes generated shapes programmatically.

use eyre::{Result, WrapErr};
use indexmap::IndexMap;
use ormtype_codegen::adapters::{Writer, WriterOptions};
use ormtype_core::{
    BackingType, EnumDefinition, EnumValue, GenerationResult, ModelGenerationResult, Property,
    Section, WriterOutput,
};
use serde::Serialize;

#[derive(Serialize)]
struct Document<'a> {
    models: Vec<ModelEntry<'a>>,
    enums: Vec<EnumEntry<'a>>,
    warnings: &'a [String],
}

#[derive(Serialize)]
struct ModelEntry<'a> {
    name: &'a str,
    class: &'a str,
    properties: Vec<PropertyEntry<'a>>,
    relations: Vec<RelationEntry<'a>>,
    counts: Vec<DerivedEntry<'a>>,
    exists: Vec<DerivedEntry<'a>>,
    sums: Vec<DerivedEntry<'a>>,
    fillable: &'a [String],
}

#[derive(Serialize)]
struct PropertyEntry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ts_type: &'a str,
    optional: bool,
    section: Section,
}

#[derive(Serialize)]
struct RelationEntry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ts_type: &'a str,
    optional: bool,
    circular: bool,
}

#[derive(Serialize)]
struct DerivedEntry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ts_type: &'a str,
    optional: bool,
}

#[derive(Serialize)]
struct EnumEntry<'a> {
    name: &'a str,
    class: &'a str,
    backing_type: BackingType,
    cases: &'a IndexMap<String, EnumValue>,
    comments: &'a IndexMap<String, String>,
}

fn derived(properties: &[Property]) -> Vec<DerivedEntry<'_>> {
    properties
        .iter()
        .map(|p| DerivedEntry {
            name: &p.name,
            ts_type: &p.ts_type,
            optional: p.optional,
        })
        .collect()
}

impl<'a> From<&'a ModelGenerationResult> for ModelEntry<'a> {
    fn from(model: &'a ModelGenerationResult) -> Self {
        Self {
            name: &model.short_name,
            class: &model.qualified_name,
            properties: model
                .properties
                .iter()
                .map(|p| PropertyEntry {
                    name: &p.name,
                    ts_type: &p.ts_type,
                    optional: p.optional,
                    section: p.section,
                })
                .collect(),
            relations: model
                .relations
                .iter()
                .map(|r| RelationEntry {
                    name: &r.name,
                    ts_type: &r.ts_type,
                    optional: r.optional,
                    circular: r.circular,
                })
                .collect(),
            counts: derived(&model.counts),
            exists: derived(&model.exists),
            sums: derived(&model.sums),
            fillable: &model.fillable,
        }
    }
}

impl<'a> From<&'a EnumDefinition> for EnumEntry<'a> {
    fn from(def: &'a EnumDefinition) -> Self {
        Self {
            name: &def.short_name,
            class: &def.name,
            backing_type: def.backing,
            cases: &def.cases,
            comments: &def.comments,
        }
    }
}

/// Writes the whole result as one pretty-printed JSON document on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Writer for JsonWriter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, result: &GenerationResult, _options: &WriterOptions) -> Result<WriterOutput> {
        let document = Document {
            models: result.models.iter().map(ModelEntry::from).collect(),
            enums: result.enums.iter().map(EnumEntry::from).collect(),
            warnings: &result.warnings,
        };
        let json = serde_json::to_string_pretty(&document).wrap_err("failed to serialize result")?;
        Ok(WriterOutput::stdout(json))
    }
}
