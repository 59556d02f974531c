//! Core data model and utilities for the ormtype generator.
//!
//! This crate holds the neutral shapes every other ormtype crate speaks:
//! raw columns and model metadata coming in, resolved properties, relations
//! and enums going out, plus the database type mapper registry.

mod data;
mod file;
mod type_mapper;
mod utils;

pub use data::{
    AccessorDefinition, AccessorStyle, BackingType, ColumnDefinition, EnumDefinition, EnumValue,
    GenerationResult, ModelGenerationResult, ModelMetadata, ModelReference, Property, Provenance,
    RawColumn, RelationDefinition, RelationKind, ResolvedRelation, Section, TypeResult,
    WriterOutput,
};
pub use file::{GENERATED_MARKER, OutputWriter, WriteResult};
pub use type_mapper::{DefaultTypeMapper, TableTypeMapper, TypeMapper, TypeMapperRegistry};
pub use utils::{Case, class_basename, pluralize, toml_value_to_string};

/// Sentinel type emitted whenever a type cannot be resolved.
pub const UNKNOWN_TYPE: &str = "unknown";
