// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod kinds;
mod snapshot;
mod validate;

pub use config::{
    CaseConfig, ConnectionConfig, DatabaseConfig, DiscoveryConfig, FormatterConfig,
    GenerationConfig, IntrospectionConfig, MappingsConfig, OutputConfig, PipelineConfig,
    RelationsConfig, Toggle, VisibilityConfig, WriterConfig,
};
pub use error::{Error, Result};
pub use kinds::{EnumStyle, FormatterTool, WriterKind};
pub use snapshot::{
    AccessorSource, ColumnSource, EnumCaseSource, EnumSource, ModelSource, RelationSource,
    Snapshot,
};
