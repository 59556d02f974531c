//! Neutral metadata and result records.
//!
//! Everything here is produced once per generation run and read many times;
//! nothing is mutated after construction.

mod columns;
mod enums;
mod generation;
mod model;
mod relations;
mod types;

pub use columns::{AccessorDefinition, AccessorStyle, ColumnDefinition};
pub use enums::{BackingType, EnumDefinition, EnumValue};
pub use generation::{GenerationResult, ModelGenerationResult, Property, Section, WriterOutput};
pub use model::{ModelMetadata, ModelReference, RawColumn};
pub use relations::{RelationDefinition, RelationKind, ResolvedRelation};
pub use types::{Provenance, TypeResult};
