//! Collaborator abstractions consumed by the generation pipeline.
//!
//! The pipeline never reflects over models or talks to a database itself.
//! Everything outside the core is reached through these traits, so a
//! different model source only needs new implementations, not a new
//! pipeline.
//!
//! # Available Adapters
//!
//! - [`ModelDiscovery`] - Lists the models to generate and hands out their sources
//! - [`EnumCatalog`] - Looks up enum declarations by class name
//! - [`SchemaIntrospector`] - Reads raw columns for one database driver
//! - [`MetadataExtractor`] - Builds [`ModelMetadata`](ormtype_core::ModelMetadata)
//! - [`Formatter`] - Optional external code formatter
//! - [`Writer`] - Serializes a generation result

mod discovery;
mod extraction;
mod formatter;
mod introspection;
mod writer;

pub use discovery::{EnumCatalog, ModelDiscovery};
pub use extraction::MetadataExtractor;
pub use formatter::{CommandFormatter, Formatter, NullFormatter};
pub use introspection::{IntrospectorRegistry, SchemaIntrospector};
pub use writer::{Writer, WriterOptions};
