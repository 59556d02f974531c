//! Collaborators backed by schema snapshot files.
//!
//! A snapshot (TOML or JSON) records what reflection over the ORM models
//! and their database would have produced. [`SnapshotSource`] serves as
//! discovery, metadata extractor and enum catalog at once; the
//! introspectors here normalise its raw column types.

mod introspectors;
mod source;

pub use introspectors::{FallbackSchemaIntrospector, SqlSchemaIntrospector, normalize_type};
pub use source::SnapshotSource;
