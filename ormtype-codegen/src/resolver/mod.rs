//! Type, enum and relation resolution.
//!
//! - [`TypeResolver`] - Column and accessor precedence chains
//! - [`build_enum`] - Portable enum definitions from enum declarations
//! - [`RelationResolver`] - Relation type shapes and circular-reference detection

mod enums;
mod relations;
mod types;

pub use enums::{build_enum, clean_doc};
pub use relations::{RelationResolver, derived_counts, derived_exists, derived_sums};
pub use types::{CAST_TYPES, ENUM_COLLECTION_CASTS, RETURN_TYPES, ResolverContext, TypeResolver};
