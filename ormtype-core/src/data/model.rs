use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{AccessorDefinition, ColumnDefinition, RelationDefinition};

/// Identity of a discovered model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReference {
    pub qualified_name: String,
    pub short_name: String,
    pub file_path: Option<String>,
    pub connection: Option<String>,
}

impl ModelReference {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            short_name: crate::class_basename(&qualified_name).to_string(),
            qualified_name,
            file_path: None,
            connection: None,
        }
    }

    /// True when `name` equals either the short or the qualified name.
    pub fn matches(&self, name: &str) -> bool {
        self.short_name == name || self.qualified_name == name
    }
}

/// Column as reported by schema introspection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,
    /// Canonical type
    pub db_type: String,
    /// Type string as the database reports it
    pub raw_type: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub auto_increment: bool,
    pub unique: bool,
}

impl RawColumn {
    pub fn new(name: impl Into<String>, db_type: impl Into<String>) -> Self {
        let db_type = db_type.into();
        Self {
            name: name.into(),
            raw_type: db_type.clone(),
            db_type,
            ..Default::default()
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Everything known about a single model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub qualified_name: String,
    pub short_name: String,
    pub table: String,
    pub connection: Option<String>,
    pub primary_key: String,
    pub key_type: String,
    pub incrementing: bool,
    pub columns: Vec<ColumnDefinition>,
    pub accessors: Vec<AccessorDefinition>,
    pub relations: Vec<RelationDefinition>,
    pub casts: IndexMap<String, String>,
    pub hidden: Vec<String>,
    pub visible: Vec<String>,
    pub fillable: Vec<String>,
    pub guarded: Vec<String>,
    pub appends: Vec<String>,
    pub timestamps: bool,
    /// Forced types keyed by property name
    pub interfaces: IndexMap<String, String>,
    /// Relation name to summed column
    pub sums: IndexMap<String, String>,
}

impl ModelMetadata {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            short_name: crate::class_basename(&qualified_name).to_string(),
            qualified_name,
            primary_key: "id".to_string(),
            key_type: "int".to_string(),
            incrementing: true,
            ..Default::default()
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }
}
