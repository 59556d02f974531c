use serde::{Deserialize, Serialize};

use super::EnumDefinition;
use crate::UNKNOWN_TYPE;

/// Which resolution rule produced a type. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Override,
    EnumCast,
    Accessor,
    Cast,
    DbType,
    CustomMapping,
    Unknown,
    CircularRef,
    ShallowRef,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Override => "override",
            Provenance::EnumCast => "enum_cast",
            Provenance::Accessor => "accessor",
            Provenance::Cast => "cast",
            Provenance::DbType => "db_type",
            Provenance::CustomMapping => "custom_mapping",
            Provenance::Unknown => "unknown",
            Provenance::CircularRef => "circular_ref",
            Provenance::ShallowRef => "shallow_ref",
        }
    }
}

/// Outcome of resolving one column or accessor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeResult {
    pub ts_type: String,
    pub nullable: bool,
    pub optional: bool,
    pub enum_def: Option<EnumDefinition>,
    pub provenance: Provenance,
}

impl TypeResult {
    pub fn new(ts_type: impl Into<String>, nullable: bool, provenance: Provenance) -> Self {
        Self {
            ts_type: ts_type.into(),
            nullable,
            optional: false,
            enum_def: None,
            provenance,
        }
    }

    pub fn unknown(nullable: bool) -> Self {
        Self::new(UNKNOWN_TYPE, nullable, Provenance::Unknown)
    }

    pub fn simple(ts_type: impl Into<String>, nullable: bool, provenance: Provenance) -> Self {
        Self::new(ts_type, nullable, provenance)
    }

    pub fn array(item: &str, nullable: bool, provenance: Provenance) -> Self {
        Self::new(format!("{}[]", item), nullable, provenance)
    }

    pub fn circular_reference(model: &str) -> Self {
        Self::new(model, false, Provenance::CircularRef)
    }

    pub fn shallow_reference(model: &str) -> Self {
        Self::new(model, false, Provenance::ShallowRef)
    }

    pub fn with_enum(mut self, enum_def: EnumDefinition) -> Self {
        self.enum_def = Some(enum_def);
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Type text including the ` | null` suffix for nullable results.
    pub fn to_type_string(&self) -> String {
        if self.nullable {
            format!("{} | null", self.ts_type)
        } else {
            self.ts_type.clone()
        }
    }
}
