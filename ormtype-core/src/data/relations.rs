use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of relation kinds a model may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
    HasOneThrough,
    HasManyThrough,
    BelongsToMany,
    MorphOne,
    MorphMany,
    MorphToMany,
    MorphedByMany,
    MorphTo,
}

impl RelationKind {
    pub const ALL: [RelationKind; 11] = [
        RelationKind::BelongsTo,
        RelationKind::HasOne,
        RelationKind::HasMany,
        RelationKind::HasOneThrough,
        RelationKind::HasManyThrough,
        RelationKind::BelongsToMany,
        RelationKind::MorphOne,
        RelationKind::MorphMany,
        RelationKind::MorphToMany,
        RelationKind::MorphedByMany,
        RelationKind::MorphTo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "BelongsTo",
            RelationKind::HasOne => "HasOne",
            RelationKind::HasMany => "HasMany",
            RelationKind::HasOneThrough => "HasOneThrough",
            RelationKind::HasManyThrough => "HasManyThrough",
            RelationKind::BelongsToMany => "BelongsToMany",
            RelationKind::MorphOne => "MorphOne",
            RelationKind::MorphMany => "MorphMany",
            RelationKind::MorphToMany => "MorphToMany",
            RelationKind::MorphedByMany => "MorphedByMany",
            RelationKind::MorphTo => "MorphTo",
        }
    }

    /// Kinds resolving to an array of the related model. These are also the
    /// kinds that produce a `<name>_count` property.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            RelationKind::BelongsToMany
                | RelationKind::HasMany
                | RelationKind::HasManyThrough
                | RelationKind::MorphToMany
                | RelationKind::MorphMany
                | RelationKind::MorphedByMany
        )
    }

    /// Kinds that produce a `<name>_exists` property.
    pub fn is_existable(&self) -> bool {
        matches!(
            self,
            RelationKind::HasOne
                | RelationKind::HasMany
                | RelationKind::HasOneThrough
                | RelationKind::HasManyThrough
                | RelationKind::BelongsTo
                | RelationKind::BelongsToMany
                | RelationKind::MorphOne
                | RelationKind::MorphMany
                | RelationKind::MorphToMany
        )
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = String;

    /// Accepts `HasMany`, `hasMany`, `has_many` and `has-many`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        RelationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| format!("unknown relation kind: {}", s))
    }
}

impl Serialize for RelationKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RelationKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A relation as declared on the source model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationDefinition {
    pub name: String,
    pub kind: RelationKind,
    /// Qualified related class, or a pre-formatted union for `MorphTo`
    pub related: String,
    pub related_short: String,
    pub nullable: bool,
    pub is_collection: bool,
}

impl RelationDefinition {
    pub fn new(name: impl Into<String>, kind: RelationKind, related: impl Into<String>) -> Self {
        let related = related.into();
        Self {
            name: name.into(),
            kind,
            related_short: crate::class_basename(&related).to_string(),
            related,
            nullable: false,
            is_collection: kind.is_collection(),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Display-ready relation produced by the relation resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRelation {
    pub name: String,
    pub ts_type: String,
    pub optional: bool,
    pub circular: bool,
    pub warning: Option<String>,
}
