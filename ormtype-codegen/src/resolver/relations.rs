//! Relation type shapes and derived relation properties.

use ormtype_core::{ModelMetadata, Property, RelationDefinition, RelationKind, ResolvedRelation};
use ormtype_manifest::Toggle;

/// Resolves the relations of one model.
///
/// The visited stack is seeded with the model's short name and is only used
/// for circular-reference flags. Optionality is left to the caller.
#[derive(Debug, Clone)]
pub struct RelationResolver {
    model: String,
    visited: Vec<String>,
}

impl RelationResolver {
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            visited: vec![model.clone()],
            model,
        }
    }

    /// A resolver for a model reached through `ancestors`.
    pub fn with_ancestors(model: impl Into<String>, ancestors: &[String]) -> Self {
        let mut resolver = Self::new(model);
        resolver.visited.splice(0..0, ancestors.iter().cloned());
        resolver
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn resolve(&self, relation: &RelationDefinition) -> ResolvedRelation {
        let warning = relation.name.eq_ignore_ascii_case(&self.model).then(|| {
            format!(
                "Relation '{}' on model '{}' has the same name as the model. This may cause confusion.",
                relation.name, self.model
            )
        });

        let circular = self.visited.iter().any(|v| *v == relation.related_short);

        let mut ts_type = if relation.kind == RelationKind::MorphTo && relation.related.contains('|')
        {
            relation.related.clone()
        } else if relation.kind.is_collection() {
            format!("{}[]", relation.related_short)
        } else {
            relation.related_short.clone()
        };
        if relation.nullable {
            ts_type.push_str(" | null");
        }

        ResolvedRelation {
            name: relation.name.clone(),
            ts_type,
            optional: false,
            circular,
            warning,
        }
    }

    pub fn resolve_all(&self, relations: &[RelationDefinition]) -> Vec<ResolvedRelation> {
        relations.iter().map(|r| self.resolve(r)).collect()
    }
}

/// `<relation>_count` properties for collection relations.
pub fn derived_counts(relations: &[RelationDefinition], toggle: &Toggle) -> Vec<Property> {
    if !toggle.enabled {
        return Vec::new();
    }
    relations
        .iter()
        .filter(|r| r.kind.is_collection())
        .map(|r| Property::new(format!("{}_count", r.name), "number").optional(toggle.optional))
        .collect()
}

/// `<relation>_exists` properties.
pub fn derived_exists(relations: &[RelationDefinition], toggle: &Toggle) -> Vec<Property> {
    if !toggle.enabled {
        return Vec::new();
    }
    relations
        .iter()
        .filter(|r| r.kind.is_existable())
        .map(|r| Property::new(format!("{}_exists", r.name), "boolean").optional(toggle.optional))
        .collect()
}

/// `<relation>_sum_<column>` properties; always nullable.
pub fn derived_sums(metadata: &ModelMetadata, toggle: &Toggle) -> Vec<Property> {
    if !toggle.enabled {
        return Vec::new();
    }
    metadata
        .sums
        .iter()
        .map(|(relation, column)| {
            Property::new(format!("{relation}_sum_{column}"), "number | null")
                .optional(toggle.optional)
        })
        .collect()
}
