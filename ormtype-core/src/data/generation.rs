use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{EnumDefinition, ResolvedRelation};

/// Which block a property is rendered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Columns,
    Mutators,
}

/// A resolved, display-ready property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Full type text, nullable suffix included
    pub ts_type: String,
    pub optional: bool,
    pub section: Section,
}

impl Property {
    pub fn new(name: impl Into<String>, ts_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ts_type: ts_type.into(),
            optional: false,
            section: Section::Columns,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }
}

/// Resolved output bundle for one model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelGenerationResult {
    pub short_name: String,
    pub qualified_name: String,
    pub properties: Vec<Property>,
    pub relations: Vec<ResolvedRelation>,
    pub counts: Vec<Property>,
    pub exists: Vec<Property>,
    pub sums: Vec<Property>,
    pub enums: Vec<EnumDefinition>,
    pub fillable: Vec<String>,
    pub warnings: Vec<String>,
}

impl ModelGenerationResult {
    pub fn properties_in(&self, section: Section) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(move |p| p.section == section)
    }

    /// Short names of related models referenced by the relations.
    pub fn related_models(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for relation in &self.relations {
            for part in relation.ts_type.split('|') {
                let name = part.trim().trim_end_matches("[]");
                if name.is_empty() || name == "null" {
                    continue;
                }
                if name != self.short_name && !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

/// Aggregate over every processed model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub models: Vec<ModelGenerationResult>,
    pub enums: Vec<EnumDefinition>,
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub output: Option<WriterOutput>,
}

impl GenerationResult {
    pub fn model(&self, short_name: &str) -> Option<&ModelGenerationResult> {
        self.models.iter().find(|m| m.short_name == short_name)
    }
}

/// What a writer produced: a file map and/or a single text blob
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterOutput {
    /// Relative path to file content, in emission order
    pub files: IndexMap<String, String>,
    pub stdout: Option<String>,
}

impl WriterOutput {
    pub fn files(files: IndexMap<String, String>) -> Self {
        Self {
            files,
            stdout: None,
        }
    }

    pub fn stdout(content: String) -> Self {
        Self {
            files: IndexMap::new(),
            stdout: Some(content),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.stdout.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(ts_type: &str) -> ResolvedRelation {
        ResolvedRelation {
            name: "rel".into(),
            ts_type: ts_type.into(),
            optional: false,
            circular: false,
            warning: None,
        }
    }

    #[test]
    fn test_related_models() {
        let model = ModelGenerationResult {
            short_name: "Post".into(),
            relations: vec![
                relation("User | null"),
                relation("Comment[]"),
                relation("Post"),
                relation("Video | Image"),
                relation("User"),
            ],
            ..Default::default()
        };

        assert_eq!(model.related_models(), vec!["User", "Comment", "Video", "Image"]);
    }
}
