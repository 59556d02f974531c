//! Schema snapshot: a file-backed description of models and enums.
//!
//! A snapshot stands in for live reflection and database access. It can be
//! written as TOML or JSON; the format is picked from the file extension.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use ormtype_core::{AccessorStyle, BackingType, EnumValue, RelationKind, class_basename};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    validate::{find_key_span, find_value_span},
};

/// Root of a snapshot file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Snapshot {
    pub models: Vec<ModelSource>,
    pub enums: Vec<EnumSource>,
    /// File the snapshot was read from
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

/// `[[models]]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSource {
    pub class: String,
    pub connection: Option<String>,
    pub table: Option<String>,
    pub primary_key: String,
    pub key_type: String,
    pub incrementing: bool,
    pub timestamps: bool,
    pub created_at: String,
    pub updated_at: String,
    pub casts: IndexMap<String, String>,
    pub hidden: Vec<String>,
    pub visible: Vec<String>,
    pub fillable: Vec<String>,
    pub guarded: Vec<String>,
    pub appends: Vec<String>,
    /// Forced TypeScript types keyed by property name
    pub interfaces: IndexMap<String, String>,
    /// Relation name to summed column
    pub sums: IndexMap<String, String>,
    pub columns: Vec<ColumnSource>,
    pub accessors: Vec<AccessorSource>,
    pub relations: Vec<RelationSource>,
}

impl Default for ModelSource {
    fn default() -> Self {
        Self {
            class: String::new(),
            connection: None,
            table: None,
            primary_key: "id".to_string(),
            key_type: "int".to_string(),
            incrementing: true,
            timestamps: true,
            created_at: "created_at".to_string(),
            updated_at: "updated_at".to_string(),
            casts: IndexMap::new(),
            hidden: Vec::new(),
            visible: Vec::new(),
            fillable: Vec::new(),
            guarded: vec!["*".to_string()],
            appends: Vec::new(),
            interfaces: IndexMap::new(),
            sums: IndexMap::new(),
            columns: Vec::new(),
            accessors: Vec::new(),
            relations: Vec::new(),
        }
    }
}

impl ModelSource {
    pub fn short_name(&self) -> &str {
        class_basename(&self.class)
    }

    /// Table name, defaulting to the snake-cased plural of the class name.
    pub fn table_name(&self) -> String {
        match &self.table {
            Some(table) => table.clone(),
            None => {
                let plural = ormtype_core::pluralize(self.short_name());
                ormtype_core::Case::Snake.apply(&plural)
            }
        }
    }

    /// Names of the timestamp columns this model maintains.
    pub fn timestamp_columns(&self) -> Vec<&str> {
        if self.timestamps {
            vec![self.created_at.as_str(), self.updated_at.as_str()]
        } else {
            Vec::new()
        }
    }
}

/// `[[models.columns]]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnSource {
    pub name: String,
    /// Type string as the database reports it, e.g. `varchar(255)`
    #[serde(rename = "type")]
    pub raw_type: String,
    pub nullable: bool,
    pub default: Option<toml::Value>,
    pub auto_increment: bool,
    pub unique: bool,
}

/// `[[models.accessors]]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessorSource {
    pub name: String,
    pub style: AccessorStyle,
    /// Declared return type; a qualified enum class is allowed
    pub returns: Option<String>,
    pub nullable: bool,
}

/// `[[models.relations]]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelationSource {
    pub name: String,
    pub kind: RelationKind,
    /// Related class, or a pre-formatted union for `MorphTo`
    pub related: String,
    #[serde(default)]
    pub nullable: bool,
}

/// `[[enums]]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnumSource {
    pub class: String,
    /// Absent for unbacked enums
    pub backing: Option<BackingType>,
    pub cases: Vec<EnumCaseSource>,
}

impl EnumSource {
    pub fn short_name(&self) -> &str {
        class_basename(&self.class)
    }
}

/// `[[enums.cases]]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnumCaseSource {
    pub name: String,
    /// Backing value; unbacked cases use their name
    #[serde(default)]
    pub value: Option<EnumValue>,
    /// Raw doc comment, decoration included
    #[serde(default)]
    pub doc: Option<String>,
}

impl Snapshot {
    /// Parse a snapshot file; `.json` files are read as JSON, anything else as TOML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();

        let mut snapshot = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_with_filename(&content, &filename)?
        } else {
            Self::from_str_with_filename(&content, &filename)?
        };
        snapshot.path = Some(path.to_path_buf());
        Ok(snapshot)
    }

    /// Parse a TOML snapshot with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let snapshot: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        snapshot.validate(content, filename)?;
        Ok(snapshot)
    }

    /// Parse a JSON snapshot with a custom filename for error reporting
    pub fn from_json_with_filename(content: &str, filename: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(content).map_err(|e| Error::json(e, content, filename))?;
        snapshot.validate(content, filename)?;
        Ok(snapshot)
    }

    pub fn find_enum(&self, class: &str) -> Option<&EnumSource> {
        let class = class.trim_start_matches('\\');
        self.enums.iter().find(|e| e.class == class)
    }

    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        for model in &self.models {
            if model.class.trim().is_empty() {
                return Err(Error::validation("model is missing 'class'", src, filename));
            }

            let mut seen: Vec<&str> = Vec::new();
            for column in &model.columns {
                if seen.contains(&column.name.as_str()) {
                    return Err(Error::validation_at(
                        format!("duplicate column '{}' in {}", column.name, model.class),
                        src,
                        filename,
                        find_value_span(src, &column.name),
                    ));
                }
                seen.push(&column.name);
            }

            for relation in &model.relations {
                if relation.related.trim().is_empty() {
                    return Err(Error::validation_at(
                        format!("relation '{}' in {} has no related model", relation.name, model.class),
                        src,
                        filename,
                        find_value_span(src, &relation.name),
                    ));
                }
            }
        }

        for source in &self.enums {
            validate_enum(source, src, filename)?;
        }

        Ok(())
    }
}

fn validate_enum(source: &EnumSource, src: &str, filename: &str) -> Result<()> {
    if source.class.trim().is_empty() {
        return Err(Error::validation("enum is missing 'class'", src, filename));
    }

    let mut names: Vec<&str> = Vec::new();
    for case in &source.cases {
        if names.contains(&case.name.as_str()) {
            return Err(Error::validation_at(
                format!("duplicate case '{}' in enum {}", case.name, source.class),
                src,
                filename,
                find_value_span(src, &case.name),
            ));
        }
        names.push(&case.name);

        let mismatch = match (source.backing, &case.value) {
            (Some(BackingType::Int), Some(EnumValue::String(_))) => Some("int"),
            (Some(BackingType::String), Some(EnumValue::Int(_))) => Some("string"),
            (Some(_), None) => Some("a backing"),
            _ => None,
        };
        if let Some(expected) = mismatch {
            return Err(Error::validation_at(
                format!(
                    "case '{}' of enum {} needs {} value",
                    case.name, source.class, expected
                ),
                src,
                filename,
                find_value_span(src, &case.name).or_else(|| find_key_span(src, "cases")),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"
[[models]]
class = "App\\Models\\User"
fillable = ["name", "email"]
hidden = ["password"]
casts = { role = "App\\Enums\\UserRole" }

[[models.columns]]
name = "id"
type = "bigint unsigned"
auto_increment = true

[[models.columns]]
name = "name"
type = "varchar(255)"

[[models.relations]]
name = "posts"
kind = "HasMany"
related = "App\\Models\\Post"

[[enums]]
class = "App\\Enums\\UserRole"
backing = "string"

[[enums.cases]]
name = "Admin"
value = "admin"
doc = "/** Full access */"

[[enums.cases]]
name = "Member"
value = "member"
"#;

    #[test]
    fn test_parse_toml() {
        let snapshot = Snapshot::from_str_with_filename(SNAPSHOT, "schema.toml").unwrap();

        assert_eq!(snapshot.models.len(), 1);
        let user = &snapshot.models[0];
        assert_eq!(user.short_name(), "User");
        assert_eq!(user.table_name(), "users");
        assert_eq!(user.primary_key, "id");
        assert_eq!(user.columns[1].raw_type, "varchar(255)");
        assert_eq!(user.relations[0].kind, RelationKind::HasMany);
        assert_eq!(user.timestamp_columns(), vec!["created_at", "updated_at"]);

        let role = snapshot.find_enum("\\App\\Enums\\UserRole").unwrap();
        assert_eq!(role.short_name(), "UserRole");
        assert_eq!(role.cases.len(), 2);
        assert_eq!(role.cases[0].value, Some(EnumValue::String("admin".into())));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
  "models": [{ "class": "App\\Models\\Tag", "timestamps": false }],
  "enums": [{ "class": "App\\Enums\\Level", "backing": "int",
              "cases": [{ "name": "Low", "value": 1 }, { "name": "High", "value": 2 }] }]
}"#;
        let snapshot = Snapshot::from_json_with_filename(json, "schema.json").unwrap();

        assert!(snapshot.models[0].timestamp_columns().is_empty());
        assert_eq!(snapshot.enums[0].cases[1].value, Some(EnumValue::Int(2)));
    }

    #[test]
    fn test_json_syntax_error() {
        let err = Snapshot::from_json_with_filename("{\n  \"models\": [,]\n}", "schema.json")
            .unwrap_err();
        assert!(matches!(*err, Error::JsonParse { span: Some(_), .. }));
    }

    #[test]
    fn test_unknown_relation_kind() {
        let src = r#"
[[models]]
class = "Post"

[[models.relations]]
name = "author"
kind = "belongs_to_one"
related = "User"
"#;
        let err = Snapshot::from_str_with_filename(src, "schema.toml").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_backing_mismatch() {
        let src = r#"
[[enums]]
class = "Level"
backing = "int"

[[enums.cases]]
name = "Low"
value = "low"
"#;
        let err = Snapshot::from_str_with_filename(src, "schema.toml").unwrap_err();
        assert!(err.to_string().contains("needs int value"));
    }

    #[test]
    fn test_duplicate_column() {
        let src = r#"
[[models]]
class = "Post"

[[models.columns]]
name = "title"
type = "varchar(255)"

[[models.columns]]
name = "title"
type = "text"
"#;
        let err = Snapshot::from_str_with_filename(src, "schema.toml").unwrap_err();
        assert!(err.to_string().contains("duplicate column 'title'"));
    }
}
