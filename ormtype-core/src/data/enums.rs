use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Primitive backing an enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackingType {
    #[default]
    String,
    Int,
}

impl BackingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackingType::String => "string",
            BackingType::Int => "int",
        }
    }
}

impl fmt::Display for BackingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value a single enum case is backed by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Int(i64),
    String(String),
}

impl EnumValue {
    /// Render the value as a TypeScript literal.
    pub fn to_literal(&self) -> String {
        match self {
            EnumValue::Int(value) => value.to_string(),
            EnumValue::String(value) => {
                format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
            }
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Int(value) => write!(f, "{}", value),
            EnumValue::String(value) => f.write_str(value),
        }
    }
}

/// Portable description of a backed enumeration.
///
/// `cases` keeps declaration order; writers enumerate it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDefinition {
    /// Qualified name, used for de-duplication
    pub name: String,
    pub short_name: String,
    pub backing: BackingType,
    pub cases: IndexMap<String, EnumValue>,
    pub comments: IndexMap<String, String>,
}

impl EnumDefinition {
    pub fn is_int(&self) -> bool {
        self.backing == BackingType::Int
    }

    pub fn comment(&self, case: &str) -> Option<&str> {
        self.comments.get(case).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal_escapes_quotes() {
        let value = EnumValue::String("it's".into());
        assert_eq!(value.to_literal(), "'it\\'s'");
    }

    #[test]
    fn test_int_literal_is_bare() {
        assert_eq!(EnumValue::Int(3).to_literal(), "3");
    }

    #[test]
    fn test_untagged_deserialize() {
        let values: Vec<EnumValue> = serde_json::from_str(r#"[1, "draft"]"#).unwrap();
        assert_eq!(
            values,
            vec![EnumValue::Int(1), EnumValue::String("draft".into())]
        );
    }
}
