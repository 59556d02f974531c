//! Shared naming helpers.

use std::fmt;
use std::str::FromStr;

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};

/// Naming convention applied to generated property names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    #[default]
    Snake,
    Camel,
    Pascal,
    Kebab,
    Preserve,
}

impl Case {
    pub fn as_str(&self) -> &'static str {
        match self {
            Case::Snake => "snake",
            Case::Camel => "camel",
            Case::Pascal => "pascal",
            Case::Kebab => "kebab",
            Case::Preserve => "preserve",
        }
    }

    pub fn apply(&self, value: &str) -> String {
        match self {
            Case::Snake => value.to_snake_case(),
            Case::Camel => value.to_lower_camel_case(),
            Case::Pascal => value.to_upper_camel_case(),
            Case::Kebab => value.to_kebab_case(),
            Case::Preserve => value.to_string(),
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Case {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snake" => Ok(Case::Snake),
            "camel" => Ok(Case::Camel),
            "pascal" | "studly" => Ok(Case::Pascal),
            "kebab" => Ok(Case::Kebab),
            "preserve" | "none" => Ok(Case::Preserve),
            _ => Err(format!(
                "Unknown case: {}. Supported: snake, camel, pascal, kebab, preserve",
                s
            )),
        }
    }
}

/// Last `\`-separated segment of a qualified class name.
pub fn class_basename(qualified: &str) -> &str {
    let trimmed = qualified.trim_start_matches('\\');
    trimmed.rsplit('\\').next().unwrap_or(trimmed)
}

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("Person", "People"),
    ("Child", "Children"),
    ("Man", "Men"),
    ("Woman", "Women"),
    ("Mouse", "Mice"),
    ("Goose", "Geese"),
    ("Tooth", "Teeth"),
    ("Foot", "Feet"),
];

const UNCOUNTABLE: &[&str] = &[
    "Data",
    "Equipment",
    "Information",
    "Media",
    "Metadata",
    "News",
    "Series",
    "Species",
];

/// English plural of a PascalCase type name.
///
/// Only the last word of the name is inflected, so `BlogPost` becomes
/// `BlogPosts` and `SalesPerson` becomes `SalesPeople`.
pub fn pluralize(name: &str) -> String {
    let split = name
        .char_indices()
        .filter(|(_, c)| c.is_uppercase())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0);
    let (head, word) = name.split_at(split);

    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return name.to_string();
    }

    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(single, _)| *single == word) {
        return format!("{}{}", head, plural);
    }

    let lower = word.to_lowercase();
    let ends_with_consonant_y = lower.ends_with('y')
        && !lower
            .chars()
            .rev()
            .nth(1)
            .is_some_and(|c| "aeiou".contains(c));

    if ends_with_consonant_y {
        format!("{}{}ies", head, &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        format!("{}{}es", head, word)
    } else {
        format!("{}{}s", head, word)
    }
}

/// Convert a TOML value to its string representation
pub fn toml_value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_apply() {
        assert_eq!(Case::Camel.apply("first_name"), "firstName");
        assert_eq!(Case::Pascal.apply("first_name"), "FirstName");
        assert_eq!(Case::Kebab.apply("first_name"), "first-name");
        assert_eq!(Case::Snake.apply("firstName"), "first_name");
        assert_eq!(Case::Preserve.apply("first_Name"), "first_Name");
    }

    #[test]
    fn test_case_from_str() {
        assert_eq!("camel".parse::<Case>(), Ok(Case::Camel));
        assert_eq!("Studly".parse::<Case>(), Ok(Case::Pascal));
        assert!("shouty".parse::<Case>().is_err());
    }

    #[test]
    fn test_class_basename() {
        assert_eq!(class_basename("App\\Models\\User"), "User");
        assert_eq!(class_basename("\\User"), "User");
        assert_eq!(class_basename("User"), "User");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("User"), "Users");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("Status"), "Statuses");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Branch"), "Branches");
        assert_eq!(pluralize("BlogPost"), "BlogPosts");
        assert_eq!(pluralize("SalesPerson"), "SalesPeople");
        assert_eq!(pluralize("Media"), "Media");
    }

    #[test]
    fn test_toml_value_to_string() {
        assert_eq!(toml_value_to_string(&toml::Value::String("a".into())), "a");
        assert_eq!(toml_value_to_string(&toml::Value::Integer(5)), "5");
        assert_eq!(toml_value_to_string(&toml::Value::Boolean(true)), "true");
    }
}
