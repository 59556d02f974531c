//! Enum definition builder.

use indexmap::IndexMap;
use ormtype_core::{EnumDefinition, EnumValue, class_basename};
use ormtype_manifest::EnumSource;

/// Build a portable [`EnumDefinition`] from an enum declaration.
///
/// Cases keep their declaration order. Unbacked enums are treated as
/// string-backed with each case name as its value.
pub fn build_enum(source: &EnumSource) -> EnumDefinition {
    let name = source.class.trim_start_matches('\\').to_string();
    let backing = source.backing.unwrap_or_default();

    let mut cases = IndexMap::new();
    let mut comments = IndexMap::new();
    for case in &source.cases {
        let value = match (&case.value, source.backing) {
            (Some(value), Some(_)) => value.clone(),
            _ => EnumValue::String(case.name.clone()),
        };
        cases.insert(case.name.clone(), value);

        if let Some(comment) = case.doc.as_deref().and_then(clean_doc) {
            comments.insert(case.name.clone(), comment);
        }
    }

    EnumDefinition {
        short_name: class_basename(&name).to_string(),
        name,
        backing,
        cases,
        comments,
    }
}

/// Strip doc-block decoration (`/**`, `*/`, leading `*`) from a comment.
///
/// Lines are trimmed and joined with a single space; `None` when nothing
/// but decoration remains.
pub fn clean_doc(doc: &str) -> Option<String> {
    let text = doc
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("/**").unwrap_or(line);
            let line = line.strip_suffix("*/").unwrap_or(line);
            let line = line.trim();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use ormtype_core::BackingType;
    use ormtype_manifest::EnumCaseSource;

    use super::*;

    fn case(name: &str, value: Option<EnumValue>, doc: Option<&str>) -> EnumCaseSource {
        EnumCaseSource {
            name: name.to_string(),
            value,
            doc: doc.map(str::to_string),
        }
    }

    #[test]
    fn test_cases_keep_declaration_order() {
        let source = EnumSource {
            class: "App\\Enums\\Priority".to_string(),
            backing: Some(BackingType::Int),
            cases: vec![
                case("Low", Some(EnumValue::Int(10)), None),
                case("High", Some(EnumValue::Int(30)), None),
                case("Medium", Some(EnumValue::Int(20)), None),
            ],
        };

        let def = build_enum(&source);
        assert_eq!(def.name, "App\\Enums\\Priority");
        assert_eq!(def.short_name, "Priority");
        assert!(def.is_int());
        let names: Vec<&str> = def.cases.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Low", "High", "Medium"]);
        assert_eq!(def.cases["High"], EnumValue::Int(30));
    }

    #[test]
    fn test_unbacked_enum_uses_case_names() {
        let source = EnumSource {
            class: "\\App\\Enums\\Suit".to_string(),
            backing: None,
            cases: vec![case("Hearts", None, None), case("Spades", None, None)],
        };

        let def = build_enum(&source);
        assert_eq!(def.name, "App\\Enums\\Suit");
        assert_eq!(def.backing, BackingType::String);
        assert_eq!(def.cases["Hearts"], EnumValue::String("Hearts".to_string()));
    }

    #[test]
    fn test_case_comments_are_cleaned() {
        let source = EnumSource {
            class: "App\\Enums\\Status".to_string(),
            backing: Some(BackingType::String),
            cases: vec![
                case(
                    "Draft",
                    Some(EnumValue::String("draft".to_string())),
                    Some("/**\n * Not visible yet.\n * Editors only.\n */"),
                ),
                case("Published", Some(EnumValue::String("published".to_string())), None),
            ],
        };

        let def = build_enum(&source);
        assert_eq!(def.comment("Draft"), Some("Not visible yet. Editors only."));
        assert_eq!(def.comment("Published"), None);
    }

    #[test]
    fn test_clean_doc() {
        assert_eq!(clean_doc("/** Single line */").as_deref(), Some("Single line"));
        assert_eq!(clean_doc("plain").as_deref(), Some("plain"));
        assert_eq!(clean_doc("/**\n *\n */"), None);
    }
}
