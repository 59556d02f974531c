//! Validation helpers for TypeScript identifiers and source spans

use miette::SourceSpan;

/// Words TypeScript reserves as type or binding names
pub(crate) const TS_RESERVED: &[&str] = &[
    "any", "boolean", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for",
    "function", "if", "import", "in", "instanceof", "never", "new", "null", "number", "object",
    "return", "string", "super", "switch", "symbol", "this", "throw", "true", "try", "typeof",
    "undefined", "unknown", "var", "void", "while", "with",
];

pub(crate) fn is_reserved(name: &str) -> bool {
    TS_RESERVED.contains(&name)
}

/// Validate that a name can be used as a TypeScript type name.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_type_name(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("name must start with a letter, underscore or dollar sign"),
        None => return Some("name cannot be empty"),
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return Some("name must contain only letters, numbers, underscores and dollar signs");
    }

    if is_reserved(name) {
        return Some("name is a TypeScript reserved word");
    }

    None
}

/// Find the span of a quoted value in TOML or JSON source.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", value);
    if let Some(pos) = src.find(&quoted) {
        // +1 to skip the opening quote
        return Some(SourceSpan::from((pos + 1, value.len())));
    }
    find_key_span(src, value)
}

/// Find the span of a key in TOML source.
/// Searches for patterns like `.key]`, `key =` or a bare match.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    if key.is_empty() {
        return None;
    }

    let patterns = [format!(".{}]", key), format!("{} =", key), format!("{}=", key)];
    for pattern in &patterns {
        if let Some(pos) = src.find(pattern) {
            let start = if pattern.starts_with('.') { pos + 1 } else { pos };
            return Some(SourceSpan::from((start, key.len())));
        }
    }

    src.find(key).map(|pos| SourceSpan::from((pos, key.len())))
}
