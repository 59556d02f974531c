//! TypeScript identifier rules for generated keys and type names.

/// Whether `name` can be written as a bare property key or identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Render a property key, single-quoting it when it is not an identifier.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// Identifier-like tokens of a type expression, in order of appearance.
///
/// `Post[] | Record<string, Tag> | null` yields `Post`, `Record`, `string`,
/// `Tag` and `null`.
pub fn type_tokens(ts_type: &str) -> Vec<&str> {
    ts_type
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .filter(|token| is_identifier(token))
        .collect()
}
