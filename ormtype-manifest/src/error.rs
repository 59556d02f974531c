use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass --config <path> or create an ormtype.toml in the current directory"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(ormtype::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        filename: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(ormtype::json_error))]
    JsonParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("syntax error here")]
        span: Option<SourceSpan>,
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {field} '{value}'")]
    #[diagnostic(code(ormtype::invalid_value), help("{help}"))]
    InvalidValue {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid value")]
        span: Option<SourceSpan>,
        field: String,
        value: String,
        help: String,
    },

    #[error("{message}")]
    #[diagnostic(code(ormtype::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            filename: filename.to_string(),
            source,
        })
    }

    /// Create a parse error from a serde_json error, locating its line/column
    pub fn json(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        let span = offset_of(src, source.line(), source.column()).map(|o| SourceSpan::from((o, 1)));
        Box::new(Error::JsonParse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            filename: filename.to_string(),
            source,
        })
    }

    /// Create an invalid value error, pointing at the value when it can be found
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        help: impl Into<String>,
        src: &str,
        filename: &str,
    ) -> Box<Self> {
        let value = value.into();
        Box::new(Error::InvalidValue {
            src: NamedSource::new(filename, src.to_string()),
            span: crate::validate::find_value_span(src, &value),
            field: field.into(),
            value,
            help: help.into(),
        })
    }

    /// Create a validation error with source context
    pub fn validation(message: impl Into<String>, src: &str, filename: &str) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span: None,
            message: message.into(),
        })
    }

    /// Create a validation error with a span
    pub fn validation_at(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }
}

/// Byte offset of a 1-based line/column pair.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    (offset <= src.len()).then_some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "{\n  \"a\": 1,\n}";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 2, 3), Some(4));
        assert_eq!(offset_of(src, 0, 0), None);
    }
}
