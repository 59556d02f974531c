//! Selector enums shared by the configuration file and the CLI.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Output strategy used to serialize a generation result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterKind {
    /// `export interface User { ... }`
    #[default]
    Interface,
    /// `export type User = { ... };`
    Type,
    /// Structured JSON document
    Json,
}

impl WriterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriterKind::Interface => "interface",
            WriterKind::Type => "type",
            WriterKind::Json => "json",
        }
    }
}

impl fmt::Display for WriterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WriterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "interface" => Ok(WriterKind::Interface),
            "type" => Ok(WriterKind::Type),
            "json" => Ok(WriterKind::Json),
            _ => Err(format!(
                "unknown writer '{}', expected 'interface', 'type' or 'json'",
                s
            )),
        }
    }
}

/// How enums are rendered in TypeScript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumStyle {
    /// Frozen object literal plus a derived value union
    #[default]
    ConstObject,
    /// Native `enum` block
    TsEnum,
    /// Plain literal union
    Union,
}

impl EnumStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnumStyle::ConstObject => "const_object",
            EnumStyle::TsEnum => "ts_enum",
            EnumStyle::Union => "union",
        }
    }
}

impl fmt::Display for EnumStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnumStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "const_object" | "const" => Ok(EnumStyle::ConstObject),
            "ts_enum" | "enum" => Ok(EnumStyle::TsEnum),
            "union" => Ok(EnumStyle::Union),
            _ => Err(format!(
                "unknown enum style '{}', expected 'const_object', 'ts_enum' or 'union'",
                s
            )),
        }
    }
}

/// External formatter binary family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterTool {
    #[default]
    Prettier,
    Biome,
}

impl FormatterTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatterTool::Prettier => "prettier",
            FormatterTool::Biome => "biome",
        }
    }
}

impl fmt::Display for FormatterTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
