use std::{path::Path, path::PathBuf, str::FromStr};

use indexmap::IndexMap;
use ormtype_core::Case;
use serde::{Deserialize, Serialize};

use crate::{
    EnumStyle, Error, FormatterTool, Result, WriterKind,
    validate::{find_key_span, find_value_span, validate_type_name},
};

/// Root configuration read from ormtype.toml
///
/// Every key is optional; an empty file yields the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    pub discovery: DiscoveryConfig,
    pub output: OutputConfig,
    pub writer: WriterConfig,
    pub relations: RelationsConfig,
    pub mappings: MappingsConfig,
    pub case: CaseConfig,
    pub visibility: VisibilityConfig,
    pub introspection: IntrospectionConfig,
    pub database: DatabaseConfig,
    pub pipeline: PipelineConfig,
    pub formatter: FormatterConfig,
}

/// `[discovery]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Schema snapshot files
    pub paths: Vec<PathBuf>,
    pub additional_paths: Vec<PathBuf>,
    /// Only these models (short or qualified names); empty means all
    pub included_models: Vec<String>,
    pub excluded_models: Vec<String>,
    /// Single-model filter, set from the command line
    #[serde(skip)]
    pub only: Option<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from("schema.toml")],
            additional_paths: Vec::new(),
            included_models: Vec::new(),
            excluded_models: Vec::new(),
            only: None,
        }
    }
}

impl DiscoveryConfig {
    pub fn all_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter().chain(self.additional_paths.iter())
    }
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub per_model_files: bool,
    pub single_file_name: String,
    pub enum_directory: String,
    pub barrel_export: bool,
    /// Spaces per indentation level in generated TypeScript
    pub indent: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("resources/js/types"),
            per_model_files: false,
            single_file_name: "models.d.ts".to_string(),
            enum_directory: "enums".to_string(),
            barrel_export: true,
            indent: 2,
        }
    }
}

/// `[writer]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    pub default: WriterKind,
    pub enum_style: EnumStyle,
    /// Wrap everything in `declare namespace <name> { ... }`
    pub global_namespace: Option<String>,
    pub plurals: bool,
    pub api_resources: bool,
    pub fillable_types: bool,
    pub fillable_suffix: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            default: WriterKind::Interface,
            enum_style: EnumStyle::ConstObject,
            global_namespace: None,
            plurals: false,
            api_resources: false,
            fillable_types: false,
            fillable_suffix: "Fillable".to_string(),
        }
    }
}

/// Enable/optional pair used by each derived-property family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Toggle {
    pub enabled: bool,
    pub optional: bool,
}

impl Default for Toggle {
    fn default() -> Self {
        Self {
            enabled: true,
            optional: false,
        }
    }
}

/// `[relations]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelationsConfig {
    pub enabled: bool,
    pub optional: bool,
    /// Carried for reporting; relation output is not truncated by depth.
    pub max_depth: u32,
    pub counts: Toggle,
    pub exists: Toggle,
    pub sums: Toggle,
}

impl Default for RelationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            optional: false,
            max_depth: 1,
            counts: Toggle::default(),
            exists: Toggle::default(),
            sums: Toggle::default(),
        }
    }
}

/// `[mappings]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingsConfig {
    /// Canonical database type to TypeScript type
    pub custom: IndexMap<String, String>,
    pub timestamps_as_date: bool,
    /// Type name to verbatim TypeScript definition
    pub standalone: IndexMap<String, String>,
}

/// `[case]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaseConfig {
    pub columns: Case,
    pub relations: Case,
}

/// `[visibility]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisibilityConfig {
    /// Emit hidden columns as optional properties instead of dropping them
    pub include_hidden: bool,
    /// Mark nullable properties optional
    pub optional_nullables: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            include_hidden: true,
            optional_nullables: false,
        }
    }
}

/// `[introspection]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntrospectionConfig {
    /// Force one connection for every model
    pub connection: Option<String>,
}

/// `[database]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub default: String,
    pub connections: IndexMap<String, ConnectionConfig>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            default: "default".to_string(),
            connections: IndexMap::new(),
        }
    }
}

/// `[database.connections.<name>]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    pub driver: String,
}

impl DatabaseConfig {
    /// Driver for the named connection, falling back to the default connection.
    pub fn driver_for(&self, connection: Option<&str>) -> Option<&str> {
        let name = connection.unwrap_or(&self.default);
        self.connections.get(name).map(|c| c.driver.as_str())
    }
}

/// `[pipeline]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub bail_on_error: bool,
}

/// `[formatter]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterConfig {
    pub enabled: bool,
    pub tool: FormatterTool,
    /// Binary to run; defaults to the tool name on PATH
    pub binary: Option<String>,
}

impl FormatterConfig {
    pub fn binary(&self) -> &str {
        self.binary.as_deref().unwrap_or(self.tool.as_str())
    }
}

impl FromStr for GenerationConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "ormtype.toml")
    }
}

impl GenerationConfig {
    /// Parse an ormtype.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse an ormtype.toml from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        config.validate(content, filename)?;
        Ok(config)
    }

    /// Connection a model is introspected through, honouring the forced connection.
    pub fn connection_for<'a>(&'a self, model_connection: Option<&'a str>) -> Option<&'a str> {
        self.introspection
            .connection
            .as_deref()
            .or(model_connection)
    }

    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        if let Some(namespace) = &self.writer.global_namespace {
            for segment in namespace.split('.') {
                if let Some(reason) = validate_type_name(segment) {
                    return Err(Error::invalid_value(
                        "global namespace",
                        namespace,
                        format!("{}; use a dotted list of identifiers", reason),
                        src,
                        filename,
                    ));
                }
            }
        }

        if !self.writer.fillable_suffix.is_empty()
            && !self
                .writer
                .fillable_suffix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::invalid_value(
                "fillable suffix",
                &self.writer.fillable_suffix,
                "the suffix is appended to a type name and must be alphanumeric",
                src,
                filename,
            ));
        }

        for name in self.mappings.standalone.keys() {
            if let Some(reason) = validate_type_name(name) {
                return Err(Error::validation_at(
                    format!("invalid standalone type name '{}': {}", name, reason),
                    src,
                    filename,
                    find_key_span(src, name),
                ));
            }
        }

        for (db_type, ts_type) in &self.mappings.custom {
            if ts_type.trim().is_empty() {
                return Err(Error::validation_at(
                    format!("custom mapping for '{}' is empty", db_type),
                    src,
                    filename,
                    find_key_span(src, db_type),
                ));
            }
        }

        let file_name = &self.output.single_file_name;
        if file_name.is_empty() || file_name.contains('/') || file_name.contains('\\') {
            return Err(Error::validation_at(
                format!("single_file_name must be a bare file name, got '{}'", file_name),
                src,
                filename,
                find_value_span(src, file_name),
            ));
        }

        if !(1..=8).contains(&self.output.indent) {
            return Err(Error::validation_at(
                format!("output.indent must be between 1 and 8, got {}", self.output.indent),
                src,
                filename,
                find_key_span(src, "indent"),
            ));
        }

        let connections = &self.database.connections;
        let unknown_connection = self
            .introspection
            .connection
            .as_ref()
            .filter(|c| !connections.is_empty() && !connections.contains_key(*c));
        if let Some(connection) = unknown_connection {
            return Err(Error::invalid_value(
                "connection",
                connection,
                format!(
                    "declared connections: {}",
                    connections
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                src,
                filename,
            ));
        }

        Ok(())
    }
}
