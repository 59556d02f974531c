//! Mapping between canonical database types and TypeScript types.

use indexmap::IndexMap;

use crate::UNKNOWN_TYPE;

/// A single mapping unit in the registry chain.
///
/// Implementations answer for their own table only; the registry decides
/// which unit gets asked.
pub trait TypeMapper {
    /// Name shown by diagnostics
    fn name(&self) -> &str;

    /// Whether this mapper claims the canonical type (case-insensitive)
    fn supports(&self, db_type: &str) -> bool;

    /// Map a supported canonical type to a TypeScript type string
    fn resolve(&self, db_type: &str, params: &[String]) -> String;
}

/// Built-in canonical type table
pub struct DefaultTypeMapper;

impl DefaultTypeMapper {
    pub const MAPPINGS: &'static [(&'static str, &'static str)] = &[
        // Strings
        ("string", "string"),
        ("text", "string"),
        ("char", "string"),
        ("varchar", "string"),
        ("guid", "string"),
        // Numbers
        ("integer", "number"),
        ("int", "number"),
        ("smallint", "number"),
        ("mediumint", "number"),
        ("bigint", "number"),
        ("float", "number"),
        ("double", "number"),
        ("decimal", "number"),
        ("year", "number"),
        // Boolean
        ("boolean", "boolean"),
        ("bool", "boolean"),
        // Date/time
        ("date", "string"),
        ("datetime", "string"),
        ("timestamp", "string"),
        ("time", "string"),
        // Special
        ("uuid", "string"),
        ("ulid", "string"),
        ("json", "Record<string, unknown>"),
        ("binary", "Blob"),
        ("enum", "string"),
    ];

    fn lookup(db_type: &str) -> Option<&'static str> {
        let db_type = db_type.to_ascii_lowercase();
        Self::MAPPINGS
            .iter()
            .find(|(name, _)| *name == db_type)
            .map(|(_, ts)| *ts)
    }
}

impl TypeMapper for DefaultTypeMapper {
    fn name(&self) -> &str {
        "default"
    }

    fn supports(&self, db_type: &str) -> bool {
        Self::lookup(db_type).is_some()
    }

    fn resolve(&self, db_type: &str, _params: &[String]) -> String {
        Self::lookup(db_type).unwrap_or(UNKNOWN_TYPE).to_string()
    }
}

/// Mapper backed by an arbitrary table, e.g. project-level overrides
pub struct TableTypeMapper {
    name: String,
    table: IndexMap<String, String>,
}

impl TableTypeMapper {
    pub fn new(name: impl Into<String>, table: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            name: name.into(),
            table: table
                .into_iter()
                .map(|(db, ts)| (db.to_ascii_lowercase(), ts))
                .collect(),
        }
    }
}

impl TypeMapper for TableTypeMapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, db_type: &str) -> bool {
        self.table.contains_key(&db_type.to_ascii_lowercase())
    }

    fn resolve(&self, db_type: &str, _params: &[String]) -> String {
        self.table
            .get(&db_type.to_ascii_lowercase())
            .cloned()
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    }
}

/// Ordered chain of mappers.
///
/// Registration prepends, so the most recently registered mapper shadows
/// earlier ones (the built-in default included) for every type it claims.
pub struct TypeMapperRegistry {
    mappers: Vec<Box<dyn TypeMapper>>,
}

impl TypeMapperRegistry {
    /// Registry holding only the built-in default mapper.
    pub fn new() -> Self {
        Self {
            mappers: vec![Box::new(DefaultTypeMapper)],
        }
    }

    pub fn register(&mut self, mapper: impl TypeMapper + 'static) {
        self.mappers.insert(0, Box::new(mapper));
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with(mut self, mapper: impl TypeMapper + 'static) -> Self {
        self.register(mapper);
        self
    }

    pub fn supports(&self, db_type: &str) -> bool {
        self.mappers.iter().any(|m| m.supports(db_type))
    }

    /// Resolve through the first supporting mapper, or `"unknown"`.
    pub fn resolve(&self, db_type: &str, params: &[String]) -> String {
        self.mappers
            .iter()
            .find(|m| m.supports(db_type))
            .map(|m| m.resolve(db_type, params))
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    }

    /// Names of the registered mappers in lookup order.
    pub fn names(&self) -> Vec<&str> {
        self.mappers.iter().map(|m| m.name()).collect()
    }
}

impl Default for TypeMapperRegistry {
    fn default() -> Self {
        Self::new()
    }
}
