//! Schema introspectors reading snapshot columns.

use eyre::Result;
use ormtype_core::{RawColumn, toml_value_to_string};
use ormtype_manifest::{ColumnSource, ModelSource};

use crate::adapters::SchemaIntrospector;

/// Raw database type names and the canonical type they normalise to.
const NORMALIZED_TYPES: &[(&str, &str)] = &[
    // Strings
    ("character varying", "string"),
    ("varchar", "string"),
    ("nvarchar", "string"),
    ("char", "string"),
    ("nchar", "string"),
    ("character", "string"),
    ("bpchar", "string"),
    ("citext", "string"),
    ("tinytext", "text"),
    ("mediumtext", "text"),
    ("longtext", "text"),
    ("ntext", "text"),
    // Integers
    ("int", "integer"),
    ("int4", "integer"),
    ("serial", "integer"),
    ("int2", "smallint"),
    ("smallserial", "smallint"),
    ("int8", "bigint"),
    ("bigserial", "bigint"),
    // Floats
    ("real", "float"),
    ("float4", "float"),
    ("float8", "double"),
    ("double precision", "double"),
    ("numeric", "decimal"),
    ("money", "decimal"),
    ("smallmoney", "decimal"),
    // Date/time
    ("datetime2", "datetime"),
    ("datetimeoffset", "datetime"),
    ("smalldatetime", "datetime"),
    ("timestamptz", "timestamp"),
    ("timestamp with time zone", "timestamp"),
    ("timestamp without time zone", "timestamp"),
    ("timetz", "time"),
    ("time with time zone", "time"),
    ("time without time zone", "time"),
    // Special
    ("jsonb", "json"),
    ("uniqueidentifier", "uuid"),
    ("blob", "binary"),
    ("tinyblob", "binary"),
    ("mediumblob", "binary"),
    ("longblob", "binary"),
    ("bytea", "binary"),
    ("image", "binary"),
    ("varbinary", "binary"),
    ("set", "string"),
    ("inet", "string"),
    ("cidr", "string"),
    ("macaddr", "string"),
    ("varbit", "string"),
    ("xml", "string"),
    ("geometry", "json"),
    ("geography", "json"),
    ("point", "json"),
    ("linestring", "json"),
    ("polygon", "json"),
    ("multipoint", "json"),
    ("multilinestring", "json"),
    ("multipolygon", "json"),
    ("geometrycollection", "json"),
    ("bit", "boolean"),
];

/// Normalise a raw database type string to a canonical type name.
///
/// Size suffixes and `unsigned` are dropped, `char(36)` becomes `uuid` and
/// `tinyint(1)` becomes `boolean`. Unlisted names pass through lower-cased.
pub fn normalize_type(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();

    if lowered == "char(36)" {
        return "uuid".to_string();
    }
    if lowered.starts_with("tinyint") {
        return if lowered.starts_with("tinyint(1)") {
            "boolean".to_string()
        } else {
            "integer".to_string()
        };
    }

    let base = match lowered.find('(') {
        Some(open) => {
            let close = lowered[open..].find(')').map(|i| open + i + 1);
            let rest = close.map(|c| &lowered[c..]).unwrap_or("");
            format!("{}{}", &lowered[..open], rest)
        }
        None => lowered,
    };
    let base = base
        .replace(" unsigned", "")
        .replace(" zerofill", "")
        .trim()
        .to_string();

    NORMALIZED_TYPES
        .iter()
        .find(|(name, _)| *name == base)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(base)
}

fn raw_column(source: &ColumnSource) -> RawColumn {
    RawColumn {
        name: source.name.clone(),
        db_type: normalize_type(&source.raw_type),
        raw_type: source.raw_type.clone(),
        nullable: source.nullable,
        default: source.default.as_ref().map(toml_value_to_string),
        auto_increment: source.auto_increment,
        unique: source.unique,
    }
}

/// Introspector for the SQL drivers the snapshot format records.
pub struct SqlSchemaIntrospector;

impl SqlSchemaIntrospector {
    pub const DRIVERS: &'static [&'static str] = &["mysql", "mariadb", "pgsql", "sqlite", "sqlsrv"];
}

impl SchemaIntrospector for SqlSchemaIntrospector {
    fn name(&self) -> &'static str {
        "sql"
    }

    fn supports(&self, driver: &str) -> bool {
        Self::DRIVERS.contains(&driver.to_ascii_lowercase().as_str())
    }

    fn columns(&self, model: &ModelSource) -> Result<Vec<RawColumn>> {
        Ok(model.columns.iter().map(raw_column).collect())
    }
}

/// Catch-all introspector used when no driver-specific one applies.
///
/// Declared columns are used when the snapshot has them. Otherwise columns
/// are inferred from the primary key, the fillable list, the cast keys and
/// the timestamp columns.
pub struct FallbackSchemaIntrospector;

impl FallbackSchemaIntrospector {
    fn infer(model: &ModelSource) -> Vec<RawColumn> {
        let mut columns: Vec<RawColumn> = Vec::new();
        let mut push = |column: RawColumn| {
            if !columns.iter().any(|c| c.name == column.name) {
                columns.push(column);
            }
        };

        let key_type = match model.key_type.as_str() {
            "int" | "integer" => "integer",
            "string" => "string",
            other => other,
        };
        let mut key = RawColumn::new(&model.primary_key, key_type);
        key.raw_type = key_type.to_string();
        key.auto_increment = model.incrementing;
        key.unique = true;
        push(key);

        for name in model.fillable.iter().filter(|n| n.as_str() != "*") {
            let db_type = inferred_type(model.casts.get(name).map(String::as_str));
            push(RawColumn::new(name, db_type));
        }

        for (name, cast) in &model.casts {
            push(RawColumn::new(name, inferred_type(Some(cast))));
        }

        for name in model.timestamp_columns() {
            push(RawColumn::new(name, "timestamp").nullable(true));
        }

        columns
    }
}

/// Canonical type implied by a cast when no column type is known.
fn inferred_type(cast: Option<&str>) -> &'static str {
    let Some(cast) = cast else {
        return "string";
    };
    let base = cast.split(':').next().unwrap_or(cast).to_ascii_lowercase();
    match base.as_str() {
        "int" | "integer" => "integer",
        "real" | "float" | "double" => "float",
        "decimal" => "decimal",
        "string" => "string",
        "bool" | "boolean" => "boolean",
        "date" | "datetime" | "immutable_date" | "immutable_datetime" => "datetime",
        "timestamp" => "timestamp",
        "array" | "json" | "object" | "collection" => "json",
        _ => "string",
    }
}

impl SchemaIntrospector for FallbackSchemaIntrospector {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn supports(&self, _driver: &str) -> bool {
        true
    }

    fn columns(&self, model: &ModelSource) -> Result<Vec<RawColumn>> {
        if model.columns.is_empty() {
            Ok(Self::infer(model))
        } else {
            Ok(model.columns.iter().map(raw_column).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    #[test]
    fn test_normalize_strips_size_and_unsigned() {
        assert_eq!(normalize_type("varchar(255)"), "string");
        assert_eq!(normalize_type("INT(11) UNSIGNED"), "integer");
        assert_eq!(normalize_type("bigint unsigned"), "bigint");
        assert_eq!(normalize_type("decimal(8,2)"), "decimal");
        assert_eq!(normalize_type("numeric(10, 2)"), "decimal");
    }

    #[test]
    fn test_normalize_special_cases() {
        assert_eq!(normalize_type("char(36)"), "uuid");
        assert_eq!(normalize_type("char(2)"), "string");
        assert_eq!(normalize_type("tinyint(1)"), "boolean");
        assert_eq!(normalize_type("tinyint(4)"), "integer");
        assert_eq!(normalize_type("tinyint"), "integer");
        assert_eq!(normalize_type("timestamp with time zone"), "timestamp");
        assert_eq!(normalize_type("jsonb"), "json");
        assert_eq!(normalize_type("point"), "json");
    }

    #[test]
    fn test_normalize_passes_canonical_names_through() {
        assert_eq!(normalize_type("integer"), "integer");
        assert_eq!(normalize_type("text"), "text");
        assert_eq!(normalize_type("uuid"), "uuid");
        assert_eq!(normalize_type("enum('a','b')"), "enum");
    }

    #[test]
    fn test_sql_driver_support() {
        assert!(SqlSchemaIntrospector.supports("mysql"));
        assert!(SqlSchemaIntrospector.supports("PGSQL"));
        assert!(!SqlSchemaIntrospector.supports("mongodb"));
    }

    #[test]
    fn test_sql_columns_keep_order_and_raw_type() {
        let model = ModelSource {
            columns: vec![
                ColumnSource {
                    name: "id".to_string(),
                    raw_type: "bigint unsigned".to_string(),
                    auto_increment: true,
                    ..Default::default()
                },
                ColumnSource {
                    name: "active".to_string(),
                    raw_type: "tinyint(1)".to_string(),
                    default: Some(toml::Value::Integer(1)),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let columns = SqlSchemaIntrospector.columns(&model).unwrap();
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].db_type, "bigint");
        assert_eq!(columns[0].raw_type, "bigint unsigned");
        assert!(columns[0].auto_increment);
        assert_eq!(columns[1].db_type, "boolean");
        assert_eq!(columns[1].default.as_deref(), Some("1"));
    }

    #[test]
    fn test_fallback_infers_columns() {
        let mut casts = IndexMap::new();
        casts.insert("price".to_string(), "decimal:2".to_string());
        casts.insert("options".to_string(), "array".to_string());
        let model = ModelSource {
            fillable: vec!["title".to_string(), "price".to_string()],
            casts,
            ..Default::default()
        };

        let columns = FallbackSchemaIntrospector.columns(&model).unwrap();
        let summary: Vec<(&str, &str)> = columns
            .iter()
            .map(|c| (c.name.as_str(), c.db_type.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("id", "integer"),
                ("title", "string"),
                ("price", "decimal"),
                ("options", "json"),
                ("created_at", "timestamp"),
                ("updated_at", "timestamp"),
            ]
        );
        assert!(columns[4].nullable);
    }

    #[test]
    fn test_fallback_prefers_declared_columns() {
        let model = ModelSource {
            columns: vec![ColumnSource {
                name: "code".to_string(),
                raw_type: "varchar(8)".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let columns = FallbackSchemaIntrospector.columns(&model).unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].db_type, "string");
    }
}
