//! Inspect operation - metadata extraction for a single model.

use eyre::{Context, Result, eyre};
use ormtype_codegen::{
    adapters::{IntrospectorRegistry, MetadataExtractor, ModelDiscovery},
    snapshot::SnapshotSource,
};
use ormtype_manifest::GenerationConfig;

use crate::reports::InspectReport;

/// Run discovery, introspection and extraction for `model` only.
///
/// Include/exclude filters are ignored so any model in the snapshots can be
/// inspected.
pub fn inspect(
    source: &SnapshotSource,
    config: &GenerationConfig,
    model: &str,
    json: bool,
) -> Result<InspectReport> {
    let mut lookup = config.clone();
    lookup.discovery.included_models.clear();
    lookup.discovery.excluded_models.clear();
    lookup.discovery.only = Some(model.to_string());

    let reference = source
        .discover(&lookup)?
        .into_iter()
        .next()
        .ok_or_else(|| eyre!("Model '{}' not found in the configured snapshots", model))?;

    let connection = config.connection_for(reference.connection.as_deref());
    let driver = config.database.driver_for(connection).unwrap_or("unknown");
    let registry = IntrospectorRegistry::new();
    let introspector = registry
        .for_driver(driver)
        .ok_or_else(|| eyre!("No schema introspector available for driver '{}'", driver))?;

    let columns = introspector
        .columns(source.source(&reference)?)
        .wrap_err_with(|| format!("{} introspection failed", introspector.name()))?;
    let metadata = source.extract(&reference, &columns)?;

    let json = if json {
        Some(serde_json::to_string_pretty(&metadata).wrap_err("Failed to serialize metadata")?)
    } else {
        None
    };

    Ok(InspectReport {
        metadata,
        driver: driver.to_string(),
        introspector: introspector.name().to_string(),
        relations_enabled: config.relations.enabled,
        max_depth: config.relations.max_depth,
        json,
    })
}

#[cfg(test)]
mod tests {
    use ormtype_manifest::{ConnectionConfig, Snapshot};

    use super::*;

    const SCHEMA: &str = r#"
[[models]]
class = "App\\Models\\Invoice"
connection = "billing"
casts = { total = "decimal:2" }

[[models.columns]]
name = "id"
type = "bigint unsigned"

[[models.columns]]
name = "total"
type = "decimal(10,2)"

[[models]]
class = "App\\Models\\Team"
fillable = ["name"]
"#;

    fn source() -> SnapshotSource {
        SnapshotSource::new([Snapshot::from_str_with_filename(SCHEMA, "schema.toml").unwrap()])
    }

    #[test]
    fn test_inspect_uses_model_connection() {
        let mut config = GenerationConfig::default();
        config.database.connections.insert(
            "billing".to_string(),
            ConnectionConfig {
                driver: "pgsql".to_string(),
            },
        );

        let report = inspect(&source(), &config, "Invoice", false).unwrap();

        assert_eq!(report.driver, "pgsql");
        assert_eq!(report.introspector, "sql");
        assert_eq!(report.metadata.qualified_name, "App\\Models\\Invoice");
        let total = &report.metadata.columns[1];
        assert_eq!(total.db_type, "decimal");
        assert_eq!(total.cast_type.as_deref(), Some("decimal:2"));
        assert!(report.json.is_none());
    }

    #[test]
    fn test_excluded_models_can_be_inspected() {
        let mut config = GenerationConfig::default();
        config.discovery.excluded_models.push("Team".to_string());

        let report = inspect(&source(), &config, "App\\Models\\Team", true).unwrap();

        assert_eq!(report.introspector, "fallback");
        let json: serde_json::Value = serde_json::from_str(report.json.as_deref().unwrap()).unwrap();
        assert_eq!(json["short_name"], "Team");
    }

    #[test]
    fn test_unknown_model() {
        let err = inspect(&source(), &GenerationConfig::default(), "Ghost", false).unwrap_err();
        assert!(err.to_string().contains("Model 'Ghost' not found"));
    }
}
