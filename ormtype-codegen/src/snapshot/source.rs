//! Snapshot-backed discovery, metadata extraction and enum catalog.

use std::path::Path;

use eyre::{Result, eyre};
use ormtype_core::{
    AccessorDefinition, ColumnDefinition, ModelMetadata, ModelReference, RawColumn,
    RelationDefinition, class_basename,
};
use ormtype_manifest::{
    DiscoveryConfig, EnumSource, Error, GenerationConfig, ModelSource, Snapshot,
};
use tracing::{debug, warn};

use crate::adapters::{EnumCatalog, MetadataExtractor, ModelDiscovery};

/// Models and enums loaded from one or more snapshot files.
///
/// Models are de-duplicated by qualified class name; the first snapshot
/// declaring a class wins. The same applies to enums.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    models: Vec<(ModelSource, Option<String>)>,
    enums: Vec<EnumSource>,
}

impl SnapshotSource {
    pub fn new(snapshots: impl IntoIterator<Item = Snapshot>) -> Self {
        let mut source = Self::default();
        for snapshot in snapshots {
            source.add(snapshot);
        }
        source
    }

    /// Load every snapshot listed by the discovery configuration.
    ///
    /// Paths that cannot be read are skipped with a warning; snapshots that
    /// fail to parse are reported as errors.
    pub fn load(config: &DiscoveryConfig) -> ormtype_manifest::Result<Self> {
        Self::load_relative(config, Path::new("."))
    }

    /// Like [`load`](Self::load), resolving relative paths against `base`.
    pub fn load_relative(
        config: &DiscoveryConfig,
        base: &Path,
    ) -> ormtype_manifest::Result<Self> {
        let mut source = Self::default();
        for path in config.all_paths() {
            let path = base.join(path);
            match Snapshot::from_file(&path) {
                Ok(snapshot) => {
                    debug!(path = %path.display(), models = snapshot.models.len(), "loaded snapshot");
                    source.add(snapshot);
                }
                Err(err) if matches!(*err, Error::Io { .. }) => {
                    warn!(path = %path.display(), "skipping unreadable snapshot");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(source)
    }

    fn add(&mut self, snapshot: Snapshot) {
        let file = snapshot.path.as_ref().map(|p| p.display().to_string());
        for model in snapshot.models {
            let class = model.class.trim_start_matches('\\');
            if self.models.iter().any(|(m, _)| m.class.trim_start_matches('\\') == class) {
                debug!(class, "duplicate model ignored");
                continue;
            }
            self.models.push((model, file.clone()));
        }
        for enum_source in snapshot.enums {
            if self.find(&enum_source.class).is_none() {
                self.enums.push(enum_source);
            }
        }
    }

    /// All loaded models in load order.
    pub fn models(&self) -> impl Iterator<Item = &ModelSource> {
        self.models.iter().map(|(m, _)| m)
    }

    /// All loaded enums in load order.
    pub fn enums(&self) -> &[EnumSource] {
        &self.enums
    }

    /// Model by short or qualified name.
    pub fn find_model(&self, name: &str) -> Option<&ModelSource> {
        let name = name.trim_start_matches('\\');
        self.models()
            .find(|m| m.class.trim_start_matches('\\') == name)
            .or_else(|| self.models().find(|m| m.short_name() == name))
    }

    fn reference(model: &ModelSource, file: Option<&String>) -> ModelReference {
        let mut reference = ModelReference::new(model.class.trim_start_matches('\\'));
        reference.file_path = file.cloned();
        reference.connection = model.connection.clone();
        reference
    }

    fn enum_class_for(&self, return_type: &str) -> Option<String> {
        let class = return_type.trim_start_matches('?').trim_start_matches('\\');
        self.find(class).map(|e| e.class.clone())
    }
}

fn is_fillable(model: &ModelSource, name: &str) -> bool {
    if model.fillable.iter().any(|f| f == name || f == "*") {
        return true;
    }
    model.fillable.is_empty() && !model.guarded.iter().any(|g| g == name || g == "*")
}

fn is_hidden(model: &ModelSource, name: &str) -> bool {
    model.hidden.iter().any(|h| h == name)
        || (!model.visible.is_empty() && !model.visible.iter().any(|v| v == name))
}

impl ModelDiscovery for SnapshotSource {
    fn discover(&self, config: &GenerationConfig) -> Result<Vec<ModelReference>> {
        let discovery = &config.discovery;
        let mut references: Vec<ModelReference> = self
            .models
            .iter()
            .map(|(model, file)| Self::reference(model, file.as_ref()))
            .filter(|r| {
                discovery.included_models.is_empty()
                    || discovery.included_models.iter().any(|n| r.matches(n))
            })
            .filter(|r| !discovery.excluded_models.iter().any(|n| r.matches(n)))
            .filter(|r| discovery.only.as_deref().is_none_or(|n| r.matches(n)))
            .collect();

        references.sort_by(|a, b| a.short_name.cmp(&b.short_name));
        Ok(references)
    }

    fn source(&self, reference: &ModelReference) -> Result<&ModelSource> {
        self.models()
            .find(|m| m.class.trim_start_matches('\\') == reference.qualified_name)
            .ok_or_else(|| eyre!("model '{}' is not in any snapshot", reference.qualified_name))
    }
}

impl MetadataExtractor for SnapshotSource {
    fn extract(&self, reference: &ModelReference, columns: &[RawColumn]) -> Result<ModelMetadata> {
        let model = self.source(reference)?;
        let timestamps = model.timestamp_columns();

        let mut metadata = ModelMetadata::new(&reference.qualified_name);
        metadata.table = model.table_name();
        metadata.connection = model.connection.clone();
        metadata.primary_key = model.primary_key.clone();
        metadata.key_type = model.key_type.clone();
        metadata.incrementing = model.incrementing;
        metadata.casts = model.casts.clone();
        metadata.hidden = model.hidden.clone();
        metadata.visible = model.visible.clone();
        metadata.fillable = model.fillable.clone();
        metadata.guarded = model.guarded.clone();
        metadata.appends = model.appends.clone();
        metadata.timestamps = model.timestamps;
        metadata.interfaces = model.interfaces.clone();
        metadata.sums = model.sums.clone();

        metadata.columns = columns
            .iter()
            .map(|raw| ColumnDefinition {
                name: raw.name.clone(),
                db_type: raw.db_type.clone(),
                cast_type: model.casts.get(&raw.name).cloned(),
                nullable: raw.nullable,
                default: raw.default.clone(),
                hidden: is_hidden(model, &raw.name),
                fillable: is_fillable(model, &raw.name),
                primary_key: raw.name == model.primary_key,
                timestamp: timestamps.contains(&raw.name.as_str()),
                forced_type: model.interfaces.get(&raw.name).cloned(),
                appended: model.appends.contains(&raw.name),
            })
            .collect();

        for source in &model.accessors {
            if metadata.column(&source.name).is_some() {
                debug!(model = %reference.short_name, accessor = %source.name, "accessor shadows a column, skipped");
                continue;
            }
            let mut accessor = AccessorDefinition::new(&source.name)
                .style(source.style)
                .nullable(
                    source.nullable
                        || source.returns.as_deref().is_some_and(|r| r.starts_with('?')),
                );
            if let Some(returns) = &source.returns {
                accessor = accessor.returns(returns.trim_start_matches('?'));
                if let Some(class) = self.enum_class_for(returns) {
                    accessor = accessor.enum_class(class);
                }
            }
            if let Some(forced) = model.interfaces.get(&source.name) {
                accessor = accessor.forced(forced);
            }
            metadata.accessors.push(accessor);
        }

        // Appended attributes without a declared accessor still show up.
        for name in &model.appends {
            let known = metadata.column(name).is_some()
                || metadata.accessors.iter().any(|a| &a.name == name);
            if !known {
                let mut accessor = AccessorDefinition::new(name);
                if let Some(forced) = model.interfaces.get(name) {
                    accessor = accessor.forced(forced);
                }
                metadata.accessors.push(accessor);
            }
        }

        metadata.relations = model
            .relations
            .iter()
            .map(|r| {
                RelationDefinition::new(&r.name, r.kind, r.related.trim_start_matches('\\'))
                    .nullable(r.nullable)
            })
            .collect();

        Ok(metadata)
    }
}

impl EnumCatalog for SnapshotSource {
    fn find(&self, class: &str) -> Option<&EnumSource> {
        let class = class.trim_start_matches('\\');
        self.enums
            .iter()
            .find(|e| e.class.trim_start_matches('\\') == class)
            .or_else(|| {
                // Unqualified names match when they are unambiguous.
                let mut short = self.enums.iter().filter(|e| class_basename(&e.class) == class);
                match (short.next(), short.next()) {
                    (Some(found), None) if !class.contains('\\') => Some(found),
                    _ => None,
                }
            })
    }
}
