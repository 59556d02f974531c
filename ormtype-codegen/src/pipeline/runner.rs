//! Pipeline orchestrator.

use std::sync::Arc;

use eyre::{Result, WrapErr};
use ormtype_core::{
    EnumDefinition, GenerationResult, ModelGenerationResult, ModelMetadata, ModelReference,
    Property, Section, TypeMapper, WriterOutput,
};
use ormtype_manifest::{GenerationConfig, ModelSource};
use tracing::{debug, info, warn};

use super::{GenerationContext, Phase, PipelineError, Plugin};
use crate::{
    adapters::{
        EnumCatalog, Formatter, IntrospectorRegistry, MetadataExtractor, ModelDiscovery,
        SchemaIntrospector, Writer, WriterOptions,
    },
    resolver::{
        RelationResolver, ResolverContext, TypeResolver, derived_counts, derived_exists,
        derived_sums,
    },
};

/// File hint used when formatting single-bundle output.
const STDOUT_HINT: &str = "stdout.ts";

/// The generation pipeline orchestrator.
///
/// Owns the collaborators of a run and executes [`Phase::ALL`] in order,
/// calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::from_source(source, TypescriptWriter::new())
///     .formatter(CommandFormatter::from_config(&config.formatter))
///     .plugin(MyPlugin::new());
///
/// let result = pipeline.run(&config)?;
/// ```
pub struct Pipeline {
    discovery: Box<dyn ModelDiscovery>,
    extractor: Box<dyn MetadataExtractor>,
    catalog: Box<dyn EnumCatalog>,
    writer: Box<dyn Writer>,
    introspectors: IntrospectorRegistry,
    resolver: TypeResolver,
    formatter: Option<Box<dyn Formatter>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new(
        discovery: impl ModelDiscovery + 'static,
        extractor: impl MetadataExtractor + 'static,
        catalog: impl EnumCatalog + 'static,
        writer: impl Writer + 'static,
    ) -> Self {
        Self {
            discovery: Box::new(discovery),
            extractor: Box::new(extractor),
            catalog: Box::new(catalog),
            writer: Box::new(writer),
            introspectors: IntrospectorRegistry::new(),
            resolver: TypeResolver::new(),
            formatter: None,
            plugins: Vec::new(),
        }
    }

    /// Use one source as discovery, extractor and enum catalog.
    pub fn from_source<S>(source: Arc<S>, writer: impl Writer + 'static) -> Self
    where
        S: ModelDiscovery + MetadataExtractor + EnumCatalog + 'static,
    {
        Self::new(source.clone(), source.clone(), source, writer)
    }

    /// Replace the schema introspector chain.
    pub fn introspectors(mut self, registry: IntrospectorRegistry) -> Self {
        self.introspectors = registry;
        self
    }

    /// Register a schema introspector ahead of the existing ones.
    pub fn introspector(mut self, introspector: impl SchemaIntrospector + 'static) -> Self {
        self.introspectors.register(introspector);
        self
    }

    /// Register a database type mapper ahead of the existing ones.
    pub fn mapper(mut self, mapper: impl TypeMapper + 'static) -> Self {
        self.resolver.register(mapper);
        self
    }

    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Add a plugin to receive lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn resolver(&self) -> &TypeResolver {
        &self.resolver
    }

    /// Run every phase against `config`.
    ///
    /// # Errors
    ///
    /// Fails when discovery fails or finds no models, when no introspector supports a
    /// model's driver, when a plugin phase hook fails, when the writer fails,
    /// or on the first failing model if `pipeline.bail_on_error` is set.
    pub fn run(&self, config: &GenerationConfig) -> Result<GenerationResult, PipelineError> {
        let mut ctx = GenerationContext::new(config);

        for phase in Phase::ALL {
            self.run_phase(phase, &mut ctx)?;
        }

        info!(
            models = ctx.models.len(),
            enums = ctx.enums.len(),
            warnings = ctx.warning_count(),
            "generation finished"
        );
        Ok(ctx.into_result())
    }

    fn run_phase(&self, phase: Phase, ctx: &mut GenerationContext) -> Result<(), PipelineError> {
        debug!(phase = phase.name(), "starting phase");

        for plugin in &self.plugins {
            plugin
                .on_before_phase(phase, ctx)
                .map_err(|e| plugin_error(plugin.as_ref(), e))?;
        }

        match phase {
            Phase::Discover => self.discover(ctx)?,
            Phase::Process => self.process(ctx)?,
            Phase::Aggregate => Self::aggregate(ctx),
            Phase::Write => self.write(ctx)?,
            Phase::Format => self.format(ctx),
        }

        for plugin in &self.plugins {
            plugin
                .on_after_phase(phase, ctx)
                .map_err(|e| plugin_error(plugin.as_ref(), e))?;
        }

        Ok(())
    }

    fn discover(&self, ctx: &mut GenerationContext) -> Result<(), PipelineError> {
        let references =
            self.discovery
                .discover(ctx.config)
                .map_err(|e| PipelineError::Discovery {
                    message: format!("{e:#}"),
                })?;
        if references.is_empty() {
            return Err(PipelineError::NoModelsFound);
        }

        debug!(count = references.len(), "discovered models");
        ctx.references = references;
        Ok(())
    }

    fn process(&self, ctx: &mut GenerationContext) -> Result<(), PipelineError> {
        let config = ctx.config;
        let resolver_ctx = ResolverContext::new(config, self.catalog.as_ref());

        let references = ctx.references.clone();
        for reference in &references {
            let connection = config.connection_for(reference.connection.as_deref());
            let driver = config.database.driver_for(connection).unwrap_or("unknown");
            let introspector = self.introspectors.for_driver(driver).ok_or_else(|| {
                PipelineError::IntrospectionUnsupported {
                    driver: driver.to_string(),
                }
            })?;

            debug!(model = %reference.short_name, driver, introspector = introspector.name(), "processing model");

            match self.process_model(reference, introspector, &resolver_ctx) {
                Ok(result) => {
                    for warning in &result.warnings {
                        ctx.add_warning(Phase::Process, &result.short_name, warning.clone());
                    }
                    ctx.models.push(result);
                }
                Err(err) => {
                    let message = format!("{err:#}");
                    if config.pipeline.bail_on_error {
                        return Err(PipelineError::ModelFailed {
                            model: reference.short_name.clone(),
                            message,
                        });
                    }
                    warn!(model = %reference.short_name, error = %message, "skipping model");
                    ctx.add_warning(
                        Phase::Process,
                        &reference.short_name,
                        format!(
                            "Failed to process model {}: {}. Skipping.",
                            reference.short_name, message
                        ),
                    );
                }
            }
        }

        Ok(())
    }

    fn process_model(
        &self,
        reference: &ModelReference,
        introspector: &dyn SchemaIntrospector,
        resolver_ctx: &ResolverContext,
    ) -> Result<ModelGenerationResult> {
        let config = resolver_ctx.config;
        let source: &ModelSource = self.discovery.source(reference)?;
        let columns = introspector
            .columns(source)
            .wrap_err_with(|| format!("{} introspection failed", introspector.name()))?;
        let metadata = self.extractor.extract(reference, &columns)?;

        for plugin in &self.plugins {
            plugin
                .on_before_resolve(&metadata)
                .wrap_err_with(|| format!("plugin '{}' rejected the model", plugin.name()))?;
        }

        let mut result = self.resolve(&metadata, resolver_ctx);

        if config.relations.enabled {
            let relations = RelationResolver::new(&metadata.short_name);
            result.relations = relations
                .resolve_all(&metadata.relations)
                .into_iter()
                .map(|mut relation| {
                    relation.optional = config.relations.optional;
                    relation
                })
                .collect();
            result.warnings = result
                .relations
                .iter()
                .filter_map(|r| r.warning.clone())
                .collect();
        }

        result.counts = derived_counts(&metadata.relations, &config.relations.counts);
        result.exists = derived_exists(&metadata.relations, &config.relations.exists);
        result.sums = derived_sums(&metadata, &config.relations.sums);

        for plugin in &self.plugins {
            plugin
                .on_after_resolve(&result)
                .wrap_err_with(|| format!("plugin '{}' rejected the result", plugin.name()))?;
        }

        Ok(result)
    }

    /// Resolve columns and accessors into one ordered property list.
    fn resolve(&self, metadata: &ModelMetadata, ctx: &ResolverContext) -> ModelGenerationResult {
        let visibility = &ctx.config.visibility;
        let mut properties = Vec::new();
        let mut enums = Vec::new();

        for column in &metadata.columns {
            if column.hidden && !visibility.include_hidden {
                continue;
            }
            let typed = self.resolver.resolve_column(column, ctx);
            let optional = typed.optional
                || (column.hidden && visibility.include_hidden)
                || (visibility.optional_nullables && column.nullable);
            let section = if column.appended {
                Section::Mutators
            } else {
                Section::Columns
            };

            properties.push(
                Property::new(&column.name, typed.to_type_string())
                    .optional(optional)
                    .section(section),
            );
            enums.extend(typed.enum_def);
        }

        for accessor in &metadata.accessors {
            let typed = self.resolver.resolve_accessor(accessor, ctx);
            properties.push(
                Property::new(&accessor.name, typed.to_type_string())
                    .optional(typed.optional)
                    .section(Section::Mutators),
            );
            enums.extend(typed.enum_def);
        }

        let mut unique: Vec<_> = Vec::with_capacity(enums.len());
        for def in enums {
            if !unique.iter().any(|e: &EnumDefinition| e.name == def.name) {
                unique.push(def);
            }
        }

        ModelGenerationResult {
            short_name: metadata.short_name.clone(),
            qualified_name: metadata.qualified_name.clone(),
            properties,
            enums: unique,
            fillable: metadata.fillable.clone(),
            ..Default::default()
        }
    }

    fn aggregate(ctx: &mut GenerationContext) {
        let mut enums = Vec::new();
        for def in ctx.models.iter().flat_map(|m| m.enums.iter()) {
            if !enums.iter().any(|e: &EnumDefinition| e.name == def.name) {
                enums.push(def.clone());
            }
        }
        debug!(count = enums.len(), "aggregated enums");
        ctx.enums = enums;
    }

    fn write(&self, ctx: &mut GenerationContext) -> Result<(), PipelineError> {
        let options = WriterOptions::from_config(ctx.config);
        let result = GenerationResult {
            models: ctx.models.clone(),
            enums: ctx.enums.clone(),
            warnings: ctx.warnings(),
            output: None,
        };

        let output = self
            .writer
            .write(&result, &options)
            .map_err(|e| PipelineError::Write {
                writer: self.writer.name().to_string(),
                message: format!("{e:#}"),
            })?;

        debug!(writer = self.writer.name(), files = output.files.len(), "wrote output");
        ctx.output = Some(output);
        Ok(())
    }

    fn format(&self, ctx: &mut GenerationContext) {
        if !ctx.config.formatter.enabled {
            return;
        }
        let Some(formatter) = self.formatter.as_deref() else {
            return;
        };
        if !formatter.is_available() {
            ctx.add_info(
                Phase::Format,
                format!("formatter '{}' is not available", formatter.name()),
            );
            debug!(formatter = formatter.name(), "formatter unavailable, output left as is");
            return;
        }
        let Some(output) = ctx.output.take() else {
            return;
        };

        let ts = self.writer.extension() == "ts";
        let format_one = |content: String, hint: &str| -> String {
            if !hint.ends_with(".ts") {
                return content;
            }
            match formatter.format(&content, hint) {
                Ok(formatted) => formatted,
                Err(err) => {
                    warn!(file = hint, error = %err, "formatting failed, keeping original");
                    content
                }
            }
        };

        let files = output
            .files
            .into_iter()
            .map(|(path, content)| {
                let formatted = format_one(content, &path);
                (path, formatted)
            })
            .collect();
        let stdout = output.stdout.map(|content| {
            if ts {
                format_one(content, STDOUT_HINT)
            } else {
                content
            }
        });

        ctx.output = Some(WriterOutput { files, stdout });
    }
}

fn plugin_error(plugin: &dyn Plugin, err: eyre::Report) -> PipelineError {
    PipelineError::Plugin {
        plugin: plugin.name().to_string(),
        message: format!("{err:#}"),
    }
}
