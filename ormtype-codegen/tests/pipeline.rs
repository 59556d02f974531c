use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use eyre::{Result, eyre};
use indexmap::IndexMap;
use ormtype_codegen::{
    adapters::{Formatter, IntrospectorRegistry, SchemaIntrospector, Writer, WriterOptions},
    pipeline::{GenerationContext, Phase, Pipeline, PipelineError, Plugin},
    snapshot::{SnapshotSource, SqlSchemaIntrospector},
};
use ormtype_core::{
    GenerationResult, ModelGenerationResult, RawColumn, Section, TableTypeMapper, WriterOutput,
};
use ormtype_manifest::{ConnectionConfig, GenerationConfig, ModelSource, Snapshot};

const SCHEMA: &str = r#"
[[models]]
class = "App\\Models\\User"
connection = "mysql"
hidden = ["password"]
appends = ["display_name"]
casts = { status = "App\\Enums\\Status", roles = "Illuminate\\Database\\Eloquent\\Casts\\AsEnumCollection:App\\Enums\\Role" }
interfaces = { settings = "UserSettings" }
sums = { orders = "total" }

[[models.columns]]
name = "id"
type = "bigint unsigned"

[[models.columns]]
name = "name"
type = "varchar(255)"

[[models.columns]]
name = "bio"
type = "text"
nullable = true

[[models.columns]]
name = "password"
type = "varchar(255)"

[[models.columns]]
name = "status"
type = "varchar(20)"

[[models.columns]]
name = "roles"
type = "json"

[[models.columns]]
name = "settings"
type = "json"

[[models.accessors]]
name = "display_name"
returns = "string"

[[models.relations]]
name = "posts"
kind = "HasMany"
related = "App\\Models\\Post"

[[models.relations]]
name = "user"
kind = "BelongsTo"
related = "App\\Models\\User"
nullable = true

[[models]]
class = "App\\Models\\Post"
casts = { status = "App\\Enums\\Status" }

[[models.columns]]
name = "id"
type = "int"

[[models.columns]]
name = "status"
type = "varchar(20)"

[[models.relations]]
name = "author"
kind = "belongs_to"
related = "App\\Models\\User"

[[models]]
class = "App\\Models\\Broken"

[[models.columns]]
name = "id"
type = "int"

[[enums]]
class = "App\\Enums\\Status"
backing = "string"

[[enums.cases]]
name = "Draft"
value = "draft"

[[enums.cases]]
name = "Published"
value = "published"

[[enums]]
class = "App\\Enums\\Role"

[[enums.cases]]
name = "Admin"

[[enums.cases]]
name = "Editor"
"#;

/// Writes one file per model listing `name: type` lines.
struct LinesWriter;

impl Writer for LinesWriter {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn write(&self, result: &GenerationResult, _options: &WriterOptions) -> Result<WriterOutput> {
        let mut files = IndexMap::new();
        for model in &result.models {
            let body: Vec<String> = model
                .properties
                .iter()
                .map(|p| format!("{}: {};", p.name, p.ts_type))
                .collect();
            files.insert(format!("{}.ts", model.short_name), body.join("\n"));
        }
        let names: Vec<&str> = result.models.iter().map(|m| m.short_name.as_str()).collect();
        Ok(WriterOutput {
            files,
            stdout: Some(names.join(",")),
        })
    }
}

/// Fails for the `Broken` model, delegates to the SQL introspector otherwise.
struct BrokenIntrospector;

impl SchemaIntrospector for BrokenIntrospector {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn supports(&self, _driver: &str) -> bool {
        true
    }

    fn columns(&self, model: &ModelSource) -> Result<Vec<RawColumn>> {
        if model.short_name() == "Broken" {
            return Err(eyre!("table missing"));
        }
        SqlSchemaIntrospector.columns(model)
    }
}

fn source() -> Arc<SnapshotSource> {
    let snapshot = Snapshot::from_str_with_filename(SCHEMA, "schema.toml").unwrap();
    Arc::new(SnapshotSource::new([snapshot]))
}

fn config() -> GenerationConfig {
    let mut config = GenerationConfig::default();
    config.database.default = "mysql".to_string();
    config.database.connections.insert(
        "mysql".to_string(),
        ConnectionConfig {
            driver: "mysql".to_string(),
        },
    );
    config
}

fn run(config: &GenerationConfig) -> Result<GenerationResult, PipelineError> {
    Pipeline::from_source(source(), LinesWriter)
        .introspector(BrokenIntrospector)
        .run(config)
}

fn model<'a>(result: &'a GenerationResult, name: &str) -> &'a ModelGenerationResult {
    result.model(name).unwrap()
}

fn property_type(model: &ModelGenerationResult, name: &str) -> String {
    model
        .properties
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.ts_type.clone())
        .unwrap()
}

#[test]
fn resolves_columns_accessors_and_enums() {
    let result = run(&config()).unwrap();
    let user = model(&result, "User");

    let names: Vec<&str> = user.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["id", "name", "bio", "password", "status", "roles", "settings", "display_name"]
    );
    assert_eq!(property_type(user, "id"), "number");
    assert_eq!(property_type(user, "bio"), "string | null");
    assert_eq!(property_type(user, "status"), "Status");
    assert_eq!(property_type(user, "roles"), "Role[]");
    assert_eq!(property_type(user, "settings"), "UserSettings");
    assert_eq!(property_type(user, "display_name"), "string");

    let display = user.properties.iter().find(|p| p.name == "display_name").unwrap();
    assert_eq!(display.section, Section::Mutators);

    // Hidden columns are optional while included
    let password = user.properties.iter().find(|p| p.name == "password").unwrap();
    assert!(password.optional);

    let enum_names: Vec<&str> = result.enums.iter().map(|e| e.short_name.as_str()).collect();
    assert_eq!(enum_names, vec!["Status", "Role"]);
    let role = &result.enums[1];
    let cases: Vec<&str> = role.cases.keys().map(String::as_str).collect();
    assert_eq!(cases, vec!["Admin", "Editor"]);
}

#[test]
fn failing_model_becomes_warning() {
    let result = run(&config()).unwrap();

    let names: Vec<&str> = result.models.iter().map(|m| m.short_name.as_str()).collect();
    assert_eq!(names, vec!["Post", "User"]);
    assert!(result.warnings.contains(
        &"Failed to process model Broken: broken introspection failed: table missing. Skipping."
            .to_string()
    ));
}

#[test]
fn bail_on_error_aborts() {
    let mut config = config();
    config.pipeline.bail_on_error = true;

    let err = run(&config).unwrap_err();
    match err {
        PipelineError::ModelFailed { model, message } => {
            assert_eq!(model, "Broken");
            assert!(message.contains("table missing"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn no_models_is_fatal() {
    let mut config = config();
    config.discovery.included_models = vec!["Nothing".to_string()];

    assert!(matches!(run(&config), Err(PipelineError::NoModelsFound)));
}

#[test]
fn unsupported_driver_is_fatal() {
    let err = Pipeline::from_source(source(), LinesWriter)
        .introspectors(IntrospectorRegistry::empty())
        .run(&config())
        .unwrap_err();

    match err {
        PipelineError::IntrospectionUnsupported { driver } => assert_eq!(driver, "mysql"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn relations_and_derived_properties() {
    let mut config = config();
    config.relations.optional = true;
    let result = run(&config).unwrap();
    let user = model(&result, "User");

    let posts = &user.relations[0];
    assert_eq!(posts.ts_type, "Post[]");
    assert!(posts.optional);

    let me = &user.relations[1];
    assert_eq!(me.ts_type, "User | null");
    assert!(me.circular);
    assert!(me.warning.is_some());
    assert_eq!(user.warnings.len(), 1);
    assert!(result.warnings.iter().any(|w| w.contains("Relation 'user'")));

    let counts: Vec<&str> = user.counts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(counts, vec!["posts_count"]);
    let exists: Vec<&str> = user.exists.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(exists, vec!["posts_exists", "user_exists"]);
    assert_eq!(user.sums[0].name, "orders_sum_total");
    assert_eq!(user.sums[0].ts_type, "number | null");
}

#[test]
fn disabled_relations_keep_derived_properties() {
    let mut config = config();
    config.relations.enabled = false;
    config.relations.exists.enabled = false;
    let result = run(&config).unwrap();
    let user = model(&result, "User");

    assert!(user.relations.is_empty());
    assert!(user.exists.is_empty());
    assert_eq!(user.counts.len(), 1);
}

#[test]
fn visibility_options() {
    let mut config = config();
    config.visibility.include_hidden = false;
    config.visibility.optional_nullables = true;
    let result = run(&config).unwrap();
    let user = model(&result, "User");

    assert!(user.properties.iter().all(|p| p.name != "password"));
    let bio = user.properties.iter().find(|p| p.name == "bio").unwrap();
    assert!(bio.optional);
    assert_eq!(bio.ts_type, "string | null");
}

#[test]
fn registered_mapper_changes_db_types() {
    let result = Pipeline::from_source(source(), LinesWriter)
        .introspector(BrokenIntrospector)
        .mapper(TableTypeMapper::new(
            "bigint-as-string",
            [("bigint".to_string(), "string".to_string())],
        ))
        .run(&config())
        .unwrap();

    assert_eq!(property_type(model(&result, "User"), "id"), "string");
    assert_eq!(property_type(model(&result, "Post"), "id"), "number");
}

#[test]
fn output_is_deterministic() {
    let first = run(&config()).unwrap();
    let second = run(&config()).unwrap();

    assert_eq!(first.output, second.output);
    let output = first.output.unwrap();
    assert_eq!(output.stdout.as_deref(), Some("Post,User"));
    assert_eq!(
        output.files.keys().collect::<Vec<_>>(),
        vec!["Post.ts", "User.ts"]
    );
}

struct CountingPlugin {
    phases: Arc<AtomicUsize>,
    models: Arc<AtomicUsize>,
}

impl Plugin for CountingPlugin {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn on_after_phase(&self, _phase: Phase, _ctx: &GenerationContext) -> Result<()> {
        self.phases.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn on_after_resolve(&self, _result: &ModelGenerationResult) -> Result<()> {
        self.models.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn plugin_hooks_run() {
    let phases = Arc::new(AtomicUsize::new(0));
    let models = Arc::new(AtomicUsize::new(0));

    Pipeline::from_source(source(), LinesWriter)
        .introspector(BrokenIntrospector)
        .plugin(CountingPlugin {
            phases: phases.clone(),
            models: models.clone(),
        })
        .run(&config())
        .unwrap();

    assert_eq!(phases.load(Ordering::SeqCst), Phase::ALL.len());
    assert_eq!(models.load(Ordering::SeqCst), 2);
}

struct RejectingPlugin;

impl Plugin for RejectingPlugin {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    fn on_before_phase(&self, phase: Phase, _ctx: &GenerationContext) -> Result<()> {
        if phase == Phase::Write {
            return Err(eyre!("no writing today"));
        }
        Ok(())
    }
}

#[test]
fn failing_phase_hook_aborts() {
    let err = run_with(RejectingPlugin).unwrap_err();
    assert!(matches!(err, PipelineError::Plugin { ref plugin, .. } if plugin == "rejecting"));
}

fn run_with(plugin: impl Plugin + 'static) -> Result<GenerationResult, PipelineError> {
    Pipeline::from_source(source(), LinesWriter)
        .introspector(BrokenIntrospector)
        .plugin(plugin)
        .run(&config())
}

struct UpperFormatter {
    fail_on: Option<&'static str>,
}

impl Formatter for UpperFormatter {
    fn name(&self) -> &str {
        "upper"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn format(&self, content: &str, file_hint: &str) -> Result<String> {
        if self.fail_on == Some(file_hint) {
            return Err(eyre!("cannot format {file_hint}"));
        }
        Ok(content.to_uppercase())
    }
}

#[test]
fn formatter_is_best_effort() {
    let mut config = config();
    config.formatter.enabled = true;

    let result = Pipeline::from_source(source(), LinesWriter)
        .introspector(BrokenIntrospector)
        .formatter(UpperFormatter {
            fail_on: Some("Post.ts"),
        })
        .run(&config)
        .unwrap();

    let output = result.output.unwrap();
    assert_eq!(output.stdout.as_deref(), Some("POST,USER"));
    assert!(output.files["User.ts"].starts_with("ID: NUMBER;"));
    assert!(output.files["Post.ts"].starts_with("id: number;"));
}

#[test]
fn formatter_is_skipped_when_disabled() {
    let result = Pipeline::from_source(source(), LinesWriter)
        .introspector(BrokenIntrospector)
        .formatter(UpperFormatter { fail_on: None })
        .run(&config())
        .unwrap();

    assert_eq!(result.output.unwrap().stdout.as_deref(), Some("Post,User"));
}

#[test]
fn unknown_driver_uses_fallback() {
    // No connections configured: every model resolves to the fallback introspector.
    let result = Pipeline::from_source(source(), LinesWriter)
        .run(&GenerationConfig::default())
        .unwrap();

    assert_eq!(result.models.len(), 3);
    let user = model(&result, "User");
    assert_eq!(property_type(user, "id"), "number");
    assert!(result.warnings.iter().all(|w| !w.starts_with("Failed")));
}
