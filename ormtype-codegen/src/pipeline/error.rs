//! Fatal pipeline outcomes.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort a whole generation run.
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error("No models found in configured paths. Check discovery.paths config.")]
    #[diagnostic(
        code(ormtype::no_models),
        help("add snapshot files to [discovery] paths or relax the model filters")
    )]
    NoModelsFound,

    #[error("Model discovery failed: {message}")]
    #[diagnostic(code(ormtype::discovery_failed))]
    Discovery { message: String },

    #[error("No schema introspector available for driver '{driver}'.")]
    #[diagnostic(code(ormtype::introspection_unsupported))]
    IntrospectionUnsupported { driver: String },

    #[error("Failed to process model {model}: {message}")]
    #[diagnostic(
        code(ormtype::model_failed),
        help("unset pipeline.bail_on_error to skip failing models instead")
    )]
    ModelFailed { model: String, message: String },

    #[error("Plugin '{plugin}' failed: {message}")]
    #[diagnostic(code(ormtype::plugin_failed))]
    Plugin { plugin: String, message: String },

    #[error("Writer '{writer}' failed: {message}")]
    #[diagnostic(code(ormtype::write_failed))]
    Write { writer: String, message: String },
}
