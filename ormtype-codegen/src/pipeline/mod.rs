//! Generation pipeline.
//!
//! [`Pipeline`] runs the fixed phases discover → process → aggregate →
//! write → format over the collaborators it was built with:
//!
//! - Partial failure: a model that fails to process becomes a warning and
//!   is skipped, unless `pipeline.bail_on_error` is set
//! - Plugin hooks before/after each phase and around each model
//! - Diagnostics collected in [`GenerationContext`]
//!
//! # Example
//!
//! ```ignore
//! use ormtype_codegen::{pipeline::Pipeline, snapshot::SnapshotSource};
//!
//! let source = Arc::new(SnapshotSource::load(&config.discovery)?);
//! let result = Pipeline::from_source(source, writer).run(&config)?;
//!
//! for warning in &result.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! ```

mod context;
mod diagnostic;
mod error;
mod phase;
mod plugin;
mod runner;

pub use context::GenerationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use error::PipelineError;
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
