//! Pipeline plugin trait for extensibility.

use eyre::Result;
use ormtype_core::{ModelGenerationResult, ModelMetadata};

use super::{GenerationContext, Phase};

/// An observer hooked into the generation pipeline.
///
/// Every hook receives a shared reference, so plugins can inspect but never
/// alter the run. All hooks default to doing nothing.
///
/// # Example
///
/// ```ignore
/// struct TimingPlugin {
///     started: Mutex<Option<Instant>>,
/// }
///
/// impl Plugin for TimingPlugin {
///     fn name(&self) -> &'static str { "timing" }
///
///     fn on_before_phase(&self, _phase: Phase, _ctx: &GenerationContext) -> Result<()> {
///         *self.started.lock().unwrap() = Some(Instant::now());
///         Ok(())
///     }
///
///     fn on_after_phase(&self, phase: Phase, _ctx: &GenerationContext) -> Result<()> {
///         if let Some(start) = *self.started.lock().unwrap() {
///             println!("{} took {:?}", phase, start.elapsed());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs. An error aborts the run.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: Phase, ctx: &GenerationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes. An error aborts the run.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: Phase, ctx: &GenerationContext) -> Result<()> {
        Ok(())
    }

    /// Called with a model's metadata before its types are resolved.
    ///
    /// An error counts as a failure of that model.
    #[allow(unused_variables)]
    fn on_before_resolve(&self, metadata: &ModelMetadata) -> Result<()> {
        Ok(())
    }

    /// Called with a model's resolved result.
    ///
    /// An error counts as a failure of that model.
    #[allow(unused_variables)]
    fn on_after_resolve(&self, result: &ModelGenerationResult) -> Result<()> {
        Ok(())
    }
}
