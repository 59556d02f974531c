//! State carried through the phases of one generation run.

use ormtype_core::{EnumDefinition, GenerationResult, ModelGenerationResult, ModelReference, WriterOutput};
use ormtype_manifest::GenerationConfig;

use super::{Diagnostic, Phase};

/// Context passed through all pipeline phases.
///
/// Phases fill it in order; plugins only ever see it by shared reference.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    pub config: &'a GenerationConfig,
    /// Models found by the discover phase.
    pub references: Vec<ModelReference>,
    /// Successfully processed models, in discovery order.
    pub models: Vec<ModelGenerationResult>,
    /// Enums referenced by any model, de-duplicated by name.
    pub enums: Vec<EnumDefinition>,
    pub output: Option<WriterOutput>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(config: &'a GenerationConfig) -> Self {
        Self {
            config,
            references: Vec::new(),
            models: Vec::new(),
            enums: Vec::new(),
            output: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_warning(&mut self, phase: Phase, model: &str, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::warning(phase, message).at(model));
    }

    pub fn add_info(&mut self, phase: Phase, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Warning messages in the order they were recorded.
    pub fn warnings(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .map(|d| d.message.clone())
            .collect()
    }

    pub fn into_result(self) -> GenerationResult {
        let warnings = self.warnings();
        GenerationResult {
            models: self.models,
            enums: self.enums,
            warnings,
            output: self.output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_keep_order() {
        let config = GenerationConfig::default();
        let mut ctx = GenerationContext::new(&config);
        ctx.add_warning(Phase::Process, "User", "first");
        ctx.add_info(Phase::Format, "formatter unavailable");
        ctx.add_warning(Phase::Process, "Post", "second");

        assert!(ctx.has_warnings());
        assert_eq!(ctx.warning_count(), 2);
        assert_eq!(ctx.into_result().warnings, vec!["first", "second"]);
    }
}
