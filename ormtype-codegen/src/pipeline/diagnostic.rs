//! Diagnostics collected while a generation run progresses.

use std::fmt;

use serde::Serialize;

use super::Phase;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A model or step failed.
    Error,
    /// Generation went on, but the output may be incomplete.
    Warning,
    /// Something worth knowing about the run.
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A message produced by one pipeline phase.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub phase: Phase,
    pub message: String,
    /// Short name of the model the message is about
    pub model: Option<String>,
}

impl Diagnostic {
    pub fn error(phase: Phase, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: Phase, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: Phase, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    fn new(severity: Severity, phase: Phase, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase,
            message: message.into(),
            model: None,
        }
    }

    /// Attach the model this diagnostic is about.
    pub fn at(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(model) = &self.model {
            write!(f, " (in {})", model)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error(Phase::Process, "introspection failed");
        assert!(diag.severity.is_error());
        assert_eq!(diag.phase, Phase::Process);
    }

    #[test]
    fn test_diagnostic_with_model() {
        let diag = Diagnostic::warning(Phase::Process, "name collision").at("User");
        assert_eq!(diag.model.as_deref(), Some("User"));
        assert_eq!(diag.to_string(), "warning: name collision (in User)");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
