//! Pipeline phases.

use std::fmt;

use serde::Serialize;

/// The fixed, ordered phases of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// List the models to generate
    Discover,
    /// Introspect, extract and resolve each model
    Process,
    /// Merge per-model enums
    Aggregate,
    /// Serialize the result
    Write,
    /// Run the optional external formatter
    Format,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Phase; 5] = [
        Phase::Discover,
        Phase::Process,
        Phase::Aggregate,
        Phase::Write,
        Phase::Format,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Discover => "discover",
            Phase::Process => "process",
            Phase::Aggregate => "aggregate",
            Phase::Write => "write",
            Phase::Format => "format",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Phase::Discover => "List the models to generate",
            Phase::Process => "Resolve columns, accessors and relations of every model",
            Phase::Aggregate => "Collect the enums referenced by all models",
            Phase::Write => "Serialize the result with the selected writer",
            Phase::Format => "Pass the output through the external formatter",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
