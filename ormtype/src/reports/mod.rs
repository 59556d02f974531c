//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target.

mod generate;
mod inspect;
mod mappings;
mod output;

pub use generate::{Emitted, GenerateReport, PrintedFile, WrittenFiles};
pub use inspect::InspectReport;
pub use mappings::{MappingRow, MappingsReport};
pub use output::{Output, Report, TerminalOutput};
