//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Warnings collected by the pipeline.
    pub warnings: Vec<String>,
    /// Models that made it into the output.
    pub model_count: usize,
    /// Distinct enums emitted.
    pub enum_count: usize,
    /// What happened to the writer output.
    pub emitted: Emitted,
}

/// Where the output went.
#[derive(Debug)]
pub enum Emitted {
    /// Files written below the output directory.
    Written(WrittenFiles),
    /// Output printed to stdout.
    Printed(Vec<PrintedFile>),
}

/// Files written to disk.
#[derive(Debug)]
pub struct WrittenFiles {
    pub output_dir: PathBuf,
    /// Paths relative to the output directory, in write order.
    pub written: Vec<String>,
    /// Previously generated files that were removed and not rewritten.
    pub stale: Vec<String>,
}

/// One printed file. A single bundle has no name.
#[derive(Debug)]
pub struct PrintedFile {
    pub name: Option<String>,
    pub content: String,
}

impl GenerateReport {
    pub fn summary(&self) -> String {
        format!(
            "Generated {} model(s) and {} enum(s).",
            self.model_count, self.enum_count
        )
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.emitted {
            Emitted::Printed(files) => {
                for file in files {
                    if let Some(name) = &file.name {
                        out.divider(name);
                    }
                    out.raw(&file.content);
                }
                for warning in &self.warnings {
                    out.warning(warning);
                }
                out.status(&self.summary());
            }
            Emitted::Written(files) => {
                for warning in &self.warnings {
                    out.warning(warning);
                }

                out.preformatted(&self.summary());
                out.newline();
                out.section(&format!("Written to {}", files.output_dir.display()));
                for path in &files.written {
                    out.added_item(path);
                }

                if !files.stale.is_empty() {
                    out.newline();
                    out.section("Removed");
                    for path in &files.stale {
                        out.removed_item(path);
                    }
                }
            }
        }
    }
}
