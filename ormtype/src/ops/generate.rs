//! Generate operation - pipeline run and output emission.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use eyre::{Context, Result};
use ormtype_codegen::{
    adapters::CommandFormatter,
    pipeline::{Pipeline, PipelineError},
    snapshot::SnapshotSource,
};
use ormtype_codegen_typescript::writer_for;
use ormtype_core::{GenerationResult, OutputWriter, WriterOutput};
use ormtype_manifest::GenerationConfig;
use tracing::debug;

use crate::reports::{Emitted, GenerateReport, PrintedFile, WrittenFiles};

/// Base name for writers that only produce a single text blob.
const BLOB_FILE_STEM: &str = "models";

/// Options for emitting a generation result.
pub struct EmitOptions {
    /// Print instead of writing to the output directory.
    pub stdout: bool,
}

/// Run the pipeline with the configured writer and formatter.
pub fn generate(
    source: SnapshotSource,
    config: &GenerationConfig,
) -> Result<GenerationResult, PipelineError> {
    let writer = writer_for(config.writer.default);
    Pipeline::from_source(Arc::new(source), writer)
        .formatter(CommandFormatter::from_config(&config.formatter))
        .run(config)
}

/// Write the result below `output.path`, or print it.
///
/// Previously generated files are removed first so models that disappeared
/// do not leave stale files behind.
pub fn emit(
    mut result: GenerationResult,
    config: &GenerationConfig,
    opts: EmitOptions,
) -> Result<GenerateReport> {
    let output = result.output.take().unwrap_or_default();
    let extension = writer_for(config.writer.default).extension();

    let emitted = if opts.stdout {
        let files = match output.stdout {
            Some(content) => vec![PrintedFile {
                name: None,
                content,
            }],
            None => output
                .files
                .into_iter()
                .map(|(name, content)| PrintedFile {
                    name: Some(name),
                    content,
                })
                .collect(),
        };
        Emitted::Printed(files)
    } else {
        Emitted::Written(write(&config.output.path, &output, extension)?)
    };

    Ok(GenerateReport {
        warnings: result.warnings,
        model_count: result.models.len(),
        enum_count: result.enums.len(),
        emitted,
    })
}

fn write(
    root: &Path,
    output: &WriterOutput,
    extension: &str,
) -> Result<WrittenFiles> {
    let disk = OutputWriter::new(root);
    let removed = disk
        .clean()
        .wrap_err_with(|| format!("Failed to clean {}", root.display()))?;
    debug!(count = removed.len(), "removed previously generated files");

    let mut written = Vec::new();
    if output.files.is_empty() {
        if let Some(blob) = &output.stdout {
            let name = format!("{}.{}", BLOB_FILE_STEM, extension);
            disk.write(&name, blob)
                .wrap_err_with(|| format!("Failed to write {}", name))?;
            written.push(name);
        }
    } else {
        disk.write_files(output).wrap_err("Failed to write generated files")?;
        written.extend(output.files.keys().cloned());
    }

    let written_paths: Vec<PathBuf> = written.iter().map(|w| root.join(w)).collect();
    let stale = removed
        .into_iter()
        .filter(|path| !written_paths.contains(path))
        .map(|path| relative(root, &path))
        .collect();

    Ok(WrittenFiles {
        output_dir: root.to_path_buf(),
        written,
        stale,
    })
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
