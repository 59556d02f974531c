use std::fs;
use std::path::{Path, PathBuf};

use eyre::Result;

use crate::WriterOutput;

/// Marker carried by the first line of every generated TypeScript file
pub const GENERATED_MARKER: &str = "auto-generated";

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already held identical content
    Unchanged,
}

/// Writes a [`WriterOutput`] below an output directory
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one file relative to the root.
    pub fn write(&self, relative: &str, content: &str) -> Result<WriteResult> {
        let path = self.root.join(relative);
        if fs::read_to_string(&path).is_ok_and(|existing| existing == content) {
            return Ok(WriteResult::Unchanged);
        }
        write_file(&path, content)?;
        Ok(WriteResult::Written)
    }

    /// Write every file of the output map, in order.
    pub fn write_files(&self, output: &WriterOutput) -> Result<Vec<(PathBuf, WriteResult)>> {
        output
            .files
            .iter()
            .map(|(relative, content)| {
                let result = self.write(relative, content)?;
                Ok((self.root.join(relative), result))
            })
            .collect()
    }

    /// Delete previously generated `.ts` files below the root.
    ///
    /// Only files whose first line carries [`GENERATED_MARKER`] are removed;
    /// hand-written files are left alone. Returns the removed paths.
    pub fn clean(&self) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();
        if self.root.is_dir() {
            self.clean_dir(&self.root, &mut removed)?;
        }
        Ok(removed)
    }

    fn clean_dir(&self, dir: &Path, removed: &mut Vec<PathBuf>) -> Result<()> {
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        entries.sort();

        for path in entries {
            if path.is_dir() {
                self.clean_dir(&path, removed)?;
                continue;
            }
            if path.extension().is_some_and(|ext| ext == "ts") && is_generated(&path) {
                fs::remove_file(&path)?;
                removed.push(path);
            }
        }
        Ok(())
    }
}

fn is_generated(path: &Path) -> bool {
    fs::read_to_string(path)
        .ok()
        .and_then(|content| content.lines().next().map(|l| l.contains(GENERATED_MARKER)))
        .unwrap_or(false)
}
