//! External code formatter integration.

use std::{
    io::Write,
    process::{Command, Stdio},
};

use eyre::{Result, WrapErr, eyre};
use ormtype_manifest::{FormatterConfig, FormatterTool};

/// Post-processes generated output text.
///
/// Formatting is cosmetic: callers keep the original content whenever
/// [`format`](Self::format) fails.
pub trait Formatter {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    /// Format `content`; `file_hint` is the path the content will be written to.
    fn format(&self, content: &str, file_hint: &str) -> Result<String>;
}

/// Formatter that leaves content untouched.
pub struct NullFormatter;

impl Formatter for NullFormatter {
    fn name(&self) -> &str {
        "none"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn format(&self, content: &str, _file_hint: &str) -> Result<String> {
        Ok(content.to_string())
    }
}

/// Runs prettier or biome as a child process, feeding content through stdin.
pub struct CommandFormatter {
    tool: FormatterTool,
    binary: String,
}

impl CommandFormatter {
    pub fn new(tool: FormatterTool, binary: impl Into<String>) -> Self {
        Self {
            tool,
            binary: binary.into(),
        }
    }

    pub fn from_config(config: &FormatterConfig) -> Self {
        Self::new(config.tool, config.binary())
    }

    fn args(&self, file_hint: &str) -> Vec<String> {
        match self.tool {
            FormatterTool::Prettier => vec![
                "--stdin-filepath".to_string(),
                file_hint.to_string(),
                "--parser".to_string(),
                "typescript".to_string(),
            ],
            FormatterTool::Biome => vec![
                "format".to_string(),
                "--stdin-file-path".to_string(),
                file_hint.to_string(),
            ],
        }
    }
}

impl Formatter for CommandFormatter {
    fn name(&self) -> &str {
        self.tool.as_str()
    }

    fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn format(&self, content: &str, file_hint: &str) -> Result<String> {
        let mut child = Command::new(&self.binary)
            .args(self.args(file_hint))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .wrap_err_with(|| format!("failed to run {}", self.binary))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(content.as_bytes())
                .wrap_err("failed to write to formatter stdin")?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(eyre!("{} exited with {}: {}", self.binary, output.status, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
