//! Where reports go.
//!
//! Reports speak in semantic terms (a section, a written file, a warning);
//! an [`Output`] only has to know how to put text on its two streams.

/// Destination for rendered reports.
///
/// Implementors provide the two raw streams. Anything meant to be piped
/// goes to `stdout`; warnings and status lines go to `stderr` so that
/// `generate --stdout > models.d.ts` stays clean.
pub trait Output {
    /// Write `text` to the primary stream as is.
    fn raw(&mut self, text: &str);

    /// Write `text` to the diagnostic stream as is.
    fn raw_err(&mut self, text: &str);

    fn section(&mut self, name: &str) {
        self.raw(&format!("{}:\n", name));
    }

    fn added_item(&mut self, text: &str) {
        self.raw(&format!("  + {}\n", text));
    }

    fn removed_item(&mut self, text: &str) {
        self.raw(&format!("  - {}\n", text));
    }

    fn divider(&mut self, label: &str) {
        self.raw(&format!("── {} ──\n", label));
    }

    /// One line of already laid out text.
    fn preformatted(&mut self, text: &str) {
        self.raw(&format!("{}\n", text));
    }

    fn newline(&mut self) {
        self.raw("\n");
    }

    fn warning(&mut self, msg: &str) {
        self.raw_err(&format!("warning: {}\n", msg));
    }

    fn status(&mut self, msg: &str) {
        self.raw_err(&format!("{}\n", msg));
    }
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Process stdout and stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn raw(&mut self, text: &str) {
        print!("{}", text);
    }

    fn raw_err(&mut self, text: &str) {
        eprint!("{}", text);
    }
}

/// Captures both streams; used by report tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct BufferOutput {
    pub stdout: String,
    pub stderr: String,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn raw(&mut self, text: &str) {
        self.stdout.push_str(text);
    }

    fn raw_err(&mut self, text: &str) {
        self.stderr.push_str(text);
    }
}
