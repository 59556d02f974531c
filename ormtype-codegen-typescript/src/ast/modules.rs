//! Cross-file references for per-model output.

use ormtype_codegen::builder::{CodeFragment, Renderable};

/// `import type { A, B } from './module';`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeImport {
    from: String,
    names: Vec<String>,
}

impl TypeImport {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            names: Vec::new(),
        }
    }

    /// Duplicates are ignored.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
        self
    }
}

impl Renderable for TypeImport {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.names.is_empty() {
            return Vec::new();
        }
        vec![CodeFragment::Line(format!(
            "import type {{ {} }} from '{}';",
            self.names.join(", "),
            self.from
        ))]
    }
}

/// `export * from './module';`
#[derive(Debug, Clone, PartialEq)]
pub struct ReExport(pub String);

impl Renderable for ReExport {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(format!("export * from '{}';", self.0))]
    }
}
