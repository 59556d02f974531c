//! One generated `.ts` module: header, type imports, declarations and
//! re-exports, each group separated by a blank line.

use ormtype_codegen::builder::{CodeBuilder, Indent};

use crate::{
    ast::{ReExport, TypeImport},
    declarations::Declaration,
};

/// First line of every generated TypeScript file.
pub const HEADER: &str = "// This file is auto-generated by ormtype. Do not edit.";

#[derive(Debug, Default)]
pub struct CodeFile {
    imports: Vec<TypeImport>,
    body: Vec<Declaration>,
    exports: Vec<ReExport>,
    namespace: Option<String>,
    indent: Indent,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn imports(mut self, imports: impl IntoIterator<Item = TypeImport>) -> Self {
        self.imports.extend(imports);
        self
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, declaration: Declaration) -> Self {
        self.body.push(declaration);
        self
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.body.push(declaration);
    }

    pub fn exports(mut self, exports: impl IntoIterator<Item = ReExport>) -> Self {
        self.exports.extend(exports);
        self
    }

    /// Nest the declarations in `declare namespace <name> { ... }`.
    pub fn namespace(mut self, name: Option<String>) -> Self {
        self.namespace = name;
        self
    }

    pub fn render(&self) -> String {
        let mut out = CodeBuilder::new(self.indent);
        out.push_line(HEADER);

        if !self.imports.is_empty() {
            out.push_blank();
            for import in &self.imports {
                out.emit(import);
            }
        }

        if !self.body.is_empty() {
            out.push_blank();
            if let Some(name) = &self.namespace {
                out.push_line(&format!("declare namespace {} {{", name))
                    .push_indent();
            }
            for (i, declaration) in self.body.iter().enumerate() {
                if i > 0 {
                    out.push_blank();
                }
                out.emit(declaration);
            }
            if self.namespace.is_some() {
                out.push_dedent().push_line("}");
            }
        }

        if !self.exports.is_empty() {
            out.push_blank();
            for export in &self.exports {
                out.emit(export);
            }
        }

        out.build()
    }
}
