use super::{CodeFragment, Indent, Renderable};

/// Accumulates generated TypeScript, tracking the current nesting depth.
///
/// ```
/// use ormtype_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::typescript();
/// builder
///     .push_line("export interface User {")
///     .push_indent()
///     .push_line("id: number;")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), "export interface User {\n  id: number;\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    depth: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            depth: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Two-space indentation.
    pub fn typescript() -> Self {
        Self::new(Indent::default())
    }

    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.indent.pad(&mut self.buffer, self.depth);
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Render every fragment of `node`.
    pub fn emit<R: Renderable + ?Sized>(&mut self, node: &R) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(&fragment);
        }
        self
    }

    fn apply_fragment(&mut self, fragment: &CodeFragment) {
        match fragment {
            CodeFragment::Line(line) => {
                self.push_line(line);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(header).push_indent();
                for inner in body {
                    self.apply_fragment(inner);
                }
                self.push_dedent().push_line(close);
            }
            CodeFragment::JsDoc(text) => {
                self.push_line(&format!("/** {} */", text));
            }
            CodeFragment::Comment(text) => {
                self.push_line(&format!("// {}", text));
            }
        }
    }

    pub fn build(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_with_docs_and_sections() {
        let fragments = [
            CodeFragment::JsDoc("Registered account".into()),
            CodeFragment::Block {
                header: "export interface User {".into(),
                body: vec![
                    CodeFragment::Line("id: number;".into()),
                    CodeFragment::Blank,
                    CodeFragment::Comment("counts".into()),
                    CodeFragment::Line("posts_count: number;".into()),
                ],
                close: "}".into(),
            },
        ];

        let mut builder = CodeBuilder::typescript();
        builder.emit(&fragments[..]);

        assert_eq!(
            builder.build(),
            "/** Registered account */\nexport interface User {\n  id: number;\n\n  // counts\n  posts_count: number;\n}\n"
        );
    }

    #[test]
    fn test_wide_indent_nests() {
        let enum_block = [CodeFragment::Block {
            header: "export const Status = {".into(),
            body: vec![CodeFragment::Line("Draft: 'draft',".into())],
            close: "} as const;".into(),
        }];

        let mut builder = CodeBuilder::new(Indent::spaces(4));
        builder.push_line("declare namespace models {").push_indent();
        builder.emit(&enum_block[..]);
        builder.push_dedent().push_line("}");

        assert_eq!(
            builder.build(),
            "declare namespace models {\n    export const Status = {\n        Draft: 'draft',\n    } as const;\n}\n"
        );
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::typescript();
        builder.push_dedent().push_line("x");
        assert_eq!(builder.build(), "x\n");
    }
}
