//! Model shapes: `interface User { ... }` or `type User = { ... };`.

use ormtype_codegen::builder::{CodeFragment, Renderable};

use crate::naming::property_key;

/// Declaration syntax used for model shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStyle {
    /// `export interface User { ... }`
    Interface,
    /// `export type User = { ... };`
    TypeAlias,
}

impl ModelStyle {
    fn header(self, name: &str) -> String {
        match self {
            ModelStyle::Interface => format!("export interface {} {{", name),
            ModelStyle::TypeAlias => format!("export type {} = {{", name),
        }
    }

    fn close(self) -> &'static str {
        match self {
            ModelStyle::Interface => "}",
            ModelStyle::TypeAlias => "};",
        }
    }
}

/// A `name: type;` line. Keys that are not identifiers get quoted.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub optional: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    fn line(&self) -> String {
        let marker = if self.optional { "?" } else { "" };
        format!("{}{}: {};", property_key(&self.name), marker, self.ty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(Field),
    /// `// Title`, preceded by a blank line unless it opens the body
    Section(String),
}

/// An exported model shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    style: ModelStyle,
    name: String,
    members: Vec<Member>,
}

impl Shape {
    pub fn new(style: ModelStyle, name: impl Into<String>) -> Self {
        Self {
            style,
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.members.push(Member::Field(Field::new(name, ty)));
        self
    }

    pub fn members(mut self, members: impl IntoIterator<Item = Member>) -> Self {
        self.members.extend(members);
        self
    }
}

impl Renderable for Shape {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.members.is_empty() {
            let mut empty = self.style.header(&self.name);
            empty.push_str(self.style.close());
            return vec![CodeFragment::Line(empty)];
        }

        let mut body = Vec::with_capacity(self.members.len());
        for (i, member) in self.members.iter().enumerate() {
            match member {
                Member::Field(field) => body.push(CodeFragment::Line(field.line())),
                Member::Section(title) => {
                    if i > 0 {
                        body.push(CodeFragment::Blank);
                    }
                    body.push(CodeFragment::Comment(title.clone()));
                }
            }
        }

        vec![CodeFragment::Block {
            header: self.style.header(&self.name),
            body,
            close: self.style.close().to_string(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use ormtype_codegen::builder::CodeBuilder;

    use super::*;

    fn render(shape: &Shape) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(shape);
        builder.build()
    }

    #[test]
    fn test_empty_shapes() {
        assert_eq!(
            render(&Shape::new(ModelStyle::Interface, "AuditLog")),
            "export interface AuditLog {}\n"
        );
        assert_eq!(
            render(&Shape::new(ModelStyle::TypeAlias, "AuditLog")),
            "export type AuditLog = {};\n"
        );
    }

    #[test]
    fn test_interface_fields() {
        let shape = Shape::new(ModelStyle::Interface, "User")
            .field("id", "number")
            .field("bio", "string | null");
        assert_eq!(
            render(&shape),
            "export interface User {\n  id: number;\n  bio: string | null;\n}\n"
        );
    }

    #[test]
    fn test_sections_and_optional_members() {
        let shape = Shape::new(ModelStyle::TypeAlias, "Post").members([
            Member::Field(Field::new("id", "number")),
            Member::Section("Relations".into()),
            Member::Field(Field::new("author", "User").optional(true)),
        ]);
        assert_eq!(
            render(&shape),
            "export type Post = {\n  id: number;\n\n  // Relations\n  author?: User;\n};\n"
        );
    }

    #[test]
    fn test_leading_section_has_no_blank() {
        let shape = Shape::new(ModelStyle::Interface, "Tag").members([
            Member::Section("Counts".into()),
            Member::Field(Field::new("posts_count", "number")),
        ]);
        assert!(render(&shape).starts_with("export interface Tag {\n  // Counts\n"));
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let shape = Shape::new(ModelStyle::Interface, "Row").field("full-name", "string");
        assert!(render(&shape).contains("  'full-name': string;"));
    }
}
