use ormtype_codegen::builder::{CodeFragment, Renderable};

/// `export type Name = <definition>;`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    name: String,
    ty: String,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(format!(
            "export type {} = {};",
            self.name, self.ty
        ))]
    }
}

/// A union of literal types. With no variants it is `never`.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    name: String,
    variants: Vec<String>,
}

impl Union {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    pub fn variants(mut self, variants: impl IntoIterator<Item = String>) -> Self {
        self.variants.extend(variants);
        self
    }
}

impl Renderable for Union {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let ty = if self.variants.is_empty() {
            "never".to_string()
        } else {
            self.variants.join(" | ")
        };
        TypeAlias::new(&self.name, ty).to_fragments()
    }
}
