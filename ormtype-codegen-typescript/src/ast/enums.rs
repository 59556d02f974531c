//! Enum bodies shared by the `as const` object and native `enum` styles.

use ormtype_codegen::builder::{CodeFragment, Renderable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumForm {
    /// `export const Status = { Draft: 'draft', } as const;`
    ConstObject,
    /// `export enum Status { Draft = 'draft', }`
    Native,
}

/// One case: key, literal value and an optional doc line.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumCase {
    pub key: String,
    pub value: String,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumBlock {
    form: EnumForm,
    name: String,
    cases: Vec<EnumCase>,
}

impl EnumBlock {
    pub fn new(form: EnumForm, name: impl Into<String>) -> Self {
        Self {
            form,
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn case(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        doc: Option<String>,
    ) -> Self {
        self.cases.push(EnumCase {
            key: key.into(),
            value: value.into(),
            doc,
        });
        self
    }
}

impl Renderable for EnumBlock {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let (header, separator, close) = match self.form {
            EnumForm::ConstObject => (
                format!("export const {} = {{", self.name),
                ": ",
                "} as const;",
            ),
            EnumForm::Native => (format!("export enum {} {{", self.name), " = ", "}"),
        };

        if self.cases.is_empty() {
            return vec![CodeFragment::Line(format!("{}{}", header, close))];
        }

        let mut body = Vec::new();
        for case in &self.cases {
            if let Some(doc) = &case.doc {
                body.push(CodeFragment::JsDoc(doc.clone()));
            }
            body.push(CodeFragment::Line(format!(
                "{}{}{},",
                case.key, separator, case.value
            )));
        }

        vec![CodeFragment::Block {
            header,
            body,
            close: close.to_string(),
        }]
    }
}
