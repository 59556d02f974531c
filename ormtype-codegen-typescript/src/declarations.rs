//! Turns resolved models and enums into TypeScript declarations.

use indexmap::IndexMap;
use ormtype_codegen::{
    adapters::WriterOptions,
    builder::{CodeFragment, Renderable},
};
use ormtype_core::{EnumDefinition, GenerationResult, ModelGenerationResult, Property, Section, pluralize};
use ormtype_manifest::EnumStyle;

use crate::{
    ast::{EnumBlock, EnumForm, Field, Member, ModelStyle, Shape, TypeAlias, Union},
    naming::property_key,
};

/// Any top-level declaration a writer emits.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Shape(Shape),
    Alias(TypeAlias),
    Union(Union),
    Enum(EnumBlock),
}

impl Renderable for Declaration {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Declaration::Shape(node) => node.to_fragments(),
            Declaration::Alias(node) => node.to_fragments(),
            Declaration::Union(node) => node.to_fragments(),
            Declaration::Enum(node) => node.to_fragments(),
        }
    }
}

fn declare(style: ModelStyle, name: String, members: Vec<Member>) -> Declaration {
    Declaration::Shape(Shape::new(style, name).members(members))
}

/// Declared type name of every model in a result.
///
/// With plurals enabled `User` is declared as `Users`, and relation types
/// pointing at `User` are rewritten to match.
#[derive(Debug, Clone, Default)]
pub struct TypeNames {
    names: IndexMap<String, String>,
}

impl TypeNames {
    pub fn new(result: &GenerationResult, plurals: bool) -> Self {
        let names = result
            .models
            .iter()
            .map(|m| {
                let declared = if plurals {
                    pluralize(&m.short_name)
                } else {
                    m.short_name.clone()
                };
                (m.short_name.clone(), declared)
            })
            .collect();
        Self { names }
    }

    /// Declared name for a model short name.
    pub fn declared<'a>(&'a self, short_name: &'a str) -> &'a str {
        self.names
            .get(short_name)
            .map(String::as_str)
            .unwrap_or(short_name)
    }

    /// Short name of the model declared as `declared`.
    pub fn model_for(&self, declared: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, d)| *d == declared)
            .map(|(short, _)| short.as_str())
    }

    /// Rewrite model references inside a type expression.
    ///
    /// Quoted string literals are left untouched.
    pub fn rename(&self, ts_type: &str) -> String {
        let mut out = String::with_capacity(ts_type.len());
        let mut token = String::new();
        let mut quote: Option<char> = None;

        for c in ts_type.chars() {
            if let Some(q) = quote {
                out.push(c);
                if c == q {
                    quote = None;
                }
                continue;
            }
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                token.push(c);
                continue;
            }
            self.flush(&mut token, &mut out);
            if c == '\'' || c == '"' {
                quote = Some(c);
            }
            out.push(c);
        }
        self.flush(&mut token, &mut out);
        out
    }

    fn flush(&self, token: &mut String, out: &mut String) {
        if token.is_empty() {
            return;
        }
        out.push_str(self.declared(token));
        token.clear();
    }
}

/// Builds model declarations according to writer options.
pub struct ModelRenderer<'a> {
    options: &'a WriterOptions,
    style: ModelStyle,
    names: &'a TypeNames,
}

impl<'a> ModelRenderer<'a> {
    pub fn new(options: &'a WriterOptions, style: ModelStyle, names: &'a TypeNames) -> Self {
        Self {
            options,
            style,
            names,
        }
    }

    fn column_field(&self, property: &Property) -> Field {
        Field::new(self.options.column_case.apply(&property.name), &property.ts_type)
            .optional(property.optional)
    }

    fn derived_fields(&self, properties: &[Property]) -> impl Iterator<Item = Member> {
        properties.iter().map(|p| {
            Member::Field(
                Field::new(self.options.relation_case.apply(&p.name), &p.ts_type)
                    .optional(p.optional),
            )
        })
    }

    /// Ordered body members: columns, mutators, relations, counts, exists, sums.
    pub fn members(&self, model: &ModelGenerationResult) -> Vec<Member> {
        let mut members: Vec<Member> = model
            .properties_in(Section::Columns)
            .map(|p| Member::Field(self.column_field(p)))
            .collect();

        let mutators: Vec<Member> = model
            .properties_in(Section::Mutators)
            .map(|p| Member::Field(self.column_field(p)))
            .collect();
        if !mutators.is_empty() {
            members.push(Member::Section("Mutators".to_string()));
            members.extend(mutators);
        }

        if !model.relations.is_empty() {
            members.push(Member::Section("Relations".to_string()));
            members.extend(model.relations.iter().map(|r| {
                Member::Field(
                    Field::new(
                        self.options.relation_case.apply(&r.name),
                        self.names.rename(&r.ts_type),
                    )
                    .optional(r.optional),
                )
            }));
        }

        for (title, properties) in [
            ("Counts", &model.counts),
            ("Exists", &model.exists),
            ("Sums", &model.sums),
        ] {
            if !properties.is_empty() {
                members.push(Member::Section(title.to_string()));
                members.extend(self.derived_fields(properties));
            }
        }

        members
    }

    /// The model declaration plus its fillable and API resource companions.
    pub fn declarations(&self, model: &ModelGenerationResult) -> Vec<Declaration> {
        let name = self.names.declared(&model.short_name).to_string();
        let mut declarations = vec![declare(self.style, name.clone(), self.members(model))];

        if self.options.fillable_types && !model.fillable.is_empty() {
            let fields = model
                .properties
                .iter()
                .filter(|p| model.fillable.contains(&p.name))
                .map(|p| Member::Field(self.column_field(p)))
                .collect();
            declarations.push(declare(
                self.style,
                format!("{}{}", model.short_name, self.options.fillable_suffix),
                fields,
            ));
        }

        if self.options.api_resources {
            declarations.push(Declaration::Shape(
                Shape::new(ModelStyle::Interface, format!("{}Resource", model.short_name))
                    .field("data", &name),
            ));
            declarations.push(Declaration::Shape(
                Shape::new(ModelStyle::Interface, format!("{}Collection", model.short_name))
                    .field("data", format!("{}[]", name)),
            ));
        }

        declarations
    }
}

/// Declarations for one enum in the requested style.
pub fn enum_declarations(def: &EnumDefinition, style: EnumStyle) -> Vec<Declaration> {
    let name = &def.short_name;
    let block = |form| {
        def.cases.iter().fold(EnumBlock::new(form, name), |block, (case, value)| {
            block.case(
                property_key(case),
                value.to_literal(),
                def.comment(case).map(str::to_string),
            )
        })
    };
    match style {
        EnumStyle::ConstObject => vec![
            Declaration::Enum(block(EnumForm::ConstObject)),
            Declaration::Alias(TypeAlias::new(
                name,
                format!("typeof {0}[keyof typeof {0}]", name),
            )),
        ],
        EnumStyle::TsEnum => vec![Declaration::Enum(block(EnumForm::Native))],
        EnumStyle::Union => vec![Declaration::Union(
            Union::new(name).variants(def.cases.values().map(|v| v.to_literal())),
        )],
    }
}

/// Standalone type aliases in declaration order.
pub fn standalone_declarations(standalone: &IndexMap<String, String>) -> Vec<Declaration> {
    standalone
        .iter()
        .map(|(name, definition)| Declaration::Alias(TypeAlias::new(name, definition)))
        .collect()
}
