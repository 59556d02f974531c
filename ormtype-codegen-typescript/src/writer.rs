//! TypeScript writer for interface and type-alias output.

use eyre::Result;
use indexmap::IndexMap;
use ormtype_codegen::adapters::{Writer, WriterOptions};
use ormtype_core::{GenerationResult, ModelGenerationResult, WriterOutput};

use crate::{
    ast::{ModelStyle, ReExport, TypeImport},
    code_file::CodeFile,
    declarations::{ModelRenderer, TypeNames, enum_declarations, standalone_declarations},
    naming::type_tokens,
};

/// Module holding standalone type aliases in per-model mode.
const STANDALONE_MODULE: &str = "types";
const BARREL_FILE: &str = "index.ts";

/// Writes models as TypeScript declarations.
///
/// The same writer covers `interface` and `type` output; only the
/// declaration syntax of model shapes differs.
#[derive(Debug, Clone, Copy)]
pub struct TypescriptWriter {
    style: ModelStyle,
}

impl TypescriptWriter {
    pub fn new(style: ModelStyle) -> Self {
        Self { style }
    }

    /// `export interface User { ... }`
    pub fn interface() -> Self {
        Self::new(ModelStyle::Interface)
    }

    /// `export type User = { ... };`
    pub fn type_alias() -> Self {
        Self::new(ModelStyle::TypeAlias)
    }

    pub fn style(&self) -> ModelStyle {
        self.style
    }

    fn write_single(&self, result: &GenerationResult, options: &WriterOptions) -> WriterOutput {
        let names = TypeNames::new(result, options.plurals);
        let renderer = ModelRenderer::new(options, self.style, &names);

        let mut file = CodeFile::new()
            .indent(options.indent)
            .namespace(options.global_namespace.clone());

        for declaration in standalone_declarations(&options.standalone) {
            file.push(declaration);
        }
        for def in &result.enums {
            for declaration in enum_declarations(def, options.enum_style) {
                file.push(declaration);
            }
        }
        for model in &result.models {
            for declaration in renderer.declarations(model) {
                file.push(declaration);
            }
        }

        let content = file.render();
        let mut files = IndexMap::new();
        files.insert(options.single_file_name.clone(), content.clone());
        WriterOutput {
            files,
            stdout: Some(content),
        }
    }

    fn write_per_model(&self, result: &GenerationResult, options: &WriterOptions) -> WriterOutput {
        let names = TypeNames::new(result, options.plurals);
        let renderer = ModelRenderer::new(options, self.style, &names);
        let mut files = IndexMap::new();
        let mut barrel = Vec::new();

        for model in &result.models {
            let file = CodeFile::new()
                .indent(options.indent)
                .imports(model_imports(model, result, &names, options));
            let file = renderer
                .declarations(model)
                .into_iter()
                .fold(file, CodeFile::add);

            files.insert(format!("{}.ts", model.short_name), file.render());
            barrel.push(format!("./{}", model.short_name));
        }

        for def in &result.enums {
            let file = enum_declarations(def, options.enum_style)
                .into_iter()
                .fold(CodeFile::new().indent(options.indent), CodeFile::add);
            let module = format!("{}/{}", options.enum_directory, def.short_name);

            files.insert(format!("{}.ts", module), file.render());
            barrel.push(format!("./{}", module));
        }

        if !options.standalone.is_empty() {
            let file = standalone_declarations(&options.standalone)
                .into_iter()
                .fold(CodeFile::new().indent(options.indent), CodeFile::add);

            files.insert(format!("{}.ts", STANDALONE_MODULE), file.render());
            barrel.push(format!("./{}", STANDALONE_MODULE));
        }

        if options.barrel_export {
            let index = CodeFile::new()
                .indent(options.indent)
                .exports(barrel.into_iter().map(ReExport));
            files.insert(BARREL_FILE.to_string(), index.render());
        }

        WriterOutput::files(files)
    }
}

impl Default for TypescriptWriter {
    fn default() -> Self {
        Self::interface()
    }
}

impl Writer for TypescriptWriter {
    fn name(&self) -> &'static str {
        match self.style {
            ModelStyle::Interface => "interface",
            ModelStyle::TypeAlias => "type",
        }
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn write(&self, result: &GenerationResult, options: &WriterOptions) -> Result<WriterOutput> {
        if options.per_model_files {
            Ok(self.write_per_model(result, options))
        } else {
            Ok(self.write_single(result, options))
        }
    }
}

/// Type-only imports for everything a model file references.
fn model_imports(
    model: &ModelGenerationResult,
    result: &GenerationResult,
    names: &TypeNames,
    options: &WriterOptions,
) -> Vec<TypeImport> {
    let referenced: Vec<String> = model
        .properties
        .iter()
        .map(|p| p.ts_type.clone())
        .chain(model.relations.iter().map(|r| names.rename(&r.ts_type)))
        .collect();
    let tokens: Vec<&str> = referenced.iter().flat_map(|t| type_tokens(t)).collect();
    let mentions = |name: &str| tokens.contains(&name);

    let mut imports = Vec::new();

    for other in &result.models {
        let declared = names.declared(&other.short_name);
        if other.short_name != model.short_name && mentions(declared) {
            imports.push(TypeImport::new(format!("./{}", other.short_name)).name(declared));
        }
    }

    for def in &result.enums {
        if mentions(&def.short_name) {
            imports.push(
                TypeImport::new(format!("./{}/{}", options.enum_directory, def.short_name))
                    .name(&def.short_name),
            );
        }
    }

    let standalone: Vec<&String> = options
        .standalone
        .keys()
        .filter(|name| mentions(name))
        .collect();
    if !standalone.is_empty() {
        let import = standalone
            .into_iter()
            .fold(TypeImport::new(format!("./{}", STANDALONE_MODULE)), TypeImport::name);
        imports.push(import);
    }

    imports
}
