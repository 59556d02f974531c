//! TypeScript and JSON writers for ormtype.
//!
//! Writers turn a [`GenerationResult`](ormtype_core::GenerationResult) into
//! files or a single bundle:
//!
//! - [`TypescriptWriter`] emits `interface` or `type` declarations, as one
//!   bundle or one file per model with an `index.ts` barrel
//! - [`JsonWriter`] emits a structured document for other tools
//!
//! ```ignore
//! use ormtype_codegen::pipeline::Pipeline;
//! use ormtype_codegen_typescript::writer_for;
//!
//! let writer = writer_for(config.writer.default);
//! let result = Pipeline::from_source(source, writer).run(&config)?;
//! ```

mod code_file;
mod declarations;
mod json;
mod naming;
mod writer;

pub mod ast;

pub use ast::ModelStyle;
pub use code_file::{CodeFile, HEADER};
pub use declarations::{
    Declaration, ModelRenderer, TypeNames, enum_declarations, standalone_declarations,
};
pub use json::JsonWriter;
pub use naming::{is_identifier, property_key};
pub use writer::TypescriptWriter;

use ormtype_codegen::adapters::Writer;
use ormtype_manifest::WriterKind;

/// The writer registered for a configured writer kind.
pub fn writer_for(kind: WriterKind) -> Box<dyn Writer> {
    match kind {
        WriterKind::Interface => Box::new(TypescriptWriter::interface()),
        WriterKind::Type => Box::new(TypescriptWriter::type_alias()),
        WriterKind::Json => Box::new(JsonWriter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_for_kind() {
        assert_eq!(writer_for(WriterKind::Interface).name(), "interface");
        assert_eq!(writer_for(WriterKind::Type).name(), "type");
        let json = writer_for(WriterKind::Json);
        assert_eq!(json.name(), "json");
        assert_eq!(json.extension(), "json");
    }
}
