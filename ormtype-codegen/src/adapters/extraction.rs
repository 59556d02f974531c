//! Metadata extraction.

use std::sync::Arc;

use eyre::Result;
use ormtype_core::{ModelMetadata, ModelReference, RawColumn};

/// Translates a model and its introspected columns into [`ModelMetadata`].
///
/// All framework-specific knowledge (cast maps, visibility lists, relation
/// and accessor discovery) lives behind this trait.
pub trait MetadataExtractor {
    fn extract(&self, reference: &ModelReference, columns: &[RawColumn]) -> Result<ModelMetadata>;
}

impl<T: MetadataExtractor + ?Sized> MetadataExtractor for Arc<T> {
    fn extract(&self, reference: &ModelReference, columns: &[RawColumn]) -> Result<ModelMetadata> {
        (**self).extract(reference, columns)
    }
}
