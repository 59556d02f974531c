//! Model discovery and enum lookup.

use std::sync::Arc;

use eyre::Result;
use ormtype_core::ModelReference;
use ormtype_manifest::{EnumSource, GenerationConfig, ModelSource};

/// Lists the models a run should generate.
pub trait ModelDiscovery {
    /// Ordered model references after applying the configured filters.
    ///
    /// An empty list is treated as fatal by the pipeline.
    fn discover(&self, config: &GenerationConfig) -> Result<Vec<ModelReference>>;

    /// The source record a reference was discovered from.
    fn source(&self, reference: &ModelReference) -> Result<&ModelSource>;
}

/// Lookup of enum declarations by qualified class name.
pub trait EnumCatalog {
    fn find(&self, class: &str) -> Option<&EnumSource>;
}

impl<T: ModelDiscovery + ?Sized> ModelDiscovery for Arc<T> {
    fn discover(&self, config: &GenerationConfig) -> Result<Vec<ModelReference>> {
        (**self).discover(config)
    }

    fn source(&self, reference: &ModelReference) -> Result<&ModelSource> {
        (**self).source(reference)
    }
}

impl<T: EnumCatalog + ?Sized> EnumCatalog for Arc<T> {
    fn find(&self, class: &str) -> Option<&EnumSource> {
        (**self).find(class)
    }
}

/// A catalog with no enums.
impl EnumCatalog for () {
    fn find(&self, _class: &str) -> Option<&EnumSource> {
        None
    }
}
