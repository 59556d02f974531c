//! Schema introspection and the driver-keyed introspector chain.

use eyre::Result;
use ormtype_core::RawColumn;
use ormtype_manifest::ModelSource;

use crate::snapshot::{FallbackSchemaIntrospector, SqlSchemaIntrospector};

/// Reads the raw columns of a model for one family of database drivers.
pub trait SchemaIntrospector {
    /// Name shown by diagnostics
    fn name(&self) -> &'static str;

    /// Whether this introspector handles the given driver.
    fn supports(&self, driver: &str) -> bool;

    /// Ordered raw columns of the model's table.
    fn columns(&self, model: &ModelSource) -> Result<Vec<RawColumn>>;

    /// Canonical type of one column, `string` when the column is absent.
    fn column_type(&self, model: &ModelSource, column: &str) -> Result<String> {
        Ok(self
            .columns(model)?
            .into_iter()
            .find(|c| c.name == column)
            .map(|c| c.db_type)
            .unwrap_or_else(|| "string".to_string()))
    }
}

/// Ordered chain of introspectors; the first one supporting a driver wins.
///
/// [`IntrospectorRegistry::new`] ends with [`FallbackSchemaIntrospector`],
/// which supports every driver. [`register`](Self::register) prepends, so
/// the fallback always stays last.
pub struct IntrospectorRegistry {
    introspectors: Vec<Box<dyn SchemaIntrospector>>,
}

impl IntrospectorRegistry {
    /// The SQL introspector followed by the catch-all fallback.
    pub fn new() -> Self {
        Self {
            introspectors: vec![
                Box::new(SqlSchemaIntrospector),
                Box::new(FallbackSchemaIntrospector),
            ],
        }
    }

    /// A registry without any introspector; every lookup fails.
    pub fn empty() -> Self {
        Self {
            introspectors: Vec::new(),
        }
    }

    /// Register an introspector ahead of all existing ones.
    pub fn register(&mut self, introspector: impl SchemaIntrospector + 'static) {
        self.introspectors.insert(0, Box::new(introspector));
    }

    pub fn with(mut self, introspector: impl SchemaIntrospector + 'static) -> Self {
        self.register(introspector);
        self
    }

    /// First introspector claiming the driver.
    pub fn for_driver(&self, driver: &str) -> Option<&dyn SchemaIntrospector> {
        self.introspectors
            .iter()
            .find(|i| i.supports(driver))
            .map(|i| i.as_ref())
    }

    /// Introspector names in lookup order.
    pub fn names(&self) -> Vec<&'static str> {
        self.introspectors.iter().map(|i| i.name()).collect()
    }
}

impl Default for IntrospectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
