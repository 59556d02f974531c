//! Mappings operation - db type table as the resolver sees it.

use ormtype_codegen::resolver::{ResolverContext, TypeResolver};
use ormtype_core::{ColumnDefinition, DefaultTypeMapper, Provenance};
use ormtype_manifest::GenerationConfig;

use crate::reports::{MappingRow, MappingsReport};

/// Resolve every built-in db type through the same chain a column would take.
pub fn mappings(config: &GenerationConfig) -> MappingsReport {
    let resolver = TypeResolver::new();
    let ctx = ResolverContext::new(config, &());

    let defaults = DefaultTypeMapper::MAPPINGS
        .iter()
        .map(|(db_type, _)| {
            let typed = resolver.resolve_column(&ColumnDefinition::new(*db_type, *db_type), &ctx);
            MappingRow {
                db_type: db_type.to_string(),
                ts_type: typed.ts_type,
                custom: typed.provenance == Provenance::CustomMapping,
            }
        })
        .collect();

    MappingsReport {
        mappers: resolver
            .registry()
            .names()
            .into_iter()
            .map(String::from)
            .collect(),
        custom: pairs(&config.mappings.custom),
        defaults,
        standalone: pairs(&config.mappings.standalone),
        timestamps_as_date: config.mappings.timestamps_as_date,
    }
}

fn pairs<'a>(map: impl IntoIterator<Item = (&'a String, &'a String)>) -> Vec<(String, String)> {
    map.into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
