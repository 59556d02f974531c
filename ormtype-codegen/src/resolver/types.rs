//! Column and accessor type resolution.
//!
//! Columns go through five levels, first match wins:
//!
//! 1. forced override
//! 2. enum cast (plain or wrapped in an enum collection cast)
//! 3. non-enum cast table
//! 4. database type (timestamps as `Date`, custom mappings, mapper registry)
//! 5. `unknown`
//!
//! Accessors use a shorter chain: forced override, enum return type,
//! declared return type table, `unknown`.

use ormtype_core::{
    AccessorDefinition, ColumnDefinition, Provenance, TypeMapper, TypeMapperRegistry, TypeResult,
};
use ormtype_manifest::GenerationConfig;

use super::build_enum;
use crate::adapters::EnumCatalog;

const RECORD: &str = "Record<string, unknown>";

/// Cast names and the TypeScript type they produce.
pub const CAST_TYPES: &[(&str, &str)] = &[
    ("int", "number"),
    ("integer", "number"),
    ("real", "number"),
    ("float", "number"),
    ("double", "number"),
    ("decimal", "number"),
    ("string", "string"),
    ("bool", "boolean"),
    ("boolean", "boolean"),
    ("array", RECORD),
    ("json", RECORD),
    ("object", RECORD),
    ("collection", RECORD),
    ("date", "string"),
    ("datetime", "string"),
    ("immutable_date", "string"),
    ("immutable_datetime", "string"),
    ("timestamp", "string"),
    ("encrypted", "string"),
    ("hashed", "string"),
    ("encrypted:array", RECORD),
    ("encrypted:collection", RECORD),
    ("encrypted:object", RECORD),
];

/// Cast classes wrapping a collection of enum values (`Wrapper:EnumClass`).
pub const ENUM_COLLECTION_CASTS: &[&str] = &[
    "Illuminate\\Database\\Eloquent\\Casts\\AsEnumCollection",
    "Illuminate\\Database\\Eloquent\\Casts\\AsEnumArrayObject",
];

/// Declared accessor return types and the TypeScript type they produce.
pub const RETURN_TYPES: &[(&str, &str)] = &[
    ("string", "string"),
    ("int", "number"),
    ("float", "number"),
    ("bool", "boolean"),
    ("array", RECORD),
    ("object", RECORD),
    ("null", "null"),
    ("true", "true"),
    ("false", "false"),
    ("mixed", "unknown"),
    ("void", "void"),
    ("Carbon\\Carbon", "string"),
    ("Carbon\\CarbonImmutable", "string"),
    ("Illuminate\\Support\\Carbon", "string"),
    ("DateTime", "string"),
    ("DateTimeImmutable", "string"),
    ("DateTimeInterface", "string"),
    ("Illuminate\\Support\\Collection", "unknown[]"),
];

/// Inputs shared by every resolution in one run.
#[derive(Clone, Copy)]
pub struct ResolverContext<'a> {
    pub config: &'a GenerationConfig,
    pub catalog: &'a dyn EnumCatalog,
}

impl<'a> ResolverContext<'a> {
    pub fn new(config: &'a GenerationConfig, catalog: &'a dyn EnumCatalog) -> Self {
        Self { config, catalog }
    }
}

/// Resolves columns and accessors to TypeScript types.
pub struct TypeResolver {
    mappers: TypeMapperRegistry,
}

impl TypeResolver {
    pub fn new() -> Self {
        Self::with_registry(TypeMapperRegistry::new())
    }

    pub fn with_registry(mappers: TypeMapperRegistry) -> Self {
        Self { mappers }
    }

    /// Register a database type mapper ahead of the existing ones.
    pub fn register(&mut self, mapper: impl TypeMapper + 'static) {
        self.mappers.register(mapper);
    }

    pub fn registry(&self) -> &TypeMapperRegistry {
        &self.mappers
    }

    pub fn resolve_column(&self, column: &ColumnDefinition, ctx: &ResolverContext) -> TypeResult {
        if let Some(forced) = &column.forced_type {
            return TypeResult::new(forced, column.nullable, Provenance::Override);
        }

        if let Some(cast) = column.cast_type.as_deref() {
            if let Some(result) = Self::enum_cast(cast, column.nullable, ctx) {
                return result;
            }
            if let Some(ts_type) = cast_type(cast) {
                return TypeResult::new(ts_type, column.nullable, Provenance::Cast);
            }
        }

        self.db_type(column, ctx)
    }

    pub fn resolve_accessor(
        &self,
        accessor: &AccessorDefinition,
        ctx: &ResolverContext,
    ) -> TypeResult {
        if let Some(forced) = &accessor.forced_type {
            return TypeResult::new(forced, accessor.nullable, Provenance::Override);
        }

        let enum_class = accessor
            .enum_class
            .as_deref()
            .or(accessor.return_type.as_deref());
        if let Some(source) = enum_class.and_then(|class| ctx.catalog.find(class)) {
            let def = build_enum(source);
            return TypeResult::new(&def.short_name, accessor.nullable, Provenance::Accessor)
                .with_enum(def);
        }

        match accessor.return_type.as_deref().and_then(return_type) {
            Some(ts_type) => TypeResult::new(ts_type, accessor.nullable, Provenance::Accessor),
            None => TypeResult::unknown(accessor.nullable),
        }
    }

    fn enum_cast(cast: &str, nullable: bool, ctx: &ResolverContext) -> Option<TypeResult> {
        let cast = cast.trim_start_matches('\\');

        let wrapped = cast.split_once(':').and_then(|(wrapper, class)| {
            ENUM_COLLECTION_CASTS
                .contains(&wrapper)
                .then_some(class)
        });
        let (class, collection) = match wrapped {
            Some(class) => (class, true),
            None => (cast, false),
        };

        let source = ctx.catalog.find(class)?;
        let def = build_enum(source);
        let result = if collection {
            TypeResult::array(&def.short_name, nullable, Provenance::EnumCast)
        } else {
            TypeResult::new(&def.short_name, nullable, Provenance::EnumCast)
        };
        Some(result.with_enum(def))
    }

    fn db_type(&self, column: &ColumnDefinition, ctx: &ResolverContext) -> TypeResult {
        let mappings = &ctx.config.mappings;

        if column.timestamp && mappings.timestamps_as_date {
            return TypeResult::new("Date", column.nullable, Provenance::DbType);
        }

        let custom = mappings
            .custom
            .iter()
            .find(|(db_type, _)| db_type.eq_ignore_ascii_case(&column.db_type));
        if let Some((_, ts_type)) = custom {
            return TypeResult::new(ts_type, column.nullable, Provenance::CustomMapping);
        }

        if self.mappers.supports(&column.db_type) {
            let ts_type = self.mappers.resolve(&column.db_type, &[]);
            return TypeResult::new(ts_type, column.nullable, Provenance::DbType);
        }

        TypeResult::unknown(column.nullable)
    }
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up a non-enum cast, ignoring `:parameters`.
fn cast_type(cast: &str) -> Option<&'static str> {
    let lowered = cast.to_ascii_lowercase();
    let lookup = |name: &str| {
        CAST_TYPES
            .iter()
            .find(|(cast, _)| *cast == name)
            .map(|(_, ts_type)| *ts_type)
    };

    lookup(&lowered).or_else(|| {
        let base = lowered.split(':').next().unwrap_or(&lowered);
        lookup(base)
    })
}

fn return_type(declared: &str) -> Option<&'static str> {
    let declared = declared.trim_start_matches('?').trim_start_matches('\\');
    RETURN_TYPES
        .iter()
        .find(|(name, _)| *name == declared)
        .map(|(_, ts_type)| *ts_type)
}
