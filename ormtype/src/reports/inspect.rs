//! Inspect command report data structures.

use ormtype_core::ModelMetadata;

use super::output::{Output, Report};

/// Metadata extracted for one model.
#[derive(Debug)]
pub struct InspectReport {
    pub metadata: ModelMetadata,
    /// Driver of the connection the model resolves to.
    pub driver: String,
    /// Introspector that produced the columns.
    pub introspector: String,
    pub relations_enabled: bool,
    pub max_depth: u32,
    /// Render the metadata as JSON instead of a summary.
    pub json: Option<String>,
}

fn flags(parts: &[(bool, &str)]) -> Vec<String> {
    parts
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, label)| label.to_string())
        .collect()
}

impl Report for InspectReport {
    fn render(&self, out: &mut dyn Output) {
        if let Some(json) = &self.json {
            out.preformatted(json);
            return;
        }

        let meta = &self.metadata;
        out.newline();
        out.preformatted(&format!("  {}", meta.qualified_name));
        out.preformatted(&format!("  {}", "─".repeat(meta.qualified_name.len())));
        out.newline();

        out.preformatted(&format!("  Table        {}", meta.table));
        out.preformatted(&format!(
            "  Connection   {} ({} via {})",
            meta.connection.as_deref().unwrap_or("default"),
            self.driver,
            self.introspector
        ));
        let incrementing = if meta.incrementing { ", incrementing" } else { "" };
        out.preformatted(&format!(
            "  Primary key  {} ({}{})",
            meta.primary_key, meta.key_type, incrementing
        ));
        out.preformatted(&format!(
            "  Timestamps   {}",
            if meta.timestamps { "yes" } else { "no" }
        ));
        let relations = if self.relations_enabled {
            format!("enabled (max depth {})", self.max_depth)
        } else {
            "disabled".to_string()
        };
        out.preformatted(&format!("  Relations    {}", relations));
        out.newline();

        out.preformatted("  Columns");
        out.preformatted("  ───────");
        let pad = meta.columns.iter().map(|c| c.name.len()).max().unwrap_or(0);
        for column in &meta.columns {
            let mut notes = flags(&[
                (column.primary_key, "primary key"),
                (column.nullable, "nullable"),
                (column.hidden, "hidden"),
                (column.fillable, "fillable"),
                (column.timestamp, "timestamp"),
                (column.appended, "appended"),
            ]);
            if let Some(cast) = &column.cast_type {
                notes.push(format!("cast {}", cast));
            }
            if let Some(forced) = &column.forced_type {
                notes.push(format!("forced {}", forced));
            }
            out.preformatted(&format!(
                "  {:<pad$}  {:<10}  {}",
                column.name,
                column.db_type,
                notes.join(", ")
            ));
        }

        if !meta.accessors.is_empty() {
            out.newline();
            out.preformatted("  Accessors");
            out.preformatted("  ─────────");
            for accessor in &meta.accessors {
                let returns = accessor.return_type.as_deref().unwrap_or("?");
                let nullable = if accessor.nullable { " (nullable)" } else { "" };
                out.preformatted(&format!(
                    "  {}: {} [{}]{}",
                    accessor.name,
                    returns,
                    accessor.style.as_str(),
                    nullable
                ));
            }
        }

        if !meta.relations.is_empty() {
            out.newline();
            out.preformatted("  Relations");
            out.preformatted("  ─────────");
            for relation in &meta.relations {
                out.preformatted(&format!(
                    "  {}  {} → {}",
                    relation.name,
                    relation.kind.as_str(),
                    relation.related
                ));
            }
        }

        if !meta.sums.is_empty() {
            out.newline();
            out.preformatted("  Sums");
            out.preformatted("  ────");
            for (relation, column) in &meta.sums {
                out.preformatted(&format!("  {}.{}", relation, column));
            }
        }
    }
}
