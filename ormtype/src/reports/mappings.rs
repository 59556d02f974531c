//! Mappings command report data structures.

use super::output::{Output, Report};

/// Database type to TypeScript mapping table.
#[derive(Debug)]
pub struct MappingsReport {
    /// Registered mappers in lookup order.
    pub mappers: Vec<String>,
    /// `[mappings.custom]` entries.
    pub custom: Vec<(String, String)>,
    /// Built-in db types with the type they resolve to.
    pub defaults: Vec<MappingRow>,
    /// `[mappings.standalone]` aliases.
    pub standalone: Vec<(String, String)>,
    pub timestamps_as_date: bool,
}

#[derive(Debug)]
pub struct MappingRow {
    pub db_type: String,
    pub ts_type: String,
    /// Shadowed by a custom mapping
    pub custom: bool,
}

fn width<'a>(keys: impl Iterator<Item = &'a str>) -> usize {
    keys.map(str::len).max().unwrap_or(0)
}

impl Report for MappingsReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("Mappers: {}", self.mappers.join(" → ")));
        if self.timestamps_as_date {
            out.preformatted("Timestamps resolve to Date");
        }
        out.newline();

        if !self.custom.is_empty() {
            out.section("Custom");
            let pad = width(self.custom.iter().map(|(db, _)| db.as_str()));
            for (db_type, ts_type) in &self.custom {
                out.preformatted(&format!("  {:<pad$}  {}", db_type, ts_type));
            }
            out.newline();
        }

        out.section("Database types");
        let pad = width(self.defaults.iter().map(|row| row.db_type.as_str()));
        for row in &self.defaults {
            let marker = if row.custom { "  (custom)" } else { "" };
            out.preformatted(&format!(
                "  {:<pad$}  {}{}",
                row.db_type, row.ts_type, marker
            ));
        }

        if !self.standalone.is_empty() {
            out.newline();
            out.section("Standalone types");
            for (name, definition) in &self.standalone {
                out.preformatted(&format!("  {} = {}", name, definition));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_marks_custom_rows() {
        let report = MappingsReport {
            mappers: vec!["default".into()],
            custom: vec![("decimal".into(), "string".into())],
            defaults: vec![
                MappingRow {
                    db_type: "decimal".into(),
                    ts_type: "string".into(),
                    custom: true,
                },
                MappingRow {
                    db_type: "json".into(),
                    ts_type: "Record<string, unknown>".into(),
                    custom: false,
                },
            ],
            standalone: Vec::new(),
            timestamps_as_date: false,
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(out.stdout.contains("Custom:\n  decimal  string\n"));
        assert!(out.stdout.contains("  decimal  string  (custom)\n"));
        assert!(out.stdout.contains("  json     Record<string, unknown>\n"));
        assert!(!out.stdout.contains("Standalone"));
    }
}
