//! Table output formatting for CLI commands
//!
//! Renders yearly summaries and calendars using comfy-table, highlighting
//! the best and current years.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{ActivitySeries, Summary};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format a yearly summary, one row per year in listed order
    pub fn format_summary(&self, summary: &Summary) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Year").add_attribute(Attribute::Bold),
            Cell::new("Contributions").add_attribute(Attribute::Bold),
            Cell::new("").add_attribute(Attribute::Bold),
        ]);

        let best = summary.best_year().map(|y| y.value);

        for year in &summary.years {
            let mut notes = Vec::new();
            if year.current {
                notes.push("current");
            }
            if Some(year.value) == best {
                notes.push("best");
            }

            let mut count = Cell::new(year.contribs).set_alignment(CellAlignment::Right);
            if self.use_colors && Some(year.value) == best {
                count = count.fg(Color::Green).add_attribute(Attribute::Bold);
            }

            table.add_row(vec![
                Cell::new(year.value),
                count,
                Cell::new(notes.join(", ")),
            ]);
        }

        table.to_string()
    }

    /// Format a calendar as one row per week
    pub fn format_calendar(&self, series: &ActivitySeries) -> String {
        let mut table = self.create_base_table();
        let mut header = vec![Cell::new("Week of").add_attribute(Attribute::Bold)];
        header.extend(
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                .into_iter()
                .map(|d| Cell::new(d).add_attribute(Attribute::Bold)),
        );
        table.set_header(header);

        for week in series.chunks(7) {
            let mut row = vec![Cell::new(week.first().map_or("", |d| d.date.as_str()))];
            row.extend(week.iter().map(|day| {
                let cell = Cell::new(day.count).set_alignment(CellAlignment::Right);
                if self.use_colors && day.count > 0 {
                    cell.fg(Color::Green)
                } else {
                    cell
                }
            }));
            table.add_row(row);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}
