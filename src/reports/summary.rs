//! Plain-text report generator for shell output.
//!
//! Counts, warnings, then a flat `reference: value` listing per bucket.

use super::escape::{escape_terminal, or_dash};
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangedComponent, ReconciliationResult};
use crate::model::{ComponentRecord, RecordSet};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Text reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn record_line(&self, marker: &str, color: &str, record: &ComponentRecord) -> String {
        format!(
            "  {} {}: {} (qty {})",
            self.color(marker, color),
            escape_terminal(&record.reference),
            escape_terminal(or_dash(&record.part_number)),
            record.quantity
        )
    }

    fn changed_line(&self, change: &ChangedComponent) -> String {
        let deltas = change
            .changed_fields()
            .map(|d| {
                format!(
                    "{} {} → {}",
                    d.field,
                    escape_terminal(or_dash(&d.old)),
                    escape_terminal(or_dash(&d.new))
                )
            })
            .collect::<Vec<_>>()
            .join("; ");
        format!(
            "  {} {}: {}",
            self.color("~", "yellow"),
            escape_terminal(&change.reference),
            deltas
        )
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        result: &ReconciliationResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let stats = &result.statistics;
        let mut lines = Vec::new();

        lines.push(self.color(&escape_terminal(&config.title_or_default()), "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} → {}",
            self.color("Files:", "cyan"),
            escape_terminal(config.old_label()),
            escape_terminal(config.new_label())
        ));
        lines.push(format!(
            "{}   {} → {} components",
            self.color("Size:", "cyan"),
            stats.old_count,
            stats.new_count
        ));
        lines.push(String::new());

        lines.push(self.color("Changes:", "bold"));
        if stats.added_count > 0 {
            lines.push(format!(
                "  {} added",
                self.color(&format!("+{}", stats.added_count), "green")
            ));
        }
        if stats.removed_count > 0 {
            lines.push(format!(
                "  {} removed",
                self.color(&format!("-{}", stats.removed_count), "red")
            ));
        }
        if stats.changed_count > 0 {
            lines.push(format!(
                "  {} changed",
                self.color(&format!("~{}", stats.changed_count), "yellow")
            ));
        }
        if result.is_empty_comparison() {
            lines.push(format!("  {}", self.color("Nothing to compare", "dim")));
        } else if !result.has_changes() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }
        lines.push(format!(
            "  {} {} unchanged",
            stats.unchanged_count,
            plural(stats.unchanged_count, "component", "components")
        ));
        lines.push(format!("Total changes: {}", stats.total_changes));

        if result.has_warnings() {
            lines.push(String::new());
            lines.push(self.color("Warnings:", "bold"));
            for warning in &result.validation_warnings {
                lines.push(format!(
                    "  {} {}",
                    self.color("!", "yellow"),
                    escape_terminal(warning)
                ));
            }
        }

        if !result.added.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Added:", "bold"));
            for record in &result.added {
                lines.push(self.record_line("+", "green", record));
            }
        }
        if !result.removed.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Removed:", "bold"));
            for record in &result.removed {
                lines.push(self.record_line("-", "red", record));
            }
        }
        if !result.changed.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Changed:", "bold"));
            for change in &result.changed {
                lines.push(self.changed_line(change));
            }
        }
        if config.include_unchanged {
            if let Some(unchanged) = result.unchanged.as_ref().filter(|u| !u.is_empty()) {
                lines.push(String::new());
                lines.push(self.color("Unchanged:", "bold"));
                for record in unchanged {
                    lines.push(self.record_line("=", "dim", record));
                }
            }
        }

        Ok(lines.join("\n"))
    }

    fn generate_view_report(
        &self,
        records: &RecordSet,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let title = config
            .title
            .clone()
            .unwrap_or_else(|| format!("BOM: {}", records.source));

        lines.push(self.color(&escape_terminal(&title), "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        if let Some(kind) = records.kind {
            lines.push(format!("{}  {}", self.color("Kind:", "cyan"), kind));
        }
        lines.push(format!(
            "{} {} {}",
            self.color("Count:", "cyan"),
            records.len(),
            plural(records.len(), "record", "records")
        ));
        lines.push(String::new());

        for record in records {
            lines.push(format!(
                "  {:<8} {:<20} {:>5}  {:<12} {}",
                escape_terminal(or_dash(&record.reference)),
                escape_terminal(or_dash(&record.part_number)),
                record.quantity,
                escape_terminal(or_dash(&record.footprint)),
                escape_terminal(&record.description)
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }
}
