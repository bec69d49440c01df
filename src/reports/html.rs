//! HTML report generator.
//!
//! Produces a single self-contained page: inline CSS, a summary table and a
//! changes table. Added rows carry the `added` class, removed rows `deleted`
//! and differing cells of changed rows `changed`.

use super::escape::{escape_html, escape_html_attr};
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangedComponent, ReconciliationResult, Statistics};
use crate::model::{ComponentRecord, RecordSet, TrackedField};
use std::fmt::Write;

/// HTML report generator
pub struct HtmlReporter {
    /// Include inline CSS
    include_styles: bool,
}

impl HtmlReporter {
    /// Create a new HTML reporter
    pub fn new() -> Self {
        Self {
            include_styles: true,
        }
    }

    /// Leave out the inline stylesheet (for embedding in another page)
    #[must_use]
    pub fn without_styles(mut self) -> Self {
        self.include_styles = false;
        self
    }

    fn get_styles(&self) -> &'static str {
        r#"
        <style>
            body {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                line-height: 1.6;
                max-width: 1100px;
                margin: 0 auto;
                padding: 20px;
                color: #24292e;
            }

            h1 {
                border-bottom: 1px solid #eee;
                padding-bottom: 10px;
            }

            table {
                border-collapse: collapse;
                width: 100%;
                margin-bottom: 24px;
            }

            th, td {
                border: 1px solid #e1e4e8;
                padding: 6px 10px;
                text-align: left;
                vertical-align: top;
            }

            th {
                background-color: #f6f8fa;
            }

            .added { background-color: #e6ffed; color: #22863a; }
            .deleted { background-color: #ffeef0; color: #cb2431; }
            .changed { background-color: #fff5b1; color: #735c0f; }

            .old { text-decoration: line-through; opacity: 0.7; }

            .warnings li { color: #b08800; }

            footer {
                color: #6a737d;
                font-size: 0.9em;
            }
        </style>
        "#
    }

    fn write_head(&self, html: &mut String, title: &str) -> Result<(), ReportError> {
        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "    <meta charset=\"UTF-8\">")?;
        writeln!(
            html,
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(html, "    <title>{}</title>", escape_html(title))?;
        if self.include_styles {
            writeln!(html, "{}", self.get_styles())?;
        }
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<h1>{}</h1>", escape_html(title))?;
        Ok(())
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_footer(html: &mut String) -> Result<(), ReportError> {
    writeln!(
        html,
        "<footer><p>Generated by {} v{} on {}</p></footer>",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(())
}

fn write_summary_table(html: &mut String, stats: &Statistics) -> Result<(), ReportError> {
    writeln!(html, "<h2>Summary</h2>")?;
    writeln!(html, "<table class=\"summary\">")?;
    for (label, value, class) in [
        ("Old components", stats.old_count, ""),
        ("New components", stats.new_count, ""),
        ("Added", stats.added_count, "added"),
        ("Removed", stats.removed_count, "deleted"),
        ("Changed", stats.changed_count, "changed"),
        ("Unchanged", stats.unchanged_count, ""),
        ("Total changes", stats.total_changes, ""),
    ] {
        if class.is_empty() {
            writeln!(html, "    <tr><th>{label}</th><td>{value}</td></tr>")?;
        } else {
            writeln!(
                html,
                "    <tr><th>{label}</th><td class=\"{class}\">{value}</td></tr>"
            )?;
        }
    }
    writeln!(html, "</table>")?;
    Ok(())
}

fn write_table_header(html: &mut String, first: Option<&str>) -> Result<(), ReportError> {
    writeln!(html, "<table class=\"changes\">")?;
    write!(html, "    <tr>")?;
    if let Some(first) = first {
        write!(html, "<th>{first}</th>")?;
    }
    write!(html, "<th>Reference</th>")?;
    for field in TrackedField::ALL {
        write!(html, "<th>{}</th>", field.label())?;
    }
    writeln!(html, "</tr>")?;
    Ok(())
}

fn write_record_row(
    html: &mut String,
    label: Option<&str>,
    class: &str,
    record: &ComponentRecord,
) -> Result<(), ReportError> {
    write!(
        html,
        "    <tr class=\"{}\" data-ref=\"{}\">",
        class,
        escape_html_attr(&record.reference)
    )?;
    if let Some(label) = label {
        write!(html, "<td>{label}</td>")?;
    }
    write!(html, "<td>{}</td>", escape_html(&record.reference))?;
    for field in TrackedField::ALL {
        write!(html, "<td>{}</td>", escape_html(&record.field_text(field)))?;
    }
    writeln!(html, "</tr>")?;
    Ok(())
}

fn write_changed_row(html: &mut String, change: &ChangedComponent) -> Result<(), ReportError> {
    write!(
        html,
        "    <tr data-ref=\"{}\"><td class=\"changed\">Changed</td><td>{}</td>",
        escape_html_attr(&change.reference),
        escape_html(&change.reference)
    )?;
    for delta in &change.fields {
        if delta.differs {
            write!(
                html,
                "<td class=\"changed\"><span class=\"old\">{}</span> → {}</td>",
                escape_html(&delta.old),
                escape_html(&delta.new)
            )?;
        } else {
            write!(html, "<td>{}</td>", escape_html(&delta.new))?;
        }
    }
    writeln!(html, "</tr>")?;
    Ok(())
}

impl ReportGenerator for HtmlReporter {
    fn generate_diff_report(
        &self,
        result: &ReconciliationResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut html = String::new();
        let title = config.title_or_default();

        self.write_head(&mut html, &title)?;
        writeln!(
            html,
            "<p><strong>Old file:</strong> {}</p>",
            escape_html(config.old_label())
        )?;
        writeln!(
            html,
            "<p><strong>New file:</strong> {}</p>",
            escape_html(config.new_label())
        )?;

        write_summary_table(&mut html, &result.statistics)?;

        if result.has_warnings() {
            writeln!(html, "<h2>Warnings</h2>")?;
            writeln!(html, "<ul class=\"warnings\">")?;
            for warning in &result.validation_warnings {
                writeln!(html, "    <li>{}</li>", escape_html(warning))?;
            }
            writeln!(html, "</ul>")?;
        }

        writeln!(html, "<h2>Changes</h2>")?;
        if result.has_changes() {
            write_table_header(&mut html, Some("Change"))?;
            for record in &result.added {
                write_record_row(&mut html, Some("Added"), "added", record)?;
            }
            for record in &result.removed {
                write_record_row(&mut html, Some("Removed"), "deleted", record)?;
            }
            for change in &result.changed {
                write_changed_row(&mut html, change)?;
            }
            writeln!(html, "</table>")?;
        } else if result.is_empty_comparison() {
            writeln!(html, "<p>Neither file contained any components.</p>")?;
        } else {
            writeln!(html, "<p>No differences found.</p>")?;
        }

        if config.include_unchanged {
            if let Some(unchanged) = result.unchanged.as_ref().filter(|u| !u.is_empty()) {
                writeln!(html, "<h2>Unchanged</h2>")?;
                write_table_header(&mut html, None)?;
                for record in unchanged {
                    write_record_row(&mut html, None, "", record)?;
                }
                writeln!(html, "</table>")?;
            }
        }

        write_footer(&mut html)?;
        Ok(html)
    }

    fn generate_view_report(
        &self,
        records: &RecordSet,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut html = String::new();
        let title = config
            .title
            .clone()
            .unwrap_or_else(|| format!("BOM: {}", records.source));

        self.write_head(&mut html, &title)?;
        writeln!(html, "<p>{} record(s)</p>", records.len())?;
        write_table_header(&mut html, None)?;
        for record in records {
            write_record_row(&mut html, None, "", record)?;
        }
        writeln!(html, "</table>")?;
        write_footer(&mut html)?;
        Ok(html)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }
}
