//! Console output: the summary tables and the final run message.

use opsdash_common::{format_currency, format_hour, DataLoadError, ExportError, RenderError};
use opsdash_data::AggregateViews;
use opsdash_graphs::{PanelOutcome, RenderReport};
use std::fmt;
use std::path::PathBuf;

const RULE_WIDTH: usize = 44;

/// Branch, peak-hour and service tables printed after aggregation.
pub struct ConsoleReport<'a> {
    views: &'a AggregateViews,
    currency_symbol: &'a str,
}

impl<'a> ConsoleReport<'a> {
    /// Creates a report over computed views.
    #[must_use]
    pub const fn new(views: &'a AggregateViews, currency_symbol: &'a str) -> Self {
        Self {
            views,
            currency_symbol,
        }
    }

    fn money(&self, amount: opsdash_common::Money) -> String {
        format_currency(amount, self.currency_symbol)
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let lead = format!("── {title} ");
    let fill = RULE_WIDTH.saturating_sub(lead.chars().count());
    writeln!(f)?;
    writeln!(f, "{lead}{}", "─".repeat(fill))
}

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "Branch Summary")?;
        writeln!(f, "{:<20} {:>14} {:>12} {:>8}", "branch", "revenue", "appointments", "records")?;
        for row in self.views.branches.rows() {
            writeln!(
                f,
                "{:<20} {:>14} {:>12} {:>8}",
                row.name,
                self.money(row.revenue),
                row.appointments,
                row.records
            )?;
        }

        section(f, "Peak Hours")?;
        writeln!(f, "{:<6} {:>14} {:>12}", "hour", "revenue", "appointments")?;
        let hourly = self.views.heatmap.hourly_totals();
        for (hour, total) in (0u8..).zip(hourly) {
            if total.is_vacant() {
                continue;
            }
            writeln!(
                f,
                "{:<6} {:>14} {:>12}",
                format_hour(hour),
                self.money(total.revenue),
                total.appointments
            )?;
        }

        section(f, "Service Breakdown")?;
        writeln!(f, "{:<20} {:>14} {:>8}", "service", "revenue", "share")?;
        let shares = self.views.services.shares();
        for (row, share) in self.views.services.rows().iter().zip(shares) {
            writeln!(
                f,
                "{:<20} {:>14} {:>7.1}%",
                row.name,
                self.money(row.revenue),
                share
            )?;
        }
        Ok(())
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Input file that was loaded.
    pub source: PathBuf,
    /// Records kept.
    pub records: usize,
    /// Rows skipped by the lenient loader.
    pub skipped: usize,
    /// Dashboard render result.
    pub render: Result<RenderReport, RenderError>,
    /// Files the exporter wrote or failed to write.
    pub exports: opsdash_data::ExportReport,
}

impl RunSummary {
    /// Whether the dashboard image and every export were written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.render.is_ok() && self.exports.is_success()
    }

    /// Every output failure, as display strings.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        let mut failures = Vec::new();
        if let Err(err) = &self.render {
            failures.push(err.to_string());
        }
        failures.extend(self.exports.failures.iter().map(ExportError::to_string));
        failures
    }

    /// One-paragraph message listing outputs and failures.
    #[must_use]
    pub fn message(&self) -> String {
        let mut lines = vec![format!(
            "Loaded {} records from {} ({} skipped)",
            self.records,
            self.source.display(),
            self.skipped
        )];

        match &self.render {
            Ok(report) => {
                let placeholders = report
                    .panels
                    .iter()
                    .filter(|panel| matches!(panel.outcome, PanelOutcome::Placeholder(_)))
                    .count();
                lines.push(format!(
                    "Dashboard saved to {} ({} rendered, {} placeholder, {} failed panels)",
                    report.path.display(),
                    report.rendered_count(),
                    placeholders,
                    report.failures().count()
                ));
            }
            Err(_) => lines.push("Dashboard was not written".to_string()),
        }

        lines.push(format!("Exported {} report files", self.exports.written.len()));
        lines.extend(self.exports.written.iter().map(|path| format!("  {}", path.display())));

        let failures = self.failures();
        if failures.is_empty() {
            lines.push("All outputs written".to_string());
        } else {
            lines.push(format!("{} output failures:", failures.len()));
            lines.extend(failures.iter().map(|failure| format!("  {failure}")));
        }
        lines.join("\n")
    }
}

/// Human-readable line for a load failure.
#[must_use]
pub fn load_failure_message(err: &DataLoadError) -> String {
    match err {
        DataLoadError::NotFound { path } => format!(
            "Input file {} does not exist. Pass --input or set input.path in the config.",
            path.display()
        ),
        other => format!("Could not load input data: {other}"),
    }
}
