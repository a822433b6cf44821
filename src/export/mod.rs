//! Read-only renderers for [`ReportStats`].

mod csv;

pub use self::csv::render_csv;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ReportError, Result};
use crate::model::DateLike;
use crate::pdf::{build_report_pages, write_pdf};
use crate::report::{DateRange, ReportStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

/// `financial-report-{from}-to-{to}.{ext}`
pub fn report_file_name(range: &DateRange, format: ExportFormat) -> String {
    let (from, to) = range.labels();
    format!("financial-report-{from}-to-{to}.{}", format.extension())
}

/// Labels shown on the PDF title block.
#[derive(Debug, Clone)]
pub struct ExportContext {
    pub organization: String,
    pub currency_symbol: String,
    pub generated_date: String,
}

/// Render `stats` in `format` to `output_path`.
pub fn export_report(
    stats: &ReportStats,
    format: ExportFormat,
    context: &ExportContext,
    output_path: &Path,
) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let text = render_csv(stats)?;
            fs::write(output_path, text)?;
        }
        ExportFormat::Pdf => {
            let pages = build_report_pages(stats, context);
            write_pdf(&pages, output_path)?;
        }
    }
    tracing::info!(path = %output_path.display(), ?format, "exported report");
    Ok(())
}

/// Two-decimal money without a symbol.
pub fn money(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{value:.2}")
}

pub fn display_date(date: Option<&DateLike>) -> String {
    date.and_then(DateLike::to_datetime)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn text_or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "N/A".to_string(),
    }
}

/// Financial summary rows in display order.
pub fn summary_rows(stats: &ReportStats) -> Vec<(&'static str, f64)> {
    vec![
        ("Total Income", stats.total_income),
        ("Donations", stats.donation_total),
        ("Subscriptions", stats.subscription_total),
        ("Total Expense", stats.total_expense),
        ("Net Balance", stats.net_balance),
        ("Member Payments", stats.member_payment_total),
        ("Collected (payments + donations)", stats.collected),
        ("Expected Revenue", stats.expected),
        ("Average Per Member", stats.average_per_member),
    ]
}

/// Record count rows in display order.
pub fn count_rows(stats: &ReportStats) -> Vec<(&'static str, usize)> {
    vec![
        ("Member Payments", stats.payments_count),
        ("Donations", stats.donations_count),
        ("Subscriptions", stats.invoices_count),
        ("Expenses", stats.expenses_count),
        ("Transactions", stats.transaction_count),
    ]
}
