pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod pdf;
pub mod report;
pub mod source;

pub use config::{Config, OrganizationSettings, ReportSettings};
pub use error::{ReportError, Result};
pub use export::{export_report, render_csv, report_file_name, ExportContext, ExportFormat};
pub use model::{Donation, Expense, Invoice, Member, Payment, Sources};
pub use report::{compose, DateRange, ReportQuery, ReportStats, ReportStore};
