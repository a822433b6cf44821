use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use member_reports::config::{
    config_dir, data_dir, load_config, resolve_output_dir, CONFIG_TEMPLATE,
};
use member_reports::error::{ReportError, Result};
use member_reports::export::{
    count_rows, display_date, export_report, report_file_name, summary_rows, text_or_na,
    ExportContext, ExportFormat,
};
use member_reports::report::{
    expense_amount, parse_money, payment_method_display, DateRange, ReportQuery, ReportStats,
    ReportStore,
};
use member_reports::source::{fetch_all, init_snapshots, load_sources};
use member_reports::Config;

#[derive(Parser)]
#[command(name = "member-reports")]
#[command(version, about = "Financial reports for membership organizations", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.member-reports or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config and empty snapshots
    Init,

    /// Refresh local snapshots from the membership backend
    Fetch,

    /// Print the financial summary for a date range
    Summary {
        #[command(flatten)]
        window: Window,

        /// Also list every record counted in the report
        #[arg(long)]
        details: bool,
    },

    /// Export the financial report as CSV or PDF
    Export {
        #[command(flatten)]
        window: Window,

        /// Output format (csv, pdf)
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Custom output file path (default: output_dir/financial-report-FROM-to-TO.EXT)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the exported file with the system default viewer
        #[arg(long)]
        open: bool,
    },
}

#[derive(clap::Args)]
struct Window {
    /// Start of the report window (YYYY-MM-DD, default: January 1st this year)
    #[arg(long)]
    from: Option<String>,

    /// End of the report window, inclusive (YYYY-MM-DD, default: today)
    #[arg(long)]
    to: Option<String>,

    /// Organization id to scope the report to (default: organization.id from config)
    #[arg(long)]
    org: Option<String>,
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("member_reports=warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Fetch => cmd_fetch(&cfg_dir),
        Commands::Summary { window, details } => cmd_summary(&cfg_dir, &window, details),
        Commands::Export {
            window,
            format,
            output,
            open,
        } => cmd_export(&cfg_dir, &window, &format, output, open),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    init_snapshots(&data_dir(cfg_dir))?;

    println!("Initialized member-reports config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Set your organization and API:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Pull records from the backend:  member-reports fetch");
    println!(
        "     (or drop JSON exports into {}/)",
        data_dir(cfg_dir).display()
    );
    println!();
    println!("Then print a report:");
    println!("  member-reports summary --from 2025-01-01 --to 2025-12-31");

    Ok(())
}

/// Refresh snapshots from the backend
fn cmd_fetch(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let counts = fetch_all(&config.api, &data_dir(cfg_dir))?;

    println!("Fetched from {}", config.api.base_url.as_deref().unwrap_or(""));
    for (collection, count) in counts {
        println!("  {:<10} {}", collection.name(), count);
    }

    Ok(())
}

fn parse_date_arg(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ReportError::InvalidDate(value.to_string()))
}

/// Resolve CLI window flags and config into a report query.
fn build_query(config: &Config, window: &Window) -> Result<ReportQuery> {
    let today = Local::now().date_naive();

    let from = match &window.from {
        Some(s) => parse_date_arg(s)?,
        None => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
    };
    let to = match &window.to {
        Some(s) => parse_date_arg(s)?,
        None => today,
    };

    if from > to {
        return Err(ReportError::InvalidRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let organization_id = window
        .org
        .clone()
        .or_else(|| config.organization.id.clone());

    Ok(ReportQuery::new(DateRange::new(from, to), organization_id)
        .with_rates(config.subscriptions))
}

// Table row structs for tabled
#[derive(Tabled)]
struct AmountRow {
    #[tabled(rename = "METRIC")]
    label: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "RECORDS")]
    label: String,
    #[tabled(rename = "COUNT")]
    count: usize,
}

#[derive(Tabled)]
struct MethodRow {
    #[tabled(rename = "METHOD")]
    method: String,
    #[tabled(rename = "COUNT")]
    count: usize,
}

#[derive(Tabled)]
struct DetailRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "WHO / WHAT")]
    name: String,
    #[tabled(rename = "METHOD / STATUS")]
    kind: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

/// Insert thousands separators into a run of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a money amount with two decimal places and thousands separators
fn format_report_amount(value: f64, currency_symbol: &str) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
    format!("{sign}{currency_symbol}{}.{frac}", group_thousands(whole))
}

fn load_store(cfg_dir: &Path) -> Result<ReportStore> {
    let sources = load_sources(&data_dir(cfg_dir))?;
    Ok(ReportStore::new(sources))
}

/// Print the financial summary
fn cmd_summary(cfg_dir: &Path, window: &Window, details: bool) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let query = build_query(&config, window)?;
    let mut store = load_store(cfg_dir)?;
    let stats = store.stats(&query);
    let symbol = config.report.currency_symbol.as_str();
    let (from, to) = stats.range.labels();

    println!("Financial Report - {}", config.organization.name);
    println!("{}", "-".repeat(50));
    println!("Period:       {from} to {to}");
    if let Some(org) = &query.organization_id {
        println!("Organization: {org}");
    }
    println!();

    let amounts: Vec<AmountRow> = summary_rows(stats)
        .into_iter()
        .map(|(label, value)| AmountRow {
            label: label.to_string(),
            amount: format_report_amount(value, symbol),
        })
        .collect();
    println!("{}", Table::new(amounts).with(Style::rounded()));

    let counts: Vec<CountRow> = count_rows(stats)
        .into_iter()
        .map(|(label, count)| CountRow {
            label: label.to_string(),
            count,
        })
        .collect();
    println!("{}", Table::new(counts).with(Style::rounded()));

    let methods: Vec<MethodRow> = stats
        .method_mix
        .iter()
        .map(|m| MethodRow {
            method: m.label.clone(),
            count: m.value,
        })
        .collect();
    println!("{}", Table::new(methods).with(Style::rounded()));

    println!(
        "Collected {:.0}% of expected revenue",
        stats.progress() * 100.0
    );

    if details {
        print_details(stats, symbol);
    }

    Ok(())
}

fn print_details(stats: &ReportStats, symbol: &str) {
    let mut sections: Vec<(&str, Vec<DetailRow>)> = Vec::new();

    sections.push((
        "Donations",
        stats
            .donations_in_range
            .iter()
            .map(|d| DetailRow {
                date: display_date(d.report_date()),
                name: text_or_na(d.donor_name.as_deref()),
                kind: payment_method_display(d.method.as_deref()),
                amount: format_report_amount(parse_money(d.amount.as_ref()), symbol),
            })
            .collect(),
    ));
    sections.push((
        "Subscriptions",
        stats
            .invoices_in_range
            .iter()
            .map(|i| DetailRow {
                date: display_date(i.report_date()),
                name: text_or_na(i.member_name.as_deref()),
                kind: text_or_na(i.status.as_deref()),
                amount: format_report_amount(parse_money(i.amount.as_ref()), symbol),
            })
            .collect(),
    ));
    sections.push((
        "Member Payments",
        stats
            .payments_in_range
            .iter()
            .map(|p| DetailRow {
                date: display_date(p.report_date()),
                name: text_or_na(p.member.as_deref()),
                kind: payment_method_display(p.method.as_deref()),
                amount: format_report_amount(parse_money(p.amount.as_ref()), symbol),
            })
            .collect(),
    ));
    sections.push((
        "Expenses",
        stats
            .expenses_in_range
            .iter()
            .map(|e| DetailRow {
                date: display_date(e.report_date()),
                name: text_or_na(e.category_name.as_deref()),
                kind: text_or_na(e.payment_mode.as_deref()),
                amount: format_report_amount(expense_amount(e), symbol),
            })
            .collect(),
    ));

    for (title, rows) in sections {
        if rows.is_empty() {
            continue;
        }
        println!();
        println!("{title}");
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
}

/// Export the report to a file
fn cmd_export(
    cfg_dir: &Path,
    window: &Window,
    format: &str,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let config = load_config(cfg_dir)?;
    let query = build_query(&config, window)?;
    let mut store = load_store(cfg_dir)?;
    let stats = store.stats(&query);

    let output_path = match output {
        Some(path) => path,
        None => {
            let output_dir = resolve_output_dir(&config.report.output_dir, cfg_dir);
            std::fs::create_dir_all(&output_dir)?;
            output_dir.join(report_file_name(&stats.range, format))
        }
    };

    let context = ExportContext {
        organization: config.organization.name.clone(),
        currency_symbol: config.report.currency_symbol.clone(),
        generated_date: Local::now().format("%B %d, %Y").to_string(),
    };

    if let Err(e) = export_report(stats, format, &context, &output_path) {
        tracing::error!(error = %e, path = %output_path.display(), "export failed");
        return Err(e);
    }

    println!("Exported financial report");
    println!("  Period:   {} to {}", stats.range.from, stats.range.to);
    println!("  Records:  {}", stats.transaction_count);
    println!(
        "  Net:      {}",
        format_report_amount(stats.net_balance, &config.report.currency_symbol)
    );
    println!("  Saved:    {}", output_path.display());

    if open {
        open_path(&output_path)?;
    }

    Ok(())
}

fn open_path(path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    Ok(())
}
