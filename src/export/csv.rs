use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{ReportError, Result};
use crate::report::{expense_amount, parse_money, payment_method_display, ReportStats};

use super::{count_rows, display_date, money, summary_rows, text_or_na};

/// One labelled block of the CSV export.
struct Section {
    title: &'static str,
    header: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

impl Section {
    fn write(&self) -> Result<Vec<u8>> {
        let mut wtr = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(Vec::new());

        wtr.write_record([self.title])?;
        wtr.write_record(self.header)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }

        wtr.into_inner().map_err(|e| {
            let err = e.error();
            ReportError::Io(std::io::Error::new(err.kind(), err.to_string()))
        })
    }
}

/// Render the report as sectioned CSV text: a title block, Financial
/// Summary, Counts and Payment Method Breakdown always, then one detail
/// table per source that has rows.
pub fn render_csv(stats: &ReportStats) -> Result<String> {
    let (from, to) = stats.range.labels();

    let mut sections = vec![
        Section {
            title: "Financial Report",
            header: &["From", "To"],
            rows: vec![vec![from, to]],
        },
        Section {
            title: "Financial Summary",
            header: &["Metric", "Amount"],
            rows: summary_rows(stats)
                .into_iter()
                .map(|(label, value)| vec![label.to_string(), money(value)])
                .collect(),
        },
        Section {
            title: "Counts",
            header: &["Records", "Count"],
            rows: count_rows(stats)
                .into_iter()
                .map(|(label, value)| vec![label.to_string(), value.to_string()])
                .collect(),
        },
        Section {
            title: "Payment Method Breakdown",
            header: &["Method", "Count"],
            rows: stats
                .method_mix
                .iter()
                .map(|m| vec![m.label.clone(), m.value.to_string()])
                .collect(),
        },
    ];

    let donations: Vec<Vec<String>> = stats
        .donations_in_range
        .iter()
        .map(|d| {
            vec![
                display_date(d.report_date()),
                text_or_na(d.donor_name.as_deref()),
                if d.is_member() { "Yes" } else { "No" }.to_string(),
                payment_method_display(d.method.as_deref()),
                money(parse_money(d.amount.as_ref())),
                text_or_na(d.notes.as_deref()),
            ]
        })
        .collect();
    if !donations.is_empty() {
        sections.push(Section {
            title: "Donations",
            header: &["Date", "Donor", "Member", "Method", "Amount", "Notes"],
            rows: donations,
        });
    }

    let subscriptions: Vec<Vec<String>> = stats
        .invoices_in_range
        .iter()
        .map(|i| {
            vec![
                display_date(i.report_date()),
                text_or_na(i.member_name.as_deref()),
                text_or_na(i.status.as_deref()),
                money(parse_money(i.amount.as_ref())),
            ]
        })
        .collect();
    if !subscriptions.is_empty() {
        sections.push(Section {
            title: "Subscriptions",
            header: &["Date", "Member", "Status", "Amount"],
            rows: subscriptions,
        });
    }

    let payments: Vec<Vec<String>> = stats
        .payments_in_range
        .iter()
        .filter(|p| p.is_settled())
        .map(|p| {
            vec![
                display_date(p.report_date()),
                text_or_na(p.member.as_deref()),
                payment_method_display(p.method.as_deref()),
                text_or_na(p.status.as_deref()),
                money(parse_money(p.amount.as_ref())),
            ]
        })
        .collect();
    if !payments.is_empty() {
        sections.push(Section {
            title: "Member Payments",
            header: &["Date", "Member", "Method", "Status", "Amount"],
            rows: payments,
        });
    }

    let expenses: Vec<Vec<String>> = stats
        .expenses_in_range
        .iter()
        .map(|e| {
            vec![
                display_date(e.report_date()),
                text_or_na(e.category_name.as_deref()),
                text_or_na(e.payment_mode.as_deref()),
                money(expense_amount(e)),
            ]
        })
        .collect();
    if !expenses.is_empty() {
        sections.push(Section {
            title: "Expenses",
            header: &["Date", "Category", "Payment Mode", "Amount"],
            rows: expenses,
        });
    }

    let mut out = Vec::new();
    for (idx, section) in sections.iter().enumerate() {
        if idx > 0 {
            out.push(b'\n');
        }
        out.extend(section.write()?);
    }

    String::from_utf8(out).map_err(|e| {
        ReportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
