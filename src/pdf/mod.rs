mod layout;
mod typst;

pub use layout::{truncate, Column, Page, PageLayout, TextItem};
pub use typst::{render_typst, write_pdf};

use layout::{BODY_SIZE, LINE_HEIGHT, MARGIN};

use crate::export::{count_rows, display_date, money, summary_rows, text_or_na, ExportContext};
use crate::report::{expense_amount, parse_money, payment_method_display, ReportStats};

const DONATION_COLUMNS: [Column; 5] = [
    Column { title: "Date", x: MARGIN, width: 10 },
    Column { title: "Donor", x: 110.0, width: 20 },
    Column { title: "Method", x: 240.0, width: 15 },
    Column { title: "Amount", x: 340.0, width: 12 },
    Column { title: "Notes", x: 420.0, width: 25 },
];

const SUBSCRIPTION_COLUMNS: [Column; 4] = [
    Column { title: "Date", x: MARGIN, width: 10 },
    Column { title: "Member", x: 110.0, width: 20 },
    Column { title: "Status", x: 260.0, width: 10 },
    Column { title: "Amount", x: 340.0, width: 12 },
];

const PAYMENT_COLUMNS: [Column; 5] = [
    Column { title: "Date", x: MARGIN, width: 10 },
    Column { title: "Member", x: 110.0, width: 20 },
    Column { title: "Method", x: 240.0, width: 15 },
    Column { title: "Status", x: 340.0, width: 10 },
    Column { title: "Amount", x: 420.0, width: 12 },
];

const EXPENSE_COLUMNS: [Column; 4] = [
    Column { title: "Date", x: MARGIN, width: 10 },
    Column { title: "Category", x: 110.0, width: 20 },
    Column { title: "Payment Mode", x: 260.0, width: 15 },
    Column { title: "Amount", x: 380.0, width: 12 },
];

const VALUE_X: f32 = 300.0;

fn section_title(layout: &mut PageLayout, title: &str) {
    layout.ensure_space(LINE_HEIGHT * 3.0, None);
    layout.advance(LINE_HEIGHT / 2.0);
    layout.line(12.0, true, title);
}

fn key_value(layout: &mut PageLayout, label: &str, value: String) {
    layout.ensure_space(LINE_HEIGHT, None);
    layout.text_at(MARGIN, BODY_SIZE, false, label);
    layout.text_at(VALUE_X, BODY_SIZE, false, value);
    layout.advance(LINE_HEIGHT);
}

/// Lay out the full report: title block, summary, counts, method mix, then
/// one table per non-empty source.
pub fn build_report_pages(stats: &ReportStats, context: &ExportContext) -> Vec<Page> {
    let symbol = context.currency_symbol.as_str();
    let (from, to) = stats.range.labels();
    let mut layout = PageLayout::new();

    layout.line(18.0, true, "Financial Report");
    layout.line(BODY_SIZE, false, context.organization.as_str());
    layout.line(BODY_SIZE, false, format!("Period: {from} to {to}"));
    layout.line(BODY_SIZE, false, format!("Generated {}", context.generated_date));

    section_title(&mut layout, "Financial Summary");
    for (label, value) in summary_rows(stats) {
        key_value(&mut layout, label, format!("{symbol}{}", money(value)));
    }

    section_title(&mut layout, "Counts");
    for (label, value) in count_rows(stats) {
        key_value(&mut layout, label, value.to_string());
    }

    section_title(&mut layout, "Payment Method Breakdown");
    for entry in &stats.method_mix {
        key_value(&mut layout, &truncate(&entry.label, 30), entry.value.to_string());
    }

    if !stats.donations_in_range.is_empty() {
        section_title(&mut layout, "Donations");
        let rows: Vec<Vec<String>> = stats
            .donations_in_range
            .iter()
            .map(|d| {
                vec![
                    display_date(d.report_date()),
                    text_or_na(d.donor_name.as_deref()),
                    payment_method_display(d.method.as_deref()),
                    format!("{symbol}{}", money(parse_money(d.amount.as_ref()))),
                    text_or_na(d.notes.as_deref()),
                ]
            })
            .collect();
        layout.table(&DONATION_COLUMNS, &rows);
    }

    if !stats.invoices_in_range.is_empty() {
        section_title(&mut layout, "Subscriptions");
        let rows: Vec<Vec<String>> = stats
            .invoices_in_range
            .iter()
            .map(|i| {
                vec![
                    display_date(i.report_date()),
                    text_or_na(i.member_name.as_deref()),
                    text_or_na(i.status.as_deref()),
                    format!("{symbol}{}", money(parse_money(i.amount.as_ref()))),
                ]
            })
            .collect();
        layout.table(&SUBSCRIPTION_COLUMNS, &rows);
    }

    let settled: Vec<Vec<String>> = stats
        .payments_in_range
        .iter()
        .filter(|p| p.is_settled())
        .map(|p| {
            vec![
                display_date(p.report_date()),
                text_or_na(p.member.as_deref()),
                payment_method_display(p.method.as_deref()),
                text_or_na(p.status.as_deref()),
                format!("{symbol}{}", money(parse_money(p.amount.as_ref()))),
            ]
        })
        .collect();
    if !settled.is_empty() {
        section_title(&mut layout, "Member Payments");
        layout.table(&PAYMENT_COLUMNS, &settled);
    }

    if !stats.expenses_in_range.is_empty() {
        section_title(&mut layout, "Expenses");
        let rows: Vec<Vec<String>> = stats
            .expenses_in_range
            .iter()
            .map(|e| {
                vec![
                    display_date(e.report_date()),
                    text_or_na(e.category_name.as_deref()),
                    text_or_na(e.payment_mode.as_deref()),
                    format!("{symbol}{}", money(expense_amount(e))),
                ]
            })
            .collect();
        layout.table(&EXPENSE_COLUMNS, &rows);
    }

    layout.finish()
}
