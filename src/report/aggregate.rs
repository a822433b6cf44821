use serde::Serialize;

use crate::model::{Donation, Expense, Invoice, Payment};

use super::money::parse_money;
use super::range::{in_range, in_scope, DateRange};

/// Eligible records of one source and their summed amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate<T> {
    pub filtered: Vec<T>,
    pub total: f64,
    pub count: usize,
}

impl<T> Aggregate<T> {
    fn from_eligible(filtered: Vec<T>, amount_of: impl Fn(&T) -> f64) -> Self {
        let total = sanitize_total(filtered.iter().map(amount_of).sum());
        let count = filtered.len();
        Self {
            filtered,
            total,
            count,
        }
    }
}

/// Totals are finite and never below zero.
fn sanitize_total(total: f64) -> f64 {
    if total.is_finite() && total > 0.0 {
        total
    } else {
        0.0
    }
}

/// Completed or paid member payments inside the window and scope.
pub fn aggregate_payments(
    payments: &[Payment],
    organization_id: Option<&str>,
    range: &DateRange,
) -> Aggregate<Payment> {
    let filtered: Vec<Payment> = in_range(payments, Payment::report_date, range)
        .into_iter()
        .filter(|p| p.is_settled() && in_scope(*p, organization_id))
        .cloned()
        .collect();

    Aggregate::from_eligible(filtered, |p| parse_money(p.amount.as_ref()))
}

/// Donations have no status; every one in the window and scope counts.
pub fn aggregate_donations(
    donations: &[Donation],
    organization_id: Option<&str>,
    range: &DateRange,
) -> Aggregate<Donation> {
    let filtered: Vec<Donation> = in_range(donations, Donation::report_date, range)
        .into_iter()
        .filter(|d| in_scope(*d, organization_id))
        .cloned()
        .collect();

    Aggregate::from_eligible(filtered, |d| parse_money(d.amount.as_ref()))
}

/// Paid subscription invoices, dated by creation (or due date when the
/// invoice predates creation timestamps).
pub fn aggregate_invoices(
    invoices: &[Invoice],
    organization_id: Option<&str>,
    range: &DateRange,
) -> Aggregate<Invoice> {
    let filtered: Vec<Invoice> = in_range(invoices, Invoice::report_date, range)
        .into_iter()
        .filter(|i| i.is_paid() && in_scope(*i, organization_id))
        .cloned()
        .collect();

    Aggregate::from_eligible(filtered, |i| parse_money(i.amount.as_ref()))
}

/// Magnitude of an expense, whatever sign the source stored.
pub fn expense_amount(expense: &Expense) -> f64 {
    parse_money(expense.amount.as_ref()).abs()
}

/// Live (not soft-deleted) expenses inside the window and scope.
pub fn aggregate_expenses(
    expenses: &[Expense],
    organization_id: Option<&str>,
    range: &DateRange,
) -> Aggregate<Expense> {
    let filtered: Vec<Expense> = expenses
        .iter()
        .filter(|e| !e.is_deleted())
        .filter(|e| in_scope(*e, organization_id))
        .filter(|e| range.contains_date(e.report_date()))
        .cloned()
        .collect();

    Aggregate::from_eligible(filtered, expense_amount)
}
