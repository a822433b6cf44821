use serde::{Deserialize, Serialize};

use crate::model::{DateLike, Donation, Expense, Invoice, Member, Payment, Sources};

use super::aggregate::{
    aggregate_donations, aggregate_expenses, aggregate_invoices, aggregate_payments,
};
use super::method::{method_mix, MethodCount};
use super::money::finite_or_zero;
use super::range::{in_scope, years_between, DateRange};

/// Yearly amount expected per subscription type.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SubscriptionRates {
    #[serde(default = "default_lifetime_rate")]
    pub lifetime: f64,
    #[serde(default = "default_yearly_janaza_rate")]
    pub yearly_janaza_fund: f64,
}

fn default_lifetime_rate() -> f64 {
    250.0
}

fn default_yearly_janaza_rate() -> f64 {
    500.0
}

impl Default for SubscriptionRates {
    fn default() -> Self {
        Self {
            lifetime: default_lifetime_rate(),
            yearly_janaza_fund: default_yearly_janaza_rate(),
        }
    }
}

impl SubscriptionRates {
    /// Unknown subscription types are projected like Lifetime members.
    pub fn rate_for(&self, subscription_type: Option<&str>) -> f64 {
        match subscription_type.map(str::trim) {
            Some("Yearly + Janaza Fund") => self.yearly_janaza_fund,
            _ => self.lifetime,
        }
    }
}

/// Everything the composer needs besides the source collections.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub range: DateRange,
    pub organization_id: Option<String>,
    pub rates: SubscriptionRates,
}

impl ReportQuery {
    pub fn new(range: DateRange, organization_id: Option<String>) -> Self {
        Self {
            range,
            organization_id,
            rates: SubscriptionRates::default(),
        }
    }

    pub fn with_rates(mut self, rates: SubscriptionRates) -> Self {
        self.rates = rates;
        self
    }
}

/// Derived financial figures for one window. Recomputed from scratch on
/// every query, never persisted.
///
/// Two "income" views coexist on purpose:
/// - `total_income` is donations plus paid subscription invoices. Member
///   payments are left out because they settle invoices already counted.
/// - `collected` is member payments plus donations. It only feeds the
///   progress ratio against `expected` and must not be used as income.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub range: DateRange,
    pub collected: f64,
    pub payments_total: f64,
    pub donations_total: f64,
    pub invoices_total: f64,
    pub donation_total: f64,
    pub subscription_total: f64,
    pub member_payment_total: f64,
    pub expense_total: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
    pub payments_count: usize,
    pub donations_count: usize,
    pub invoices_count: usize,
    pub expenses_count: usize,
    /// Projected revenue, never zero so it can be used as a denominator.
    pub expected: f64,
    pub average_per_member: f64,
    pub method_mix: Vec<MethodCount>,
    pub transaction_count: usize,
    pub payments_in_range: Vec<Payment>,
    pub donations_in_range: Vec<Donation>,
    pub invoices_in_range: Vec<Invoice>,
    pub expenses_in_range: Vec<Expense>,
}

impl ReportStats {
    /// Share of the expected revenue already collected, `0.0..`.
    pub fn progress(&self) -> f64 {
        finite_or_zero(self.collected / self.expected)
    }
}

/// Build the report for `query` over `sources`.
pub fn compose(sources: &Sources, query: &ReportQuery) -> ReportStats {
    let org = query.organization_id.as_deref();
    let range = &query.range;

    let payments = aggregate_payments(&sources.payments, org, range);
    let donations = aggregate_donations(&sources.donations, org, range);
    let invoices = aggregate_invoices(&sources.invoices, org, range);
    let expenses = aggregate_expenses(&sources.expenses, org, range);

    let member_payment_total = finite_or_zero(payments.total);
    let donation_total = finite_or_zero(donations.total);
    let subscription_total = finite_or_zero(invoices.total);
    let expense_total = finite_or_zero(expenses.total);

    let total_income = finite_or_zero(donation_total + subscription_total);
    let total_expense = expense_total;
    let net_balance = finite_or_zero(total_income - total_expense);

    let active: Vec<&Member> = sources
        .members
        .iter()
        .filter(|m| m.is_active() && in_scope(*m, org))
        .collect();

    let expected = finite_or_zero(expected_revenue(&active, range, &query.rates));
    let expected = if expected == 0.0 { 1.0 } else { expected };

    let collected = finite_or_zero(member_payment_total + donation_total);
    let average_per_member = if active.is_empty() {
        0.0
    } else {
        finite_or_zero((collected / active.len() as f64).round())
    };

    let method_mix = method_mix(payments.filtered.iter().map(|p| p.method.as_deref()));
    let transaction_count = payments.count + donations.count + invoices.count + expenses.count;

    tracing::debug!(
        payments = payments.count,
        donations = donations.count,
        invoices = invoices.count,
        expenses = expenses.count,
        active_members = active.len(),
        "composed financial report"
    );

    ReportStats {
        range: *range,
        collected,
        payments_total: member_payment_total,
        donations_total: donation_total,
        invoices_total: subscription_total,
        donation_total,
        subscription_total,
        member_payment_total,
        expense_total,
        total_income,
        total_expense,
        net_balance,
        payments_count: payments.count,
        donations_count: donations.count,
        invoices_count: invoices.count,
        expenses_count: expenses.count,
        expected,
        average_per_member,
        method_mix,
        transaction_count,
        payments_in_range: payments.filtered,
        donations_in_range: donations.filtered,
        invoices_in_range: invoices.filtered,
        expenses_in_range: expenses.filtered,
    }
}

/// Revenue the active members should bring in over `range`.
///
/// Each member is billed for every started 365.25-day year between the
/// later of the window start and their join date, and the window end. When
/// that comes to nothing but members exist, everyone is assumed Lifetime
/// for the full window.
pub fn expected_revenue(active: &[&Member], range: &DateRange, rates: &SubscriptionRates) -> f64 {
    let start = range.start();
    let end = range.end();

    let projected: f64 = active
        .iter()
        .map(|m| {
            let joined = m
                .created_at
                .as_ref()
                .and_then(DateLike::to_datetime)
                .unwrap_or(start);
            let years = years_between(joined.max(start), end).ceil();
            years * rates.rate_for(m.subscription_type.as_deref())
        })
        .sum();

    if projected == 0.0 && !active.is_empty() {
        active.len() as f64 * rates.lifetime * range.years().ceil()
    } else {
        projected
    }
}
