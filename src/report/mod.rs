//! Financial report aggregation.
//!
//! Everything here is pure: inputs come in as slices, results go out as new
//! values, and malformed data degrades to zero or exclusion instead of an
//! error.

mod aggregate;
mod compose;
mod method;
mod money;
mod range;
mod store;

pub use aggregate::{
    aggregate_donations, aggregate_expenses, aggregate_invoices, aggregate_payments,
    expense_amount, Aggregate,
};
pub use compose::{compose, expected_revenue, ReportQuery, ReportStats, SubscriptionRates};
pub use method::{classify_method, method_mix, payment_method_display, MethodCount, MethodDisplay};
pub use money::{parse_money, parse_money_str};
pub use range::{in_range, in_scope, years_between, DateRange};
pub use store::ReportStore;
