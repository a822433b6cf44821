use chrono::NaiveDate;
use member_reports::model::{Amount, DateLike, Flag};
use member_reports::report::{parse_money, parse_money_str};
use member_reports::{
    compose, DateRange, Donation, Expense, Invoice, Member, Payment, ReportQuery, Sources,
};
use proptest::prelude::*;

fn amount() -> impl Strategy<Value = Option<Amount>> {
    prop_oneof![
        Just(None),
        "[-$0-9.,a-zA-Z ]{0,14}".prop_map(|s| Some(Amount::Text(s))),
        (0.0f64..1_000_000.0).prop_map(|n| Some(Amount::Number(n))),
        Just(Some(Amount::Number(f64::NAN))),
        Just(Some(Amount::Number(f64::INFINITY))),
    ]
}

fn date() -> impl Strategy<Value = Option<DateLike>> {
    prop_oneof![
        Just(None),
        Just(Some(DateLike::from("garbage"))),
        Just(Some(DateLike::from(""))),
        (1u32..=12, 1u32..=28)
            .prop_map(|(m, d)| Some(DateLike::Text(format!("2025-{m:02}-{d:02}")))),
        (0i64..2_000_000_000_000).prop_map(|ms| Some(DateLike::Millis(ms))),
    ]
}

fn text(options: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        prop::sample::select(options).prop_map(|s| Some(s.to_string())),
    ]
}

fn payment() -> impl Strategy<Value = Payment> {
    (
        amount(),
        date(),
        text(&["Pending", "Completed", "Paid", "Rejected"]),
        text(&["Cash", "cash_to_admin", "Card", "Stripe", "Cheque", ""]),
    )
        .prop_map(|(amount, date, status, method)| Payment {
            amount,
            date,
            status,
            method,
            ..Default::default()
        })
}

fn donation() -> impl Strategy<Value = Donation> {
    (amount(), date()).prop_map(|(amount, date)| Donation {
        amount,
        date,
        ..Default::default()
    })
}

fn invoice() -> impl Strategy<Value = Invoice> {
    (amount(), date(), date(), text(&["Unpaid", "Paid", "Overdue", "Pending"])).prop_map(
        |(amount, created_at, due, status)| Invoice {
            amount,
            created_at,
            due,
            status,
            ..Default::default()
        },
    )
}

fn expense() -> impl Strategy<Value = Expense> {
    (amount(), date(), any::<bool>()).prop_map(|(amount, date, is_deleted)| Expense {
        amount,
        date,
        is_deleted: Some(Flag::from(is_deleted)),
        ..Default::default()
    })
}

fn member() -> impl Strategy<Value = Member> {
    (
        text(&["Active", "Inactive"]),
        text(&["Lifetime", "Yearly + Janaza Fund", "Other"]),
        date(),
    )
        .prop_map(|(status, subscription_type, created_at)| Member {
            status,
            subscription_type,
            created_at,
            ..Default::default()
        })
}

fn sources() -> impl Strategy<Value = Sources> {
    (
        prop::collection::vec(payment(), 0..12),
        prop::collection::vec(donation(), 0..12),
        prop::collection::vec(invoice(), 0..12),
        prop::collection::vec(expense(), 0..12),
        prop::collection::vec(member(), 0..8),
    )
        .prop_map(|(payments, donations, invoices, expenses, members)| Sources {
            payments,
            donations,
            invoices,
            expenses,
            members,
        })
}

fn year_2025() -> ReportQuery {
    ReportQuery::new(
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        ),
        None,
    )
}

proptest! {
    #[test]
    fn money_strings_always_parse_to_finite_non_negative(s in ".*") {
        let n = parse_money_str(&s);
        prop_assert!(n.is_finite());
        prop_assert!(n >= 0.0);
    }

    #[test]
    fn money_numbers_are_finite(n in any::<f64>()) {
        prop_assert!(parse_money(Some(&Amount::Number(n))).is_finite());
    }

    #[test]
    fn every_figure_is_finite(sources in sources()) {
        let stats = compose(&sources, &year_2025());

        for value in [
            stats.collected,
            stats.total_income,
            stats.total_expense,
            stats.net_balance,
            stats.expected,
            stats.average_per_member,
            stats.member_payment_total,
            stats.donation_total,
            stats.subscription_total,
            stats.expense_total,
        ] {
            prop_assert!(value.is_finite());
        }
        prop_assert!(stats.expected > 0.0);
        prop_assert_eq!(stats.total_income, stats.donation_total + stats.subscription_total);
        prop_assert_eq!(stats.payments_count, stats.payments_in_range.len());
        prop_assert_eq!(stats.expenses_count, stats.expenses_in_range.len());
    }

    #[test]
    fn compose_is_idempotent(sources in sources()) {
        let q = year_2025();
        let first = serde_json::to_string(&compose(&sources, &q)).unwrap();
        let second = serde_json::to_string(&compose(&sources, &q)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn method_mix_accounts_for_every_payment(sources in sources()) {
        let stats = compose(&sources, &year_2025());
        let total: usize = stats.method_mix.iter().map(|m| m.value).sum();

        if stats.payments_count > 0 {
            prop_assert_eq!(total, stats.payments_count);
        } else {
            prop_assert_eq!(stats.method_mix.len(), 1);
            prop_assert_eq!(stats.method_mix[0].label.as_str(), "No payments");
            prop_assert_eq!(stats.method_mix[0].value, 0);
        }
    }
}
