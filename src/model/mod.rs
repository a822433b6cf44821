//! Records fetched from the membership backend. The reporting engine only
//! reads these.

mod donation;
mod expense;
mod invoice;
mod member;
mod payment;
mod value;

pub use donation::Donation;
pub use expense::Expense;
pub use invoice::Invoice;
pub use member::Member;
pub use payment::Payment;
pub use value::{first_set, Amount, DateLike, Flag, RecordId};

/// Anything that can be scoped to an organization.
pub trait Scoped {
    fn organization_id(&self) -> Option<&RecordId>;
}

macro_rules! impl_scoped {
    ($($ty:ty),*) => {
        $(impl Scoped for $ty {
            fn organization_id(&self) -> Option<&RecordId> {
                self.organization_id.as_ref()
            }
        })*
    };
}

impl_scoped!(Payment, Donation, Invoice, Expense, Member);

/// The five collections a report is computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sources {
    pub payments: Vec<Payment>,
    pub donations: Vec<Donation>,
    pub invoices: Vec<Invoice>,
    pub expenses: Vec<Expense>,
    pub members: Vec<Member>,
}
