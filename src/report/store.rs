use crate::model::{Donation, Expense, Invoice, Member, Payment, Sources};

use super::compose::{compose, ReportQuery, ReportStats};

/// Holds the source collections and the last composed report.
///
/// Every replacement of a collection bumps the revision; a report is reused
/// only while the query and the revision are unchanged.
#[derive(Debug, Default)]
pub struct ReportStore {
    sources: Sources,
    revision: u64,
    cached: Option<CachedReport>,
}

#[derive(Debug)]
struct CachedReport {
    query: ReportQuery,
    revision: u64,
    stats: ReportStats,
}

impl ReportStore {
    pub fn new(sources: Sources) -> Self {
        Self {
            sources,
            revision: 0,
            cached: None,
        }
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_payments(&mut self, payments: Vec<Payment>) {
        self.sources.payments = payments;
        self.touch();
    }

    pub fn set_donations(&mut self, donations: Vec<Donation>) {
        self.sources.donations = donations;
        self.touch();
    }

    pub fn set_invoices(&mut self, invoices: Vec<Invoice>) {
        self.sources.invoices = invoices;
        self.touch();
    }

    pub fn set_expenses(&mut self, expenses: Vec<Expense>) {
        self.sources.expenses = expenses;
        self.touch();
    }

    pub fn set_members(&mut self, members: Vec<Member>) {
        self.sources.members = members;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Report for `query`, recomposed only when something it depends on moved.
    pub fn stats(&mut self, query: &ReportQuery) -> &ReportStats {
        if !self.is_cached(query) {
            tracing::trace!(revision = self.revision, "recomposing report");
            self.cached = None;
        }

        let sources = &self.sources;
        let revision = self.revision;
        &self
            .cached
            .get_or_insert_with(|| CachedReport {
                query: query.clone(),
                revision,
                stats: compose(sources, query),
            })
            .stats
    }

    /// Whether the next call to [`ReportStore::stats`] with `query` is free.
    pub fn is_cached(&self, query: &ReportQuery) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|c| c.revision == self.revision && &c.query == query)
    }
}
