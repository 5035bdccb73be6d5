use chrono::NaiveDate;

use super::error::{JpkError, RepositoryError};
use super::period::ReportingPeriod;
use super::types::Invoice;

/// Read-only access to stored invoices.
pub trait InvoiceRepository {
    /// All invoices of the calendar month containing `reference`, in report order.
    ///
    /// The order returned here is the order of rows in the report.
    fn find_all_by_date_range(&self, reference: NaiveDate) -> Result<Vec<Invoice>, RepositoryError>;
}

impl<R: InvoiceRepository + ?Sized> InvoiceRepository for &R {
    fn find_all_by_date_range(&self, reference: NaiveDate) -> Result<Vec<Invoice>, RepositoryError> {
        (**self).find_all_by_date_range(reference)
    }
}

/// Invoices held in memory, returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvoiceRepository {
    invoices: Vec<Invoice>,
}

impl InMemoryInvoiceRepository {
    pub fn new(invoices: Vec<Invoice>) -> Self {
        Self { invoices }
    }

    pub fn push(&mut self, invoice: Invoice) {
        self.invoices.push(invoice);
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }
}

impl InvoiceRepository for InMemoryInvoiceRepository {
    fn find_all_by_date_range(&self, reference: NaiveDate) -> Result<Vec<Invoice>, RepositoryError> {
        let period = ReportingPeriod::containing(reference).map_err(boxed)?;
        Ok(self
            .invoices
            .iter()
            .filter(|inv| period.contains(inv.create_date))
            .cloned()
            .collect())
    }
}

fn boxed(e: JpkError) -> RepositoryError {
    Box::new(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InvoiceBuilder;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn filters_by_month_and_keeps_order() {
        let repo = InMemoryInvoiceRepository::new(vec![
            InvoiceBuilder::new(3, "FV/3", date(2021, 3, 20)).build(),
            InvoiceBuilder::new(1, "FV/1", date(2021, 2, 28)).build(),
            InvoiceBuilder::new(2, "FV/2", date(2021, 3, 1)).build(),
            InvoiceBuilder::new(4, "FV/4", date(2021, 4, 1)).build(),
        ]);
        let found = repo.find_all_by_date_range(date(2021, 3, 15)).unwrap();
        let ids: Vec<u64> = found.iter().map(|i| i.id).collect();
        assert_eq!(ids, [3, 2]);
    }

    #[test]
    fn empty_month() {
        let repo = InMemoryInvoiceRepository::default();
        assert!(repo.is_empty());
        assert!(repo.find_all_by_date_range(date(2021, 3, 1)).unwrap().is_empty());
    }
}
