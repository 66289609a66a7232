//! Filter criteria for ledger views
//!
//! A `FilterCriteria` describes which records a view includes. Every
//! dimension is optional; an unset dimension means "no restriction".

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::record::{CostRecord, PaymentStatus};

/// Criteria for selecting records from the ledger
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Inclusive date range
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Categories to include (exact membership)
    pub categories: Option<BTreeSet<String>>,
    /// Case-insensitive substring match on the client/project field
    pub client: Option<String>,
    /// Payment status to include
    pub status: Option<PaymentStatus>,
}

impl FilterCriteria {
    /// Criteria matching every record
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to records dated within `start..=end`
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    /// Restrict to a set of categories
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to a single category
    pub fn category(self, category: impl Into<String>) -> Self {
        self.categories([category.into()])
    }

    /// Restrict to clients containing the given text (case-insensitive)
    pub fn client(mut self, needle: impl Into<String>) -> Self {
        self.client = Some(needle.into());
        self
    }

    /// Restrict to a payment status
    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True when no dimension is restricted
    pub fn is_unrestricted(&self) -> bool {
        self.date_range.is_none()
            && self.categories.is_none()
            && self.client.is_none()
            && self.status.is_none()
    }

    /// Does `record` satisfy every specified dimension?
    pub fn matches(&self, record: &CostRecord) -> bool {
        if let Some((start, end)) = self.date_range {
            if record.date < start || record.date > end {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if !categories.contains(&record.category) {
                return false;
            }
        }
        if let Some(needle) = &self.client {
            let haystack = record.client.to_lowercase();
            if !haystack.contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordDraft};

    fn record(date: (i32, u32, u32), category: &str, client: &str) -> CostRecord {
        CostRecord::from_draft(RecordDraft::new(
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            client,
            category,
            "",
            Money::from_cents(10000),
        ))
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = FilterCriteria::new();
        assert!(criteria.is_unrestricted());
        assert!(criteria.matches(&record((2024, 1, 5), "Materiais", "ClienteA")));
    }

    #[test]
    fn test_date_range_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let criteria = FilterCriteria::new().date_range(start, end);

        assert!(criteria.matches(&record((2024, 1, 1), "Materiais", "A")));
        assert!(criteria.matches(&record((2024, 1, 31), "Materiais", "A")));
        assert!(!criteria.matches(&record((2024, 2, 1), "Materiais", "A")));
        assert!(!criteria.matches(&record((2023, 12, 31), "Materiais", "A")));
    }

    #[test]
    fn test_category_membership() {
        let criteria = FilterCriteria::new().categories(["Materiais", "Transporte"]);
        assert!(criteria.matches(&record((2024, 1, 5), "Materiais", "A")));
        assert!(criteria.matches(&record((2024, 1, 5), "Transporte", "A")));
        assert!(!criteria.matches(&record((2024, 1, 5), "Ferramentas", "A")));
    }

    #[test]
    fn test_client_substring_case_insensitive() {
        let criteria = FilterCriteria::new().client("cliente");
        assert!(criteria.matches(&record((2024, 1, 5), "Materiais", "ClienteA")));
        assert!(criteria.matches(&record((2024, 1, 5), "Materiais", "Reforma CLIENTE B")));
        assert!(!criteria.matches(&record((2024, 1, 5), "Materiais", "Obra 12")));
    }

    #[test]
    fn test_combined_dimensions_all_must_match() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let criteria = FilterCriteria::new()
            .date_range(start, end)
            .category("Materiais")
            .client("clientea");

        assert!(criteria.matches(&record((2024, 1, 5), "Materiais", "ClienteA")));
        assert!(!criteria.matches(&record((2024, 1, 5), "Transporte", "ClienteA")));
        assert!(!criteria.matches(&record((2025, 1, 5), "Materiais", "ClienteA")));
    }

    #[test]
    fn test_status_filter() {
        let mut paid = record((2024, 1, 5), "Materiais", "A");
        paid.status = PaymentStatus::Paid;
        let pending = record((2024, 1, 6), "Materiais", "A");

        let criteria = FilterCriteria::new().status(PaymentStatus::Paid);
        assert!(criteria.matches(&paid));
        assert!(!criteria.matches(&pending));
    }
}
