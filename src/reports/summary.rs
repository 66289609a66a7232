//! Ledger summary report
//!
//! Aggregates a view of records into the headline figures of the dashboard:
//! record count, total, average amount, pending payments, and the
//! distribution of spending across categories.

use std::collections::BTreeMap;

use crate::models::{CostRecord, Money, PaymentStatus};

/// Spending total for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// Category name
    pub category: String,
    /// Total amount in this category
    pub total: Money,
    /// Number of records in this category
    pub record_count: usize,
    /// Share of the overall total, 0-100
    pub percentage: f64,
}

/// Headline figures for a view of the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    /// Number of records in the view
    pub record_count: usize,
    /// Sum of all amounts
    pub total: Money,
    /// Average amount per record (zero for an empty view)
    pub average: Money,
    /// Records still pending payment
    pub pending_count: usize,
    /// Per-category totals, sorted by category name
    pub by_category: Vec<CategoryTotal>,
}

impl LedgerSummary {
    /// Aggregate a sequence of records
    pub fn generate<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CostRecord>,
    {
        let mut record_count = 0usize;
        let mut total = Money::zero();
        let mut pending_count = 0usize;
        let mut categories: BTreeMap<String, (Money, usize)> = BTreeMap::new();

        for record in records {
            record_count += 1;
            total += record.amount;
            if record.status == PaymentStatus::Pending {
                pending_count += 1;
            }
            let entry = categories
                .entry(record.category.clone())
                .or_insert((Money::zero(), 0));
            entry.0 += record.amount;
            entry.1 += 1;
        }

        let average = if record_count > 0 {
            Money::from_cents(total.cents() / record_count as i64)
        } else {
            Money::zero()
        };

        let by_category = categories
            .into_iter()
            .map(|(category, (cat_total, count))| {
                let percentage = if total.is_zero() {
                    0.0
                } else {
                    cat_total.cents() as f64 / total.cents() as f64 * 100.0
                };
                CategoryTotal {
                    category,
                    total: cat_total,
                    record_count: count,
                    percentage,
                }
            })
            .collect();

        Self {
            record_count,
            total,
            average,
            pending_count,
            by_category,
        }
    }
}
