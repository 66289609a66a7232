//! Summary formatting

use crate::reports::LedgerSummary;

/// Format a ledger summary for terminal output or the text report
pub fn format_summary(summary: &LedgerSummary, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("SUMMARY\n");
    output.push_str(&format!("  Records:          {}\n", summary.record_count));
    output.push_str(&format!(
        "  Total:            {}\n",
        summary.total.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Average:          {}\n",
        summary.average.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Pending payments: {}\n",
        summary.pending_count
    ));

    if !summary.by_category.is_empty() {
        output.push_str("\nBY CATEGORY\n");
        for cat in &summary.by_category {
            output.push_str(&format!(
                "  {:<24} {:>12}  ({:.1}%)\n",
                cat.category,
                cat.total.format_with_symbol(currency_symbol),
                cat.percentage
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostRecord, Money, RecordDraft};
    use chrono::NaiveDate;

    #[test]
    fn test_format_summary() {
        let records = vec![
            CostRecord::from_draft(RecordDraft::new(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                "A",
                "Materiais",
                "",
                Money::from_cents(10000),
            )),
            CostRecord::from_draft(RecordDraft::new(
                NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                "B",
                "Transporte",
                "",
                Money::from_cents(25050),
            )),
        ];
        let summary = LedgerSummary::generate(&records);
        let text = format_summary(&summary, "R$");

        assert!(text.contains("Records:          2"));
        assert!(text.contains("Total:            R$ 350.50"));
        assert!(text.contains("Materiais"));
        assert!(text.contains("Transporte"));
        assert!(text.contains('%'));
    }

    #[test]
    fn test_empty_summary_has_no_category_block() {
        let summary = LedgerSummary::generate(std::iter::empty::<&CostRecord>());
        let text = format_summary(&summary, "R$");
        assert!(!text.contains("BY CATEGORY"));
    }
}
