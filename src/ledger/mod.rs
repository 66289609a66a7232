//! The cost ledger
//!
//! Owns the ordered in-memory collection of cost records, cached from the
//! record store. The store is the durable copy; the ledger synchronizes on
//! open and after every mutation. Every mutation is a blocking round-trip:
//! it either fully succeeds (memory and store agree) or fails with memory
//! reverted to its last-known-good state.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CostRecord, FilterCriteria, Money, RecordDraft, RecordId, RecordPatch};
use crate::store::RecordStore;

/// In-memory ordered collection of cost records backed by a record store
pub struct Ledger<S: RecordStore> {
    store: S,
    records: Vec<CostRecord>,
}

impl<S: RecordStore> Ledger<S> {
    /// Open a ledger, loading the current contents of the store
    pub fn open(store: S) -> LedgerResult<Self> {
        let records = store.load_all()?;
        Ok(Self { store, records })
    }

    /// All records, in insertion order
    pub fn records(&self) -> &[CostRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the ledger holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: RecordId) -> Option<&CostRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Sum of all record amounts
    pub fn total(&self) -> Money {
        self.records.iter().map(|r| r.amount).sum()
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the underlying store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Validate a draft, assign a fresh unique identifier, append it to the
    /// ledger, and persist it
    ///
    /// On a storage failure the in-memory ledger is rolled back to its
    /// pre-call state before the error is surfaced.
    pub fn add(&mut self, draft: RecordDraft) -> LedgerResult<RecordId> {
        let mut record = CostRecord::from_draft(draft);
        record
            .validate()
            .map_err(LedgerError::Validation)?;

        // UUID collisions are not expected, but uniqueness is an invariant.
        while self.records.iter().any(|r| r.id == record.id) {
            record.id = RecordId::new();
        }

        let id = record.id;
        if let Err(err) = self.store.append(&record) {
            // Nothing was added in memory, so the pre-call state stands.
            self.resync_after_failure();
            return Err(err);
        }
        self.records.push(record);
        Ok(id)
    }

    /// Merge a patch into an existing record, re-validate, and persist
    pub fn update(&mut self, id: RecordId, patch: RecordPatch) -> LedgerResult<()> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LedgerError::record_not_found(id.to_string()))?;

        let merged = self.records[pos].merged(patch);
        merged
            .validate()
            .map_err(LedgerError::Validation)?;

        let previous = std::mem::replace(&mut self.records[pos], merged);
        if let Err(err) = self.store.update(id, &self.records[pos]) {
            self.records[pos] = previous;
            self.resync_after_failure();
            return Err(err);
        }
        Ok(())
    }

    /// Remove a record from the ledger and the store
    ///
    /// If the store deletion fails, the record is restored at its original
    /// position and the storage error is surfaced.
    pub fn remove(&mut self, id: RecordId) -> LedgerResult<()> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LedgerError::record_not_found(id.to_string()))?;

        let removed = self.records.remove(pos);
        if let Err(err) = self.store.delete(id) {
            self.records.insert(pos, removed);
            self.resync_after_failure();
            return Err(err);
        }
        Ok(())
    }

    /// Lazy view of the records matching `criteria`, in insertion order
    ///
    /// Pure with respect to ledger state; calling it again restarts the
    /// sequence from the beginning.
    pub fn filter<'a>(
        &'a self,
        criteria: &'a FilterCriteria,
    ) -> impl Iterator<Item = &'a CostRecord> + 'a {
        self.records.iter().filter(move |r| criteria.matches(r))
    }

    /// Replace the in-memory state with a fresh read from the store
    ///
    /// Picks up edits made directly in the sheet. On a read failure the
    /// prior in-memory state is left intact.
    pub fn reload(&mut self) -> LedgerResult<()> {
        let fresh = self.store.load_all()?;
        self.records = fresh;
        Ok(())
    }

    /// Best-effort resynchronization after a failed mutation
    ///
    /// The store gives no partial-write guarantee, so after a failure the
    /// durable state is unknown; a successful re-read resolves the ambiguity.
    /// If the read also fails, the rolled-back state stands until the caller
    /// retries `reload`.
    fn resync_after_failure(&mut self) {
        if let Ok(fresh) = self.store.load_all() {
            self.records = fresh;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentStatus, RecordDraft};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(
        d: NaiveDate,
        client: &str,
        category: &str,
        amount_cents: i64,
    ) -> RecordDraft {
        RecordDraft::new(d, client, category, "", Money::from_cents(amount_cents))
    }

    fn open_ledger() -> Ledger<MemoryStore> {
        Ledger::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_add_appears_in_unrestricted_filter_exactly_once() {
        let mut ledger = open_ledger();
        let id = ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();

        let criteria = FilterCriteria::new();
        let matches: Vec<_> = ledger.filter(&criteria).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, id);

        // restartable: a second pass yields the same sequence
        assert_eq!(ledger.filter(&criteria).count(), 1);
    }

    #[test]
    fn test_add_persists_to_store() {
        let mut ledger = open_ledger();
        ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();
        assert_eq!(ledger.store().records().len(), 1);
    }

    #[test]
    fn test_add_negative_amount_is_validation_error() {
        let mut ledger = open_ledger();
        let err = ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", -1))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.is_empty());
        assert!(ledger.store().records().is_empty());
    }

    #[test]
    fn test_add_rolls_back_on_storage_failure() {
        let mut ledger = open_ledger();
        ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();
        let count_before = ledger.len();

        ledger.store_mut().set_fail_writes(true);
        let err = ledger
            .add(draft(date(2024, 2, 1), "ClienteB", "Transporte", 5000))
            .unwrap_err();
        assert!(err.is_storage());
        assert_eq!(ledger.len(), count_before);
    }

    #[test]
    fn test_update_merges_and_persists() {
        let mut ledger = open_ledger();
        let id = ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();

        ledger
            .update(
                id,
                RecordPatch {
                    client: Some("ClienteB".into()),
                    status: Some(PaymentStatus::Paid),
                    ..Default::default()
                },
            )
            .unwrap();

        let rec = ledger.get(id).unwrap();
        assert_eq!(rec.client, "ClienteB");
        assert_eq!(rec.status, PaymentStatus::Paid);
        assert_eq!(ledger.store().records()[0].client, "ClienteB");
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut ledger = open_ledger();
        let err = ledger
            .update(RecordId::new(), RecordPatch::new())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_revalidates_merged_record() {
        let mut ledger = open_ledger();
        let id = ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();

        let err = ledger
            .update(
                id,
                RecordPatch {
                    amount: Some(Money::from_cents(-500)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.get(id).unwrap().amount.cents(), 10000);
    }

    #[test]
    fn test_update_rolls_back_on_storage_failure() {
        let mut ledger = open_ledger();
        let id = ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();

        ledger.store_mut().set_fail_writes(true);
        let err = ledger
            .update(
                id,
                RecordPatch {
                    client: Some("ClienteB".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_storage());
        assert_eq!(ledger.get(id).unwrap().client, "ClienteA");
    }

    #[test]
    fn test_remove_is_not_idempotent() {
        let mut ledger = open_ledger();
        let id = ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();

        ledger.remove(id).unwrap();
        assert!(ledger.is_empty());

        let err = ledger.remove(id).unwrap_err();
        assert!(err.is_not_found());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove_restores_record_on_storage_failure() {
        let mut ledger = open_ledger();
        let first = ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();
        let second = ledger
            .add(draft(date(2024, 2, 10), "ClienteB", "Transporte", 25050))
            .unwrap();

        ledger.store_mut().set_fail_writes(true);
        let err = ledger.remove(first).unwrap_err();
        assert!(err.is_storage());

        // restored in its original position
        assert_eq!(ledger.records()[0].id, first);
        assert_eq!(ledger.records()[1].id, second);
    }

    #[test]
    fn test_filter_preserves_insertion_order() {
        let mut ledger = open_ledger();
        ledger
            .add(draft(date(2024, 3, 1), "ClienteA", "Materiais", 100))
            .unwrap();
        ledger
            .add(draft(date(2024, 1, 1), "ClienteB", "Materiais", 200))
            .unwrap();
        ledger
            .add(draft(date(2024, 2, 1), "ClienteC", "Transporte", 300))
            .unwrap();

        let criteria = FilterCriteria::new().category("Materiais");
        let clients: Vec<_> = ledger
            .filter(&criteria)
            .map(|r| r.client.as_str())
            .collect();
        assert_eq!(clients, vec!["ClienteA", "ClienteB"]);
    }

    #[test]
    fn test_scenario_category_filter() {
        let mut ledger = open_ledger();
        ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();
        ledger
            .add(draft(date(2024, 2, 10), "ClienteB", "Mão de obra", 25050))
            .unwrap();

        let criteria = FilterCriteria::new().category("Materiais");
        let matches: Vec<_> = ledger.filter(&criteria).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].client, "ClienteA");
        assert_eq!(matches[0].amount.to_decimal_string(), "100.00");
    }

    #[test]
    fn test_reload_picks_up_external_edits() {
        let mut ledger = open_ledger();
        ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();

        // simulate an edit made directly in the sheet
        let external = CostRecord::from_draft(draft(
            date(2024, 5, 1),
            "ClienteX",
            "Outros",
            777,
        ));
        ledger.store_mut().append(&external).unwrap();
        assert_eq!(ledger.len(), 1);

        ledger.reload().unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_reload_failure_keeps_prior_state() {
        let mut ledger = open_ledger();
        ledger
            .add(draft(date(2024, 1, 5), "ClienteA", "Materiais", 10000))
            .unwrap();

        ledger.store_mut().set_fail_reads(true);
        let err = ledger.reload().unwrap_err();
        assert!(err.is_storage());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_total() {
        let mut ledger = open_ledger();
        ledger
            .add(draft(date(2024, 1, 5), "A", "Materiais", 10000))
            .unwrap();
        ledger
            .add(draft(date(2024, 2, 10), "B", "Transporte", 25050))
            .unwrap();
        assert_eq!(ledger.total().to_decimal_string(), "350.50");
    }
}
