//! Core data models for the cost ledger
//!
//! This module contains the data structures that represent the domain:
//! cost records, money, identifiers, and filter criteria.

pub mod filter;
pub mod ids;
pub mod money;
pub mod record;

pub use filter::FilterCriteria;
pub use ids::RecordId;
pub use money::Money;
pub use record::{
    CostRecord, PaymentMethod, PaymentStatus, RecordDraft, RecordPatch, DATE_FORMAT,
    FIELD_HEADERS,
};
