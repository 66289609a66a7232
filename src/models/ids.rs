//! Strongly-typed ID wrapper for cost records
//!
//! Using a newtype wrapper keeps record identifiers distinct from plain
//! strings or UUIDs at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of a cost record, assigned when the record is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ID from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short display form used in tables (prefix plus first 8 hex digits)
    pub fn short(&self) -> String {
        format!("cst-{}", &self.0.to_string()[..8])
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RecordId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The short table form is lossy, so only full UUIDs parse, with or
        // without the "cst-" prefix.
        let s = s.strip_prefix("cst-").unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_creation() {
        let id = RecordId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_short_display() {
        let id = RecordId::new();
        let short = id.short();
        assert!(short.starts_with("cst-"));
        assert_eq!(short.len(), 12); // "cst-" + 8 chars
    }

    #[test]
    fn test_round_trip_via_str() {
        let id = RecordId::new();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = RecordId::new();
        let b = RecordId::new();
        assert_ne!(a, b);
    }
}
