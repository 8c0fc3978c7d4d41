//! Entry hash chain
//!
//! Each ledger entry commits to its record content and the hash of the
//! previous entry, so any in-place edit or deletion of a persisted record
//! breaks verification at that index.

use sha2::{Digest, Sha256};
use strata_model::RealizationRecord;

/// SHA-256 digest linking a ledger entry to its predecessor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainHash(pub [u8; 32]);

impl ChainHash {
    /// The chain anchor before any entry exists
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Hex form, for logs and diagnostics
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for ChainHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Digest of one record's content plus the previous entry hash
///
/// Fields are fed in a fixed order with NUL separators between
/// variable-length strings, so shifting text between fields cannot produce
/// the same digest.
#[must_use]
pub(crate) fn entry_hash(record: &RealizationRecord, prev: ChainHash) -> ChainHash {
    let mut hasher = Sha256::new();
    hasher.update(record.id.to_string().as_bytes());
    hasher.update(record.activity_id.as_str().as_bytes());
    hasher.update([0]);
    hasher.update(record.record_date.to_string().as_bytes());
    hasher.update(record.completion_percentage.to_le_bytes());
    hasher.update(record.work_performed.as_bytes());
    hasher.update([0]);
    hasher.update(record.evidence_ref.as_deref().unwrap_or("").as_bytes());
    hasher.update([0]);
    hasher.update(prev.0);
    ChainHash(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use strata_model::{ActivityId, ExpenseFlag, RecordId};

    fn record(work: &str, evidence: Option<&str>) -> RealizationRecord {
        RealizationRecord {
            id: RecordId::new(),
            activity_id: ActivityId::from("ac-1"),
            record_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            completion_percentage: 50.0,
            work_performed: work.to_string(),
            expense_flag: ExpenseFlag::No,
            evidence_ref: evidence.map(String::from),
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let r = record("survey", None);
        let a = entry_hash(&r, ChainHash::zero());
        let b = entry_hash(&r, ChainHash::zero());
        assert_eq!(a, b);
    }

    #[test]
    fn hash_depends_on_prev() {
        let r = record("survey", None);
        let a = entry_hash(&r, ChainHash::zero());
        let b = entry_hash(&r, a);
        assert_ne!(a, b);
    }

    #[test]
    fn field_boundaries_are_committed() {
        // "ab" + "c" must not collide with "a" + "bc"
        let r1 = record("ab", Some("c"));
        let mut r2 = record("a", Some("bc"));
        r2.id = r1.id;
        assert_ne!(
            entry_hash(&r1, ChainHash::zero()),
            entry_hash(&r2, ChainHash::zero())
        );
    }

    #[test]
    fn hex_form_is_64_chars() {
        let r = record("survey", None);
        let h = entry_hash(&r, ChainHash::zero());
        assert_eq!(h.to_hex().len(), 64);
    }
}
