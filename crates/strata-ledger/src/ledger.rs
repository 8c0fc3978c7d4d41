//! Activity ledgers and the per-tenant ledger set

use crate::chain::{entry_hash, ChainHash};
use crate::error::LedgerError;
use parking_lot::Mutex;
use std::collections::HashMap;
use strata_model::{ActivityId, PlanSnapshot, RealizationRecord, RecordId};

/// One chained ledger entry
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    /// The immutable observation
    pub record: RealizationRecord,
    /// Hash of the previous entry (`ChainHash::zero()` for the first)
    pub prev_hash: ChainHash,
    /// Hash of this entry's content and `prev_hash`
    pub hash: ChainHash,
}

/// Append-only ledger of realization records for a single Activity
///
/// # Invariants
/// - Entries are validated before append and never rewritten afterwards.
/// - The hash chain covers record content, so `verify_integrity` detects
///   any in-place mutation of a persisted entry.
#[derive(Debug)]
pub struct ActivityLedger {
    activity_id: ActivityId,
    inner: Mutex<Vec<LedgerEntry>>,
}

impl ActivityLedger {
    /// Empty ledger for an Activity
    #[inline]
    #[must_use]
    pub fn new(activity_id: ActivityId) -> Self {
        Self {
            activity_id,
            inner: Mutex::new(Vec::new()),
        }
    }

    /// Activity this ledger belongs to
    #[inline]
    #[must_use]
    pub fn activity_id(&self) -> &ActivityId {
        &self.activity_id
    }

    /// Validate a record against ledger rules without appending it
    ///
    /// # Errors
    /// Returns the first violated rule: percentage out of `[0,100]`, empty
    /// work description, or an Activity mismatch.
    pub fn validate(&self, record: &RealizationRecord) -> Result<(), LedgerError> {
        if record.activity_id != self.activity_id {
            return Err(LedgerError::WrongActivity {
                record: record.activity_id.clone(),
                ledger: self.activity_id.clone(),
            });
        }
        validate_record(record)
    }

    /// Append a record
    ///
    /// The only mutation this type supports. Prior entries are untouched;
    /// the new entry is chained onto the last hash. Authorization is the
    /// caller's concern; the ledger only enforces content rules.
    ///
    /// # Errors
    /// Fails validation before anything is written.
    pub fn append(&self, record: RealizationRecord) -> Result<RecordId, LedgerError> {
        self.validate(&record)?;
        let mut guard = self.inner.lock();
        let prev_hash = guard.last().map_or_else(ChainHash::zero, |e| e.hash);
        let hash = entry_hash(&record, prev_hash);
        let id = record.id;
        guard.push(LedgerEntry {
            record,
            prev_hash,
            hash,
        });
        Ok(id)
    }

    /// All entries, in append order
    #[must_use]
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.inner.lock().clone()
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether no record has been appended yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Activity completion: arithmetic mean of all recorded percentages
    ///
    /// Equal weight across records - the mean is order-independent. An
    /// empty ledger reads `0`.
    #[must_use]
    pub fn completion(&self) -> f64 {
        let guard = self.inner.lock();
        if guard.is_empty() {
            return 0.0;
        }
        let sum: f64 = guard
            .iter()
            .map(|e| e.record.completion_percentage)
            .sum();
        sum / guard.len() as f64
    }

    /// Walk the hash chain and recompute every entry digest
    ///
    /// # Errors
    /// Reports the first index where the chain or a content hash no longer
    /// matches.
    pub fn verify_integrity(&self) -> Result<(), LedgerError> {
        let guard = self.inner.lock();
        let mut prev = ChainHash::zero();
        for (index, entry) in guard.iter().enumerate() {
            if entry.prev_hash != prev {
                return Err(LedgerError::IntegrityViolation { index });
            }
            if entry_hash(&entry.record, prev) != entry.hash {
                return Err(LedgerError::IntegrityViolation { index });
            }
            prev = entry.hash;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn tamper(&self, index: usize, percentage: f64) {
        self.inner.lock()[index].record.completion_percentage = percentage;
    }
}

/// Validate a record against ledger rules, independent of any ledger
///
/// The engine runs this before persisting a record so a bad row is
/// rejected before any write.
///
/// # Errors
/// Percentage outside `[0,100]` or a blank work description.
pub fn validate_record(record: &RealizationRecord) -> Result<(), LedgerError> {
    if !(0.0..=100.0).contains(&record.completion_percentage) {
        return Err(LedgerError::CompletionOutOfRange(
            record.completion_percentage,
        ));
    }
    if record.work_performed.trim().is_empty() {
        return Err(LedgerError::EmptyWorkPerformed);
    }
    Ok(())
}

/// Per-Activity ledgers for one tenant
///
/// Built from a snapshot's realization table; the aggregator asks it for
/// Activity completions during a rollup pass.
#[derive(Debug, Default)]
pub struct LedgerSet {
    ledgers: HashMap<ActivityId, ActivityLedger>,
}

impl LedgerSet {
    /// Empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build ledgers from a snapshot's records, chronologically per Activity
    ///
    /// Records that fail validation are skipped - the rollup favors a
    /// pessimistic number over refusing to render. The skip count is
    /// returned alongside the set.
    #[must_use]
    pub fn from_snapshot(snapshot: &PlanSnapshot) -> (Self, usize) {
        let mut set = Self::new();
        let mut skipped = 0usize;
        for activity in &snapshot.activities {
            let ledger = ActivityLedger::new(activity.id.clone());
            for record in snapshot.records_of(&activity.id) {
                if ledger.append(record.clone()).is_err() {
                    skipped += 1;
                }
            }
            set.ledgers.insert(activity.id.clone(), ledger);
        }
        (set, skipped)
    }

    /// Ledger for an Activity, if it exists in the set
    #[must_use]
    pub fn ledger(&self, activity: &ActivityId) -> Option<&ActivityLedger> {
        self.ledgers.get(activity)
    }

    /// Completion for an Activity; `0` for an unknown or empty ledger
    #[must_use]
    pub fn completion_of(&self, activity: &ActivityId) -> f64 {
        self.ledgers
            .get(activity)
            .map_or(0.0, ActivityLedger::completion)
    }

    /// Number of ledgers
    #[must_use]
    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    /// Whether the set holds no ledgers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}
