//! Ledger error types

use strata_model::ActivityId;

/// Errors raised by ledger validation and integrity checks
///
/// Validation happens before any append, so a failed call never leaves a
/// partial entry behind.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Completion percentage outside the closed `[0,100]` interval
    #[error("completion percentage {0} outside [0, 100]")]
    CompletionOutOfRange(f64),

    /// Work description is mandatory on every record
    #[error("work_performed must not be empty")]
    EmptyWorkPerformed,

    /// Record addressed to a different Activity than this ledger
    #[error("record targets activity {record}, ledger is for {ledger}")]
    WrongActivity {
        record: ActivityId,
        ledger: ActivityId,
    },

    /// The hash chain no longer matches the entries
    #[error("ledger integrity violation at entry {index}")]
    IntegrityViolation { index: usize },
}
