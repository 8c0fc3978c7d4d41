//! Engine error taxonomy
//!
//! Validation errors are recoverable by re-prompting; gateway errors
//! propagate as-is with no retry; [`EngineError::InconsistentState`] is the
//! one case that must reach an operator, never be swallowed.

use strata_gateway::GatewayError;
use strata_ledger::LedgerError;
use strata_model::{ActivityId, ExpenseId, ExpenseStatus};
use strata_revision::{RevisionError, RevisionId, RevisionStatus};

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Ledger validation failed before any write
    #[error("realization rejected: {0}")]
    Ledger(#[from] LedgerError),

    /// Revision workflow rule blocked progression
    #[error("revision workflow: {0}")]
    Revision(#[from] RevisionError),

    /// Store failure, propagated as-is
    #[error("gateway failure: {0}")]
    Gateway(#[from] GatewayError),

    /// Row could not be converted to or from its typed form
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A realization was filed against an Activity the store does not know
    #[error("activity '{0}' does not exist for this tenant")]
    UnknownActivity(ActivityId),

    /// Revision id not present in the revisions table
    #[error("revision '{0}' not found")]
    RevisionNotFound(RevisionId),

    /// Only drafts may be proposed
    #[error("revision '{id}' is in status '{status}', only drafts can be proposed")]
    NotADraft {
        id: RevisionId,
        status: RevisionStatus,
    },

    /// Expense decisions are terminal
    #[error("expense '{id}' was already decided as '{status:?}'")]
    ExpenseAlreadyDecided {
        id: ExpenseId,
        status: ExpenseStatus,
    },

    /// Strict mode refused a snapshot with unusable rows
    #[error("snapshot contained {0} rows that failed normalization")]
    MalformedRows(usize),

    /// The revision record was persisted as applied but the entity
    /// mutation did not land - manual reconciliation required
    #[error(
        "revision '{revision}' persisted as applied but mutating '{item}' failed: {source}"
    )]
    InconsistentState {
        revision: RevisionId,
        item: String,
        #[source]
        source: GatewayError,
    },
}

impl EngineError {
    /// Whether this failure requires operator intervention rather than a
    /// retry or a corrected re-submission
    #[inline]
    #[must_use]
    pub fn needs_reconciliation(&self) -> bool {
        matches!(self, Self::InconsistentState { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inconsistent_state_is_flagged_for_operators() {
        let err = EngineError::InconsistentState {
            revision: RevisionId::new(),
            item: "t-1".to_string(),
            source: GatewayError::RowNotFound {
                table: strata_gateway::Table::Targets,
                id: "t-1".to_string(),
            },
        };
        assert!(err.needs_reconciliation());
        assert!(err.to_string().contains("manual") || err.to_string().contains("applied"));
    }

    #[test]
    fn validation_errors_do_not_need_reconciliation() {
        let err = EngineError::Ledger(LedgerError::EmptyWorkPerformed);
        assert!(!err.needs_reconciliation());
    }
}
