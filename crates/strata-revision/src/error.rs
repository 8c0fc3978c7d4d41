//! Revision workflow errors
//!
//! Every variant names the rule that blocked progression, so callers can
//! surface a field-level message instead of a generic failure.

use crate::revision::RevisionReason;
use crate::state::RevisionStatus;
use strata_model::ItemLevel;

/// Errors raised by revision creation, editing and workflow transitions
#[derive(Debug, thiserror::Error)]
pub enum RevisionError {
    /// Level gating: some reasons only exist at one hierarchy level
    #[error("reason '{reason}' is only selectable for activity-level items, got '{level}'")]
    ReasonNotAllowedForLevel {
        reason: RevisionReason,
        level: ItemLevel,
    },

    /// A free-text justification is mandatory when the reason is `Other`
    #[error("justification text is mandatory when the revision reason is 'other'")]
    MissingJustification,

    /// Nothing changed between the snapshots; there is nothing to review
    #[error("before and after states are identical; nothing to review")]
    NoChanges,

    /// Approval must record who decided, under which number, and when
    #[error("decision authority, number and date are required before approval")]
    MissingDecision,

    /// Transition not in the state machine's table
    #[error("illegal revision transition: {from} -> {to}")]
    IllegalTransition {
        from: RevisionStatus,
        to: RevisionStatus,
    },

    /// Snapshots may only change while the revision is still being drafted
    /// or reviewed
    #[error("revision in status '{0}' is immutable")]
    Immutable(RevisionStatus),
}
