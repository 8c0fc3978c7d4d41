//! Revision approval state machine

use crate::error::RevisionError;
use serde::{Deserialize, Serialize};

/// Workflow status of a Revision
///
/// `Applied` and `Rejected` are terminal: an applied revision is the
/// permanent historical fact that the entity was mutated to its
/// `after_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionStatus {
    Draft,
    Review,
    Approved,
    Rejected,
    Applied,
}

impl RevisionStatus {
    /// Whether no further transition exists from this status
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        allowed_transitions(*self).is_empty()
    }

    /// Stable string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Applied => "applied",
        }
    }
}

impl std::fmt::Display for RevisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statuses reachable in one step from `from`
#[must_use]
pub fn allowed_transitions(from: RevisionStatus) -> Vec<RevisionStatus> {
    use RevisionStatus::{Applied, Approved, Draft, Rejected, Review};
    match from {
        Draft => vec![Review],
        Review => vec![Approved, Rejected],
        Approved => vec![Applied],
        Rejected | Applied => vec![],
    }
}

/// Validate a single transition
///
/// # Errors
/// `RevisionError::IllegalTransition` when `to` is not reachable from
/// `from` in one step.
pub fn validate_transition(
    from: RevisionStatus,
    to: RevisionStatus,
) -> Result<(), RevisionError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(RevisionError::IllegalTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_are_legal() {
        use RevisionStatus::{Applied, Approved, Draft, Review};
        assert!(validate_transition(Draft, Review).is_ok());
        assert!(validate_transition(Review, Approved).is_ok());
        assert!(validate_transition(Approved, Applied).is_ok());
    }

    #[test]
    fn rejection_is_legal_only_from_review() {
        use RevisionStatus::{Draft, Rejected, Review};
        assert!(validate_transition(Review, Rejected).is_ok());
        assert!(validate_transition(Draft, Rejected).is_err());
    }

    #[test]
    fn terminal_states_have_no_exits() {
        assert!(RevisionStatus::Applied.is_terminal());
        assert!(RevisionStatus::Rejected.is_terminal());
        assert!(!RevisionStatus::Approved.is_terminal());
    }

    #[test]
    fn skipping_review_is_illegal() {
        let err =
            validate_transition(RevisionStatus::Draft, RevisionStatus::Approved).unwrap_err();
        assert!(matches!(err, RevisionError::IllegalTransition { .. }));
    }

    #[test]
    fn applied_cannot_be_reopened() {
        assert!(validate_transition(RevisionStatus::Applied, RevisionStatus::Draft).is_err());
    }
}
