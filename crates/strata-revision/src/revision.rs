//! Revision records
//!
//! A Revision captures one proposed change to one hierarchy node: full
//! before/after snapshots, the derived changed-field set, the reason, and
//! the authority that decided it. The record is editable while drafted or
//! under review and immutable from approval onward.

use crate::diff::diff_snapshots;
use crate::error::RevisionError;
use crate::state::{validate_transition, RevisionStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strata_model::ItemLevel;
use ulid::Ulid;

/// Unique revision identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RevisionId(pub Ulid);

impl RevisionId {
    /// Generate new revision ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RevisionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RevisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad class of change a revision carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionType {
    /// Planned values or wording change
    Amendment,
    /// Fixing data entered wrongly
    Correction,
    /// Withdrawing a node from the plan
    Cancellation,
}

/// Why the change is being made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionReason {
    PolicyChange,
    DataCorrection,
    ScopeChange,
    /// Reallocation of planned budget - budget exists at Activity
    /// granularity only, so this reason is level-gated
    BudgetRevision,
    /// Anything else; requires a free-text justification
    Other,
}

impl RevisionReason {
    /// Reasons that are only selectable for Activity-level items
    #[inline]
    #[must_use]
    pub fn activity_only(&self) -> bool {
        matches!(self, Self::BudgetRevision)
    }

    /// Reasons that demand a free-text justification before review
    #[inline]
    #[must_use]
    pub fn requires_justification(&self) -> bool {
        matches!(self, Self::Other)
    }

    /// Stable string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PolicyChange => "policy_change",
            Self::DataCorrection => "data_correction",
            Self::ScopeChange => "scope_change",
            Self::BudgetRevision => "budget_revision",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for RevisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who decided, under which number, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub authority: String,
    pub number: String,
    pub date: NaiveDate,
}

/// One audited change to one hierarchy node
///
/// # Invariants
/// - `changed_fields` is always `diff_snapshots(before, after)`'s key set -
///   recomputed on every snapshot edit, never settable from outside.
/// - Snapshots and decision metadata are editable only in `Draft` and
///   `Review`; from `Approved` onward the record is frozen.
/// - `Applied` is the permanent historical fact that the entity was
///   mutated to `after_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    id: RevisionId,
    item_level: ItemLevel,
    item_id: String,
    revision_type: RevisionType,
    reason: RevisionReason,
    justification: Option<String>,
    decision: Option<Decision>,
    before_state: Map<String, Value>,
    after_state: Map<String, Value>,
    changed_fields: Vec<String>,
    status: RevisionStatus,
    created_at: DateTime<Utc>,
    decided_at: Option<DateTime<Utc>>,
}

impl Revision {
    /// Create a draft revision against one node
    ///
    /// Creation requires the target item, a type and a reason up front.
    /// The justification rule for `Other` is deliberately *not* checked
    /// here - an incomplete draft may be saved; completeness is enforced
    /// when the draft tries to progress.
    ///
    /// # Errors
    /// `ReasonNotAllowedForLevel` when a level-gated reason targets the
    /// wrong level.
    pub fn new(
        item_level: ItemLevel,
        item_id: impl Into<String>,
        revision_type: RevisionType,
        reason: RevisionReason,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RevisionError> {
        if reason.activity_only() && item_level != ItemLevel::Activity {
            return Err(RevisionError::ReasonNotAllowedForLevel {
                reason,
                level: item_level,
            });
        }
        Ok(Self {
            id: RevisionId::new(),
            item_level,
            item_id: item_id.into(),
            revision_type,
            reason,
            justification: None,
            decision: None,
            before_state: Map::new(),
            after_state: Map::new(),
            changed_fields: Vec::new(),
            status: RevisionStatus::Draft,
            created_at,
            decided_at: None,
        })
    }

    /// Attach the free-text justification
    #[must_use]
    pub fn with_justification(mut self, text: impl Into<String>) -> Self {
        self.justification = Some(text.into());
        self
    }

    /// Set the before/after snapshots and re-derive `changed_fields`
    ///
    /// # Errors
    /// `Immutable` outside `Draft`/`Review`.
    pub fn set_states(
        &mut self,
        before: Map<String, Value>,
        after: Map<String, Value>,
    ) -> Result<&[String], RevisionError> {
        self.ensure_editable()?;
        self.changed_fields = diff_snapshots(&before, &after)
            .keys()
            .cloned()
            .collect();
        self.before_state = before;
        self.after_state = after;
        Ok(&self.changed_fields)
    }

    /// Record the deciding authority
    ///
    /// # Errors
    /// `Immutable` outside `Draft`/`Review`.
    pub fn set_decision(&mut self, decision: Decision) -> Result<(), RevisionError> {
        self.ensure_editable()?;
        self.decision = Some(decision);
        Ok(())
    }

    /// Rules that must hold before the draft may enter review
    ///
    /// # Errors
    /// `MissingJustification` for an `Other` reason without text;
    /// `NoChanges` when the snapshots are identical.
    pub fn ready_for_review(&self) -> Result<(), RevisionError> {
        if self.reason.requires_justification()
            && self
                .justification
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
        {
            return Err(RevisionError::MissingJustification);
        }
        if self.changed_fields.is_empty() {
            return Err(RevisionError::NoChanges);
        }
        Ok(())
    }

    /// Advance the workflow one step
    ///
    /// Entering `Review` re-checks draft completeness; entering `Approved`
    /// requires the decision metadata. Decision timestamps are recorded on
    /// approval and rejection.
    ///
    /// # Errors
    /// `IllegalTransition` for any step not in the table, plus the
    /// per-step rule errors above.
    pub fn advance(&mut self, to: RevisionStatus, at: DateTime<Utc>) -> Result<(), RevisionError> {
        validate_transition(self.status, to)?;
        match to {
            RevisionStatus::Review => self.ready_for_review()?,
            RevisionStatus::Approved => {
                if self.decision.is_none() {
                    return Err(RevisionError::MissingDecision);
                }
                self.decided_at = Some(at);
            }
            RevisionStatus::Rejected => {
                self.decided_at = Some(at);
            }
            RevisionStatus::Draft | RevisionStatus::Applied => {}
        }
        self.status = to;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), RevisionError> {
        match self.status {
            RevisionStatus::Draft | RevisionStatus::Review => Ok(()),
            frozen => Err(RevisionError::Immutable(frozen)),
        }
    }

    /// Revision id
    #[inline]
    #[must_use]
    pub fn id(&self) -> RevisionId {
        self.id
    }

    /// Level of the revised node
    #[inline]
    #[must_use]
    pub fn item_level(&self) -> ItemLevel {
        self.item_level
    }

    /// Id of the revised node
    #[inline]
    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Workflow status
    #[inline]
    #[must_use]
    pub fn status(&self) -> RevisionStatus {
        self.status
    }

    /// Change class
    #[inline]
    #[must_use]
    pub fn revision_type(&self) -> RevisionType {
        self.revision_type
    }

    /// Stated reason
    #[inline]
    #[must_use]
    pub fn reason(&self) -> RevisionReason {
        self.reason
    }

    /// Free-text justification, if any
    #[inline]
    #[must_use]
    pub fn justification(&self) -> Option<&str> {
        self.justification.as_deref()
    }

    /// Deciding authority, once recorded
    #[inline]
    #[must_use]
    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    /// Derived changed-field keys
    #[inline]
    #[must_use]
    pub fn changed_fields(&self) -> &[String] {
        &self.changed_fields
    }

    /// Snapshot of the node before the change
    #[inline]
    #[must_use]
    pub fn before_state(&self) -> &Map<String, Value> {
        &self.before_state
    }

    /// Snapshot the node is mutated to on apply
    #[inline]
    #[must_use]
    pub fn after_state(&self) -> &Map<String, Value> {
        &self.after_state
    }

    /// Creation timestamp
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Approval/rejection timestamp, once decided
    #[inline]
    #[must_use]
    pub fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-06-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn decision() -> Decision {
        Decision {
            authority: "Planning Board".into(),
            number: "PB/2026/014".into(),
            date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        }
    }

    fn draft_with_changes() -> Revision {
        let mut rev = Revision::new(
            ItemLevel::Target,
            "t-1",
            RevisionType::Amendment,
            RevisionReason::PolicyChange,
            now(),
        )
        .unwrap();
        rev.set_states(
            obj(json!({ "name": "Old", "code": "T1" })),
            obj(json!({ "name": "New", "code": "T1" })),
        )
        .unwrap();
        rev
    }

    #[test]
    fn budget_revision_is_activity_only() {
        let err = Revision::new(
            ItemLevel::Target,
            "t-1",
            RevisionType::Amendment,
            RevisionReason::BudgetRevision,
            now(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RevisionError::ReasonNotAllowedForLevel { .. }
        ));

        assert!(Revision::new(
            ItemLevel::Activity,
            "ac-1",
            RevisionType::Amendment,
            RevisionReason::BudgetRevision,
            now(),
        )
        .is_ok());
    }

    #[test]
    fn changed_fields_are_derived_not_supplied() {
        let rev = draft_with_changes();
        assert_eq!(rev.changed_fields(), ["name"]);
    }

    #[test]
    fn other_reason_blocks_review_until_justified() {
        let mut rev = Revision::new(
            ItemLevel::Indicator,
            "in-1",
            RevisionType::Correction,
            RevisionReason::Other,
            now(),
        )
        .unwrap();
        rev.set_states(
            obj(json!({ "actual_value": 5 })),
            obj(json!({ "actual_value": 7 })),
        )
        .unwrap();

        // saving the incomplete draft was fine; progressing is not
        let err = rev.advance(RevisionStatus::Review, now()).unwrap_err();
        assert!(matches!(err, RevisionError::MissingJustification));

        let mut rev = rev.with_justification("typo in the source report");
        rev.advance(RevisionStatus::Review, now()).unwrap();
        assert_eq!(rev.status(), RevisionStatus::Review);
    }

    #[test]
    fn identical_snapshots_cannot_enter_review() {
        let mut rev = Revision::new(
            ItemLevel::Target,
            "t-1",
            RevisionType::Amendment,
            RevisionReason::PolicyChange,
            now(),
        )
        .unwrap();
        let state = obj(json!({ "name": "Same" }));
        rev.set_states(state.clone(), state).unwrap();
        let err = rev.advance(RevisionStatus::Review, now()).unwrap_err();
        assert!(matches!(err, RevisionError::NoChanges));
    }

    #[test]
    fn approval_requires_a_decision() {
        let mut rev = draft_with_changes();
        rev.advance(RevisionStatus::Review, now()).unwrap();
        let err = rev.advance(RevisionStatus::Approved, now()).unwrap_err();
        assert!(matches!(err, RevisionError::MissingDecision));

        rev.set_decision(decision()).unwrap();
        rev.advance(RevisionStatus::Approved, now()).unwrap();
        assert_eq!(rev.decided_at(), Some(now()));
    }

    #[test]
    fn applied_revision_refuses_edits() {
        let mut rev = draft_with_changes();
        rev.advance(RevisionStatus::Review, now()).unwrap();
        rev.set_decision(decision()).unwrap();
        rev.advance(RevisionStatus::Approved, now()).unwrap();
        rev.advance(RevisionStatus::Applied, now()).unwrap();

        let err = rev
            .set_states(obj(json!({})), obj(json!({ "name": "sneaky" })))
            .unwrap_err();
        assert!(matches!(
            err,
            RevisionError::Immutable(RevisionStatus::Applied)
        ));
        // the record still carries what was applied
        assert_eq!(rev.changed_fields(), ["name"]);
        assert_eq!(rev.after_state()["name"], json!("New"));
    }

    #[test]
    fn rejected_is_terminal() {
        let mut rev = draft_with_changes();
        rev.advance(RevisionStatus::Review, now()).unwrap();
        rev.advance(RevisionStatus::Rejected, now()).unwrap();
        let err = rev.advance(RevisionStatus::Review, now()).unwrap_err();
        assert!(matches!(err, RevisionError::IllegalTransition { .. }));
    }

    #[test]
    fn roundtrips_through_json() {
        let rev = draft_with_changes();
        let json = serde_json::to_value(&rev).unwrap();
        let back: Revision = serde_json::from_value(json).unwrap();
        assert_eq!(back, rev);
    }
}
