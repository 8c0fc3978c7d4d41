//! Plan engine facade
//!
//! The orchestration layer callers talk to:
//! - pulls consistent snapshots through the gateway
//! - recomputes derived views on demand
//! - appends realization records after validation
//! - drives expenses and revisions through their state machines
//!
//! The engine holds no plan state of its own. The persistent store is the
//! only shared mutable resource, and conflicting writers resolve by the
//! store's last-write-wins semantics - there is no version check here.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::view::{recompute, DerivedView};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use strata_gateway::{load_snapshot, PlanStore, Table};
use strata_ledger::validate_record;
use strata_model::{
    Expense, ExpenseId, ExpenseStatus, ItemLevel, PlanSnapshot, RealizationRecord, RecordId,
    TenantId,
};
use strata_revision::{Decision, Revision, RevisionId, RevisionStatus};

fn level_table(level: ItemLevel) -> Table {
    match level {
        ItemLevel::Area => Table::Areas,
        ItemLevel::Objective => Table::Objectives,
        ItemLevel::Target => Table::Targets,
        ItemLevel::Indicator => Table::Indicators,
        ItemLevel::Activity => Table::Activities,
    }
}

/// The central engine
///
/// Generic over the store so tests can inject failures at the seam.
#[derive(Debug)]
pub struct PlanEngine<S: PlanStore> {
    store: S,
    config: EngineConfig,
}

impl<S: PlanStore> PlanEngine<S> {
    /// Create a new engine over a store
    #[inline]
    #[must_use]
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch one consistent snapshot for a tenant
    ///
    /// # Errors
    /// Gateway failures propagate as-is; in strict mode a snapshot with
    /// unusable rows is refused.
    pub async fn snapshot(&self, tenant: &TenantId) -> Result<PlanSnapshot, EngineError> {
        let load = load_snapshot(&self.store, tenant).await?;
        if self.config.strict_rows && load.skipped_rows > 0 {
            return Err(EngineError::MalformedRows(load.skipped_rows));
        }
        Ok(load.snapshot)
    }

    /// Fetch-and-recompute convenience
    ///
    /// # Errors
    /// Same as [`PlanEngine::snapshot`]; the recompute itself cannot fail.
    pub async fn load_and_recompute(
        &self,
        tenant: &TenantId,
        as_of: NaiveDate,
    ) -> Result<DerivedView, EngineError> {
        let snapshot = self.snapshot(tenant).await?;
        Ok(recompute(&snapshot, as_of))
    }

    /// Append a realization record to an Activity's ledger
    ///
    /// Validation happens before any write, so a rejected record never
    /// touches the store. There is no update or delete path - corrections
    /// are new records.
    ///
    /// # Errors
    /// Ledger validation errors, an unknown Activity (when checking is
    /// enabled), or gateway failures.
    pub async fn add_realization(
        &self,
        tenant: &TenantId,
        record: RealizationRecord,
    ) -> Result<RecordId, EngineError> {
        validate_record(&record)?;
        if self.config.check_activity_exists {
            let rows = self.store.fetch_table(Table::Activities, tenant).await?;
            let known = rows
                .iter()
                .any(|r| r.get("id").and_then(Value::as_str) == Some(record.activity_id.as_str()));
            if !known {
                return Err(EngineError::UnknownActivity(record.activity_id));
            }
        }
        let id = record.id;
        let row = serde_json::to_value(&record)?;
        self.store
            .insert_record(Table::RealizationRecords, row, tenant)
            .await?;
        tracing::info!(
            record = %id,
            activity = %record.activity_id,
            pct = record.completion_percentage,
            "realization appended"
        );
        Ok(id)
    }

    /// Submit an expense claim; it always enters as `Pending`
    ///
    /// # Errors
    /// Gateway failures.
    pub async fn submit_expense(
        &self,
        tenant: &TenantId,
        mut expense: Expense,
    ) -> Result<ExpenseId, EngineError> {
        expense.status = ExpenseStatus::Pending;
        let id = expense.id.clone();
        let row = serde_json::to_value(&expense)?;
        self.store.insert_record(Table::Expenses, row, tenant).await?;
        tracing::info!(expense = %id, activity = %expense.activity_id, "expense submitted");
        Ok(id)
    }

    /// Approve or reject a pending expense - a terminal decision
    ///
    /// # Errors
    /// `ExpenseAlreadyDecided` if the expense left `Pending` earlier;
    /// gateway failures otherwise.
    pub async fn decide_expense(
        &self,
        tenant: &TenantId,
        id: &ExpenseId,
        approve: bool,
    ) -> Result<(), EngineError> {
        let rows = self.store.fetch_table(Table::Expenses, tenant).await?;
        let row = rows
            .into_iter()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id.as_str()))
            .ok_or_else(|| {
                EngineError::Gateway(strata_gateway::GatewayError::RowNotFound {
                    table: Table::Expenses,
                    id: id.to_string(),
                })
            })?;
        let expense: Expense = serde_json::from_value(row)?;
        if expense.status.is_decided() {
            return Err(EngineError::ExpenseAlreadyDecided {
                id: id.clone(),
                status: expense.status,
            });
        }
        let status = if approve {
            ExpenseStatus::Approved
        } else {
            ExpenseStatus::Rejected
        };
        self.store
            .update_record(
                Table::Expenses,
                id.as_str(),
                serde_json::json!({ "status": status }),
                tenant,
            )
            .await?;
        tracing::info!(expense = %id, ?status, "expense decided");
        Ok(())
    }

    /// Persist a drafted revision
    ///
    /// # Errors
    /// `NotADraft` for anything past `Draft`; gateway failures otherwise.
    pub async fn propose_revision(
        &self,
        tenant: &TenantId,
        revision: &Revision,
    ) -> Result<RevisionId, EngineError> {
        if revision.status() != RevisionStatus::Draft {
            return Err(EngineError::NotADraft {
                id: revision.id(),
                status: revision.status(),
            });
        }
        let row = serde_json::to_value(revision)?;
        self.store.insert_record(Table::Revisions, row, tenant).await?;
        tracing::info!(
            revision = %revision.id(),
            level = %revision.item_level(),
            item = revision.item_id(),
            "revision proposed"
        );
        Ok(revision.id())
    }

    /// Load a revision by id
    ///
    /// # Errors
    /// `RevisionNotFound` or gateway failures.
    pub async fn fetch_revision(
        &self,
        tenant: &TenantId,
        id: RevisionId,
    ) -> Result<Revision, EngineError> {
        let wanted = id.to_string();
        let rows = self.store.fetch_table(Table::Revisions, tenant).await?;
        let row = rows
            .into_iter()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(wanted.as_str()))
            .ok_or(EngineError::RevisionNotFound(id))?;
        Ok(serde_json::from_value(row)?)
    }

    /// Record the deciding authority on a persisted revision
    ///
    /// # Errors
    /// Workflow errors if the revision is already frozen; gateway failures
    /// otherwise.
    pub async fn record_decision(
        &self,
        tenant: &TenantId,
        id: RevisionId,
        decision: Decision,
    ) -> Result<(), EngineError> {
        let mut revision = self.fetch_revision(tenant, id).await?;
        revision.set_decision(decision)?;
        self.persist_revision(tenant, &revision).await?;
        Ok(())
    }

    /// Drive a revision one step through its state machine
    ///
    /// On `Applied` this performs the two writes: (1) the revision record
    /// update, then (2) the entity mutation to `after_state`. A failure
    /// after the first write surfaces as
    /// [`EngineError::InconsistentState`] - the revision says applied, the
    /// entity disagrees, and an operator has to reconcile. There is no
    /// compensating transaction.
    ///
    /// # Errors
    /// Workflow rule violations, gateway failures, or the inconsistent
    /// two-write case above.
    pub async fn advance_revision(
        &self,
        tenant: &TenantId,
        id: RevisionId,
        to: RevisionStatus,
        at: DateTime<Utc>,
    ) -> Result<Revision, EngineError> {
        let mut revision = self.fetch_revision(tenant, id).await?;
        revision.advance(to, at)?;
        self.persist_revision(tenant, &revision).await?;
        tracing::info!(revision = %id, status = %to, "revision advanced");

        if to == RevisionStatus::Applied {
            let table = level_table(revision.item_level());
            let patch = Value::Object(revision.after_state().clone());
            if let Err(source) = self
                .store
                .update_record(table, revision.item_id(), patch, tenant)
                .await
            {
                tracing::error!(
                    revision = %id,
                    item = revision.item_id(),
                    %source,
                    "entity mutation failed after revision was persisted as applied"
                );
                return Err(EngineError::InconsistentState {
                    revision: id,
                    item: revision.item_id().to_string(),
                    source,
                });
            }
            tracing::info!(
                revision = %id,
                item = revision.item_id(),
                fields = revision.changed_fields().len(),
                "revision applied to entity"
            );
        }
        Ok(revision)
    }

    async fn persist_revision(
        &self,
        tenant: &TenantId,
        revision: &Revision,
    ) -> Result<(), EngineError> {
        let row = serde_json::to_value(revision)?;
        self.store
            .update_record(Table::Revisions, &revision.id().to_string(), row, tenant)
            .await?;
        Ok(())
    }
}
