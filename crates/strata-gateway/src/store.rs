//! Store contract and error taxonomy

use async_trait::async_trait;
use serde_json::Value;
use strata_model::TenantId;

/// The tables the engine consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Areas,
    Objectives,
    Targets,
    Indicators,
    Activities,
    RealizationRecords,
    Expenses,
    BudgetChapters,
    Revisions,
}

impl Table {
    /// All tables, in dependency order
    pub const ALL: [Table; 9] = [
        Table::Areas,
        Table::Objectives,
        Table::Targets,
        Table::Indicators,
        Table::Activities,
        Table::RealizationRecords,
        Table::Expenses,
        Table::BudgetChapters,
        Table::Revisions,
    ];

    /// Store-side table name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Areas => "areas",
            Self::Objectives => "objectives",
            Self::Targets => "targets",
            Self::Indicators => "indicators",
            Self::Activities => "activities",
            Self::RealizationRecords => "realization_records",
            Self::Expenses => "expenses",
            Self::BudgetChapters => "budget_chapters",
            Self::Revisions => "revisions",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the persistence collaborator
///
/// Propagated to callers as-is - the core performs no retry. A write that
/// fails before the store acknowledges it is treated as not written.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport or backend failure
    #[error("store i/o failure on '{table}': {message}")]
    Io { table: Table, message: String },

    /// Row addressed by id does not exist for this tenant
    #[error("row '{id}' not found in '{table}'")]
    RowNotFound { table: Table, id: String },

    /// Row exists but cannot be understood even leniently
    #[error("malformed row in '{table}': {message}")]
    MalformedRow { table: Table, message: String },
}

/// CRUD contract the external store must satisfy
///
/// Every operation is scoped by tenant; rows are untyped JSON until the
/// model boundary normalizes them. Cancellation policy of in-flight calls
/// belongs to the implementor, not to this trait.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// All rows of one table for one tenant
    async fn fetch_table(
        &self,
        table: Table,
        tenant: &TenantId,
    ) -> Result<Vec<Value>, GatewayError>;

    /// Insert a row; the store assigns the id if the row carries none.
    /// Returns the stored row.
    async fn insert_record(
        &self,
        table: Table,
        record: Value,
        tenant: &TenantId,
    ) -> Result<Value, GatewayError>;

    /// Shallow-merge a patch into the row with this id. Returns the
    /// updated row.
    async fn update_record(
        &self,
        table: Table,
        id: &str,
        patch: Value,
        tenant: &TenantId,
    ) -> Result<Value, GatewayError>;

    /// Remove a row
    async fn delete_record(
        &self,
        table: Table,
        id: &str,
        tenant: &TenantId,
    ) -> Result<(), GatewayError>;
}
