//! Snapshot loading - one consistent pass over the aggregation tables

use crate::store::{GatewayError, PlanStore, Table};
use serde::de::DeserializeOwned;
use serde_json::Value;
use strata_model::{PlanSnapshot, TenantId};

/// A loaded snapshot plus what was left behind
#[derive(Debug)]
pub struct SnapshotLoad {
    pub snapshot: PlanSnapshot,
    /// Rows that failed even lenient normalization and were skipped
    pub skipped_rows: usize,
}

fn rows<T: DeserializeOwned>(table: Table, values: Vec<Value>, skipped: &mut usize) -> Vec<T> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<T>(value) {
            Ok(row) => out.push(row),
            Err(err) => {
                *skipped += 1;
                tracing::warn!(table = %table, %err, "skipping row that failed normalization");
            }
        }
    }
    out
}

/// Fetch the eight aggregation tables concurrently and normalize them
///
/// All reads belong to one logical pass: the returned snapshot is
/// internally consistent and is never refreshed behind the caller's back.
/// Rows that fail normalization are skipped and counted, not fatal -
/// the dashboard must always render.
///
/// # Errors
/// Propagates the first [`GatewayError`] as-is; a failed fetch means no
/// snapshot, never a partial one.
pub async fn load_snapshot(
    store: &dyn PlanStore,
    tenant: &TenantId,
) -> Result<SnapshotLoad, GatewayError> {
    let (areas, objectives, targets, indicators, activities, records, expenses, chapters) =
        futures::try_join!(
            store.fetch_table(Table::Areas, tenant),
            store.fetch_table(Table::Objectives, tenant),
            store.fetch_table(Table::Targets, tenant),
            store.fetch_table(Table::Indicators, tenant),
            store.fetch_table(Table::Activities, tenant),
            store.fetch_table(Table::RealizationRecords, tenant),
            store.fetch_table(Table::Expenses, tenant),
            store.fetch_table(Table::BudgetChapters, tenant),
        )?;

    let mut skipped = 0usize;
    let snapshot = PlanSnapshot {
        tenant: tenant.clone(),
        areas: rows(Table::Areas, areas, &mut skipped),
        objectives: rows(Table::Objectives, objectives, &mut skipped),
        targets: rows(Table::Targets, targets, &mut skipped),
        indicators: rows(Table::Indicators, indicators, &mut skipped),
        activities: rows(Table::Activities, activities, &mut skipped),
        records: rows(Table::RealizationRecords, records, &mut skipped),
        expenses: rows(Table::Expenses, expenses, &mut skipped),
        chapters: rows(Table::BudgetChapters, chapters, &mut skipped),
    };
    Ok(SnapshotLoad {
        snapshot,
        skipped_rows: skipped,
    })
}
