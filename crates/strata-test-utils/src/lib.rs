//! Testing utilities for the Strata workspace
//!
//! Shared fixtures: entity builders, a canned demo plan, and store seeding.

#![allow(missing_docs)]

use chrono::NaiveDate;
use strata_gateway::{MemoryStore, Table};
use strata_model::{
    Activity, ActivityId, Area, AreaId, Chapter, ChapterId, Direction, Expense, ExpenseFlag,
    ExpenseId, ExpenseStatus, Indicator, IndicatorId, NodeStatus, Objective, ObjectiveId,
    PlanSnapshot, RealizationRecord, RecordId, Target, TargetId, TenantId,
};

pub fn tenant() -> TenantId {
    TenantId::from("acme")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn area(id: &str, name: &str) -> Area {
    Area {
        id: AreaId::from(id),
        code: id.to_uppercase(),
        name: name.to_string(),
        status: NodeStatus::Active,
    }
}

pub fn objective(id: &str, area: &str, name: &str) -> Objective {
    Objective {
        id: ObjectiveId::from(id),
        area_id: AreaId::from(area),
        code: id.to_uppercase(),
        name: name.to_string(),
        status: NodeStatus::Active,
    }
}

pub fn target(id: &str, objective: &str, name: &str) -> Target {
    Target {
        id: TargetId::from(id),
        objective_id: ObjectiveId::from(objective),
        code: id.to_uppercase(),
        name: name.to_string(),
        status: NodeStatus::Active,
        end_date: None,
    }
}

pub fn indicator(id: &str, target: &str, actual: f64, goal: f64) -> Indicator {
    Indicator {
        id: IndicatorId::from(id),
        target_id: TargetId::from(target),
        code: id.to_uppercase(),
        name: format!("Indicator {id}"),
        status: NodeStatus::Active,
        actual_value: actual,
        target_value: goal,
        direction: Direction::Increasing,
    }
}

pub fn activity(id: &str, target: &str, planned: f64) -> Activity {
    Activity {
        id: ActivityId::from(id),
        target_id: TargetId::from(target),
        chapter_id: Some(ChapterId::from("ch-1")),
        code: id.to_uppercase(),
        name: format!("Activity {id}"),
        status: NodeStatus::Active,
        planned_budget: planned,
    }
}

pub fn realization(activity: &str, day: (i32, u32, u32), pct: f64) -> RealizationRecord {
    RealizationRecord {
        id: RecordId::new(),
        activity_id: ActivityId::from(activity),
        record_date: date(day.0, day.1, day.2),
        completion_percentage: pct,
        work_performed: "field work performed".to_string(),
        expense_flag: ExpenseFlag::No,
        evidence_ref: None,
    }
}

pub fn expense(id: &str, activity: &str, amount: f64, status: ExpenseStatus) -> Expense {
    Expense {
        id: ExpenseId::from(id),
        activity_id: ActivityId::from(activity),
        chapter_id: ChapterId::from("ch-1"),
        amount,
        vat_rate: 0.0,
        status,
        description: String::new(),
    }
}

pub fn chapter(id: &str, annual: f64) -> Chapter {
    Chapter {
        id: ChapterId::from(id),
        code: id.to_uppercase(),
        name: format!("Chapter {id}"),
        annual_budget: annual,
    }
}

/// A small but complete demo plan: one area, two objectives, mixed child
/// types, one chapter, one activity with ledger records and expenses.
#[must_use]
pub fn demo_snapshot() -> PlanSnapshot {
    let mut snap = PlanSnapshot::new(tenant());
    snap.areas.push(area("ar-1", "Service Quality"));
    snap.objectives
        .push(objective("ob-1", "ar-1", "Faster processing"));
    snap.objectives
        .push(objective("ob-2", "ar-1", "Wider coverage"));
    snap.targets
        .push(target("t-1", "ob-1", "Cut processing time"));
    snap.targets.push(target("t-2", "ob-2", "Reach 10 districts"));
    snap.indicators.push(indicator("in-1", "t-1", 80.0, 100.0));
    snap.indicators.push(indicator("in-2", "t-2", 2.0, 10.0));
    snap.activities.push(activity("ac-1", "t-2", 5_000.0));
    snap.records.push(realization("ac-1", (2026, 3, 5), 40.0));
    snap.records.push(realization("ac-1", (2026, 4, 2), 80.0));
    snap.expenses
        .push(expense("e-1", "ac-1", 1_200.0, ExpenseStatus::Approved));
    snap.expenses
        .push(expense("e-2", "ac-1", 900.0, ExpenseStatus::Pending));
    snap.chapters.push(chapter("ch-1", 20_000.0));
    snap
}

/// Seed a [`MemoryStore`] with a snapshot's rows, table by table
pub fn seed_store(store: &MemoryStore, snapshot: &PlanSnapshot) {
    let tenant = &snapshot.tenant;
    store.seed(
        Table::Areas,
        tenant,
        snapshot.areas.iter().map(to_row).collect(),
    );
    store.seed(
        Table::Objectives,
        tenant,
        snapshot.objectives.iter().map(to_row).collect(),
    );
    store.seed(
        Table::Targets,
        tenant,
        snapshot.targets.iter().map(to_row).collect(),
    );
    store.seed(
        Table::Indicators,
        tenant,
        snapshot.indicators.iter().map(to_row).collect(),
    );
    store.seed(
        Table::Activities,
        tenant,
        snapshot.activities.iter().map(to_row).collect(),
    );
    store.seed(
        Table::RealizationRecords,
        tenant,
        snapshot.records.iter().map(to_row).collect(),
    );
    store.seed(
        Table::Expenses,
        tenant,
        snapshot.expenses.iter().map(to_row).collect(),
    );
    store.seed(
        Table::BudgetChapters,
        tenant,
        snapshot.chapters.iter().map(to_row).collect(),
    );
}

fn to_row<T: serde::Serialize>(entity: &T) -> serde_json::Value {
    serde_json::to_value(entity).expect("fixture entities always serialize")
}
