//! Hierarchy aggregator
//!
//! Walks Area → Objective → Target → {Indicator, Activity} bottom-up over
//! one snapshot. Evaluation order is fixed:
//!
//! 1. Indicator completion from the calculator (or `0` if cancelled)
//! 2. Activity completion from the ledger mean (or `0` if cancelled)
//! 3. Target = mean of non-cancelled Indicator ∪ Activity completions
//! 4. Objective = mean of non-cancelled Targets
//! 5. Area = mean of non-cancelled Objectives
//!
//! A node with zero non-cancelled children reads `0` - never NaN. Nodes
//! whose parent is missing from the snapshot simply never appear in the
//! tree; the pass logs how many were dropped and carries on.

use crate::budget::activity_budget;
use crate::completion::completion;
use crate::schedule::{assess_schedule, ScheduleStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strata_ledger::LedgerSet;
use strata_model::{
    Activity, Area, Indicator, ItemLevel, NodeStatus, Objective, PlanSnapshot, Target,
};

/// One node of the derived tree - the read-only projection reporting
/// consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRollup {
    pub id: String,
    pub code: String,
    pub name: String,
    pub level: ItemLevel,
    pub status: NodeStatus,
    /// Always in `[0,100]`
    pub completion: f64,
    pub planned_budget: f64,
    pub actual_budget: f64,
    /// Present on Targets only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleStatus>,
    #[serde(default)]
    pub children: Vec<NodeRollup>,
}

impl NodeRollup {
    /// Depth-first lookup by node id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&NodeRollup> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

/// The full derived view of one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupTree {
    /// Reference date the pass was computed against
    pub as_of: NaiveDate,
    pub areas: Vec<NodeRollup>,
}

impl RollupTree {
    /// Depth-first lookup by node id across all areas
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&NodeRollup> {
        self.areas.iter().find_map(|a| a.find(id))
    }
}

/// Mean of the completions of non-cancelled children
///
/// Zero non-cancelled children → `0`, the explicit zero-child policy.
fn mean_of_included(children: &[NodeRollup]) -> f64 {
    let included: Vec<f64> = children
        .iter()
        .filter(|c| !c.status.is_cancelled())
        .map(|c| c.completion)
        .collect();
    if included.is_empty() {
        return 0.0;
    }
    included.iter().sum::<f64>() / included.len() as f64
}

fn sum_budgets(children: &[NodeRollup]) -> (f64, f64) {
    children.iter().fold((0.0, 0.0), |(p, a), c| {
        (p + c.planned_budget, a + c.actual_budget)
    })
}

fn indicator_rollup(indicator: &Indicator) -> NodeRollup {
    let value = if indicator.status.is_cancelled() {
        0.0
    } else {
        completion(
            indicator.actual_value,
            indicator.target_value,
            indicator.direction,
        )
    };
    NodeRollup {
        id: indicator.id.to_string(),
        code: indicator.code.clone(),
        name: indicator.name.clone(),
        level: ItemLevel::Indicator,
        status: indicator.status,
        completion: value,
        planned_budget: 0.0,
        actual_budget: 0.0,
        schedule: None,
        children: Vec::new(),
    }
}

fn activity_rollup(
    activity: &Activity,
    snapshot: &PlanSnapshot,
    ledgers: &LedgerSet,
) -> NodeRollup {
    let value = if activity.status.is_cancelled() {
        0.0
    } else {
        ledgers.completion_of(&activity.id)
    };
    let line = activity_budget(activity, &snapshot.expenses);
    NodeRollup {
        id: activity.id.to_string(),
        code: activity.code.clone(),
        name: activity.name.clone(),
        level: ItemLevel::Activity,
        status: activity.status,
        completion: value,
        planned_budget: line.planned_budget,
        actual_budget: line.actual_budget,
        schedule: None,
        children: Vec::new(),
    }
}

fn target_rollup(
    target: &Target,
    snapshot: &PlanSnapshot,
    ledgers: &LedgerSet,
    as_of: NaiveDate,
) -> NodeRollup {
    let mut children: Vec<NodeRollup> = snapshot
        .indicators_of(&target.id)
        .map(indicator_rollup)
        .collect();
    children.extend(
        snapshot
            .activities_of(&target.id)
            .map(|a| activity_rollup(a, snapshot, ledgers)),
    );

    let value = if target.status.is_cancelled() {
        0.0
    } else {
        mean_of_included(&children)
    };
    let (planned, actual) = sum_budgets(&children);
    let schedule = if target.status.is_cancelled() {
        None
    } else {
        Some(assess_schedule(target, value, as_of))
    };
    NodeRollup {
        id: target.id.to_string(),
        code: target.code.clone(),
        name: target.name.clone(),
        level: ItemLevel::Target,
        status: target.status,
        completion: value,
        planned_budget: planned,
        actual_budget: actual,
        schedule,
        children,
    }
}

fn objective_rollup(
    objective: &Objective,
    snapshot: &PlanSnapshot,
    ledgers: &LedgerSet,
    as_of: NaiveDate,
) -> NodeRollup {
    let children: Vec<NodeRollup> = snapshot
        .targets_of(&objective.id)
        .map(|t| target_rollup(t, snapshot, ledgers, as_of))
        .collect();
    let value = if objective.status.is_cancelled() {
        0.0
    } else {
        mean_of_included(&children)
    };
    let (planned, actual) = sum_budgets(&children);
    NodeRollup {
        id: objective.id.to_string(),
        code: objective.code.clone(),
        name: objective.name.clone(),
        level: ItemLevel::Objective,
        status: objective.status,
        completion: value,
        planned_budget: planned,
        actual_budget: actual,
        schedule: None,
        children,
    }
}

fn area_rollup(
    area: &Area,
    snapshot: &PlanSnapshot,
    ledgers: &LedgerSet,
    as_of: NaiveDate,
) -> NodeRollup {
    let children: Vec<NodeRollup> = snapshot
        .objectives_of(&area.id)
        .map(|o| objective_rollup(o, snapshot, ledgers, as_of))
        .collect();
    let value = if area.status.is_cancelled() {
        0.0
    } else {
        mean_of_included(&children)
    };
    let (planned, actual) = sum_budgets(&children);
    NodeRollup {
        id: area.id.to_string(),
        code: area.code.clone(),
        name: area.name.clone(),
        level: ItemLevel::Area,
        status: area.status,
        completion: value,
        planned_budget: planned,
        actual_budget: actual,
        schedule: None,
        children,
    }
}

/// Full aggregation pass over one snapshot
///
/// Pure function of its inputs: calling it twice on the same snapshot
/// yields identical numbers.
#[must_use]
pub fn rollup(snapshot: &PlanSnapshot, ledgers: &LedgerSet, as_of: NaiveDate) -> RollupTree {
    let dropped = orphan_count(snapshot);
    if dropped > 0 {
        tracing::warn!(
            dropped,
            tenant = %snapshot.tenant,
            "snapshot contains nodes with missing parents; they are excluded from the rollup"
        );
    }
    let areas = snapshot
        .areas
        .iter()
        .map(|a| area_rollup(a, snapshot, ledgers, as_of))
        .collect();
    RollupTree { as_of, areas }
}

fn orphan_count(snapshot: &PlanSnapshot) -> usize {
    let areas: HashSet<&str> = snapshot.areas.iter().map(|a| a.id.as_str()).collect();
    let objectives: HashSet<&str> = snapshot
        .objectives
        .iter()
        .map(|o| o.id.as_str())
        .collect();
    let targets: HashSet<&str> = snapshot.targets.iter().map(|t| t.id.as_str()).collect();

    snapshot
        .objectives
        .iter()
        .filter(|o| !areas.contains(o.area_id.as_str()))
        .count()
        + snapshot
            .targets
            .iter()
            .filter(|t| !objectives.contains(t.objective_id.as_str()))
            .count()
        + snapshot
            .indicators
            .iter()
            .filter(|i| !targets.contains(i.target_id.as_str()))
            .count()
        + snapshot
            .activities
            .iter()
            .filter(|a| !targets.contains(a.target_id.as_str()))
            .count()
}
