//! Property tests for the aggregation primitives.
//!
//! The calculator and the mean are the two places a stray input could
//! smuggle a NaN or an out-of-range number into every dashboard above
//! them, so they get the proptest treatment.

use proptest::prelude::*;
use strata_ledger::{ActivityLedger, LedgerSet};
use strata_model::{
    ActivityId, Area, AreaId, Direction, ExpenseFlag, Indicator, IndicatorId, NodeStatus,
    Objective, ObjectiveId, PlanSnapshot, RealizationRecord, RecordId, Target, TargetId, TenantId,
};
use strata_rollup::{completion, rollup};

fn finite() -> impl Strategy<Value = f64> {
    // covers negatives, zero and large magnitudes; excludes NaN/inf which
    // the store's numeric columns cannot produce
    -1.0e9..1.0e9f64
}

proptest! {
    #[test]
    fn calculator_output_always_in_range(
        actual in finite(),
        target in finite(),
        decreasing in any::<bool>(),
    ) {
        let direction = if decreasing { Direction::Decreasing } else { Direction::Increasing };
        let value = completion(actual, target, direction);
        prop_assert!(value.is_finite());
        prop_assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn ledger_mean_is_permutation_invariant(
        mut percents in proptest::collection::vec(0.0..=100.0f64, 1..20),
    ) {
        let forward = ActivityLedger::new(ActivityId::from("ac-1"));
        for &pct in &percents {
            forward.append(record(pct)).unwrap();
        }
        percents.reverse();
        let reverse = ActivityLedger::new(ActivityId::from("ac-1"));
        for &pct in &percents {
            reverse.append(record(pct)).unwrap();
        }
        prop_assert!((forward.completion() - reverse.completion()).abs() < 1e-6);
    }

    #[test]
    fn tree_completions_always_in_range(
        readings in proptest::collection::vec((finite(), finite(), any::<bool>()), 0..12),
    ) {
        let snap = snapshot_with_indicators(&readings);
        let tree = rollup(&snap, &LedgerSet::new(), chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        for area in &tree.areas {
            assert_in_range(area);
        }
    }
}

fn record(pct: f64) -> RealizationRecord {
    RealizationRecord {
        id: RecordId::new(),
        activity_id: ActivityId::from("ac-1"),
        record_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        completion_percentage: pct,
        work_performed: "work".into(),
        expense_flag: ExpenseFlag::No,
        evidence_ref: None,
    }
}

fn snapshot_with_indicators(readings: &[(f64, f64, bool)]) -> PlanSnapshot {
    let mut snap = PlanSnapshot::new(TenantId::from("prop"));
    snap.areas.push(Area {
        id: AreaId::from("ar-1"),
        code: String::new(),
        name: String::new(),
        status: NodeStatus::Active,
    });
    snap.objectives.push(Objective {
        id: ObjectiveId::from("ob-1"),
        area_id: AreaId::from("ar-1"),
        code: String::new(),
        name: String::new(),
        status: NodeStatus::Active,
    });
    snap.targets.push(Target {
        id: TargetId::from("t-1"),
        objective_id: ObjectiveId::from("ob-1"),
        code: String::new(),
        name: String::new(),
        status: NodeStatus::Active,
        end_date: None,
    });
    for (n, (actual, goal, decreasing)) in readings.iter().enumerate() {
        snap.indicators.push(Indicator {
            id: IndicatorId::from(format!("in-{n}").as_str()),
            target_id: TargetId::from("t-1"),
            code: String::new(),
            name: String::new(),
            status: NodeStatus::Active,
            actual_value: *actual,
            target_value: *goal,
            direction: if *decreasing {
                Direction::Decreasing
            } else {
                Direction::Increasing
            },
        });
    }
    snap
}

fn assert_in_range(node: &strata_rollup::NodeRollup) {
    assert!(node.completion.is_finite(), "NaN at {}", node.id);
    assert!(
        (0.0..=100.0).contains(&node.completion),
        "{} out of range at {}",
        node.completion,
        node.id
    );
    for child in &node.children {
        assert_in_range(child);
    }
}
