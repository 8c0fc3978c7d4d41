//! Plan snapshot - one tenant's full plan state, taken in a single pass
//!
//! The aggregator is a pure function over a snapshot; nothing is re-fetched
//! mid-computation, which is what makes one rendered view internally
//! consistent. Across snapshots there is no monotonicity guarantee - a
//! slower read can race a faster write - and that is accepted.

use crate::entity::{
    Activity, Area, Chapter, Expense, Indicator, Objective, RealizationRecord, Target,
};
use crate::id::{ActivityId, AreaId, ChapterId, ObjectiveId, TargetId, TenantId};
use serde::{Deserialize, Serialize};

/// All plan data for one tenant
///
/// Child lookups are linear scans; plan trees are organization-sized
/// (hundreds of nodes), not dataset-sized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub tenant: TenantId,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub records: Vec<RealizationRecord>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl PlanSnapshot {
    /// Empty snapshot for a tenant
    #[inline]
    #[must_use]
    pub fn new(tenant: TenantId) -> Self {
        Self {
            tenant,
            areas: Vec::new(),
            objectives: Vec::new(),
            targets: Vec::new(),
            indicators: Vec::new(),
            activities: Vec::new(),
            records: Vec::new(),
            expenses: Vec::new(),
            chapters: Vec::new(),
        }
    }

    /// Objectives under an Area
    pub fn objectives_of(&self, area: &AreaId) -> impl Iterator<Item = &Objective> {
        let area = area.clone();
        self.objectives.iter().filter(move |o| o.area_id == area)
    }

    /// Targets under an Objective
    pub fn targets_of(&self, objective: &ObjectiveId) -> impl Iterator<Item = &Target> {
        let objective = objective.clone();
        self.targets
            .iter()
            .filter(move |t| t.objective_id == objective)
    }

    /// Indicators under a Target
    pub fn indicators_of(&self, target: &TargetId) -> impl Iterator<Item = &Indicator> {
        let target = target.clone();
        self.indicators.iter().filter(move |i| i.target_id == target)
    }

    /// Activities under a Target
    pub fn activities_of(&self, target: &TargetId) -> impl Iterator<Item = &Activity> {
        let target = target.clone();
        self.activities.iter().filter(move |a| a.target_id == target)
    }

    /// Expenses claimed against an Activity
    pub fn expenses_of(&self, activity: &ActivityId) -> impl Iterator<Item = &Expense> {
        let activity = activity.clone();
        self.expenses
            .iter()
            .filter(move |e| e.activity_id == activity)
    }

    /// Activities budgeted against a Chapter
    pub fn activities_in_chapter(&self, chapter: &ChapterId) -> impl Iterator<Item = &Activity> {
        let chapter = chapter.clone();
        self.activities
            .iter()
            .filter(move |a| a.chapter_id.as_ref() == Some(&chapter))
    }

    /// Realization records for an Activity, in chronological order
    #[must_use]
    pub fn records_of(&self, activity: &ActivityId) -> Vec<&RealizationRecord> {
        let mut records: Vec<&RealizationRecord> = self
            .records
            .iter()
            .filter(|r| &r.activity_id == activity)
            .collect();
        records.sort_by_key(|r| (r.record_date, r.id));
        records
    }

    /// Total node count across all hierarchy levels
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.areas.len()
            + self.objectives.len()
            + self.targets.len()
            + self.indicators.len()
            + self.activities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IndicatorId;
    use crate::status::NodeStatus;

    fn snapshot_with_two_objectives() -> PlanSnapshot {
        let mut snap = PlanSnapshot::new(TenantId::from("acme"));
        snap.areas.push(Area {
            id: AreaId::from("ar-1"),
            code: "A1".into(),
            name: "Service Quality".into(),
            status: NodeStatus::Active,
        });
        for n in 1..=2 {
            snap.objectives.push(Objective {
                id: ObjectiveId::from(format!("ob-{n}").as_str()),
                area_id: AreaId::from("ar-1"),
                code: format!("O{n}"),
                name: format!("Objective {n}"),
                status: NodeStatus::Active,
            });
        }
        snap
    }

    #[test]
    fn child_lookup_filters_by_parent() {
        let snap = snapshot_with_two_objectives();
        assert_eq!(snap.objectives_of(&AreaId::from("ar-1")).count(), 2);
        assert_eq!(snap.objectives_of(&AreaId::from("ar-2")).count(), 0);
        assert_eq!(snap.node_count(), 3);
    }

    #[test]
    fn records_of_sorts_chronologically() {
        use crate::entity::RealizationRecord;
        use crate::id::RecordId;
        use crate::status::ExpenseFlag;
        use chrono::NaiveDate;

        let mut snap = PlanSnapshot::new(TenantId::from("acme"));
        let day = |d: u32| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
        for (d, pct) in [(20, 60.0), (5, 20.0), (12, 40.0)] {
            snap.records.push(RealizationRecord {
                id: RecordId::new(),
                activity_id: ActivityId::from("ac-1"),
                record_date: day(d),
                completion_percentage: pct,
                work_performed: "site visit".into(),
                expense_flag: ExpenseFlag::No,
                evidence_ref: None,
            });
        }

        let ordered: Vec<f64> = snap
            .records_of(&ActivityId::from("ac-1"))
            .iter()
            .map(|r| r.completion_percentage)
            .collect();
        assert_eq!(ordered, vec![20.0, 40.0, 60.0]);
    }

    #[test]
    fn unknown_indicator_parent_yields_no_children() {
        let snap = snapshot_with_two_objectives();
        let _ = IndicatorId::from("unused");
        assert_eq!(snap.indicators_of(&TargetId::from("missing")).count(), 0);
    }
}
