//! Budget roll-up: Activity lines and Chapter envelopes

use serde::{Deserialize, Serialize};
use strata_model::{Activity, Chapter, ChapterId, Expense, PlanSnapshot};

/// Planned vs actual amounts for one node
///
/// Sign convention: positive variance = under budget, negative = over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub planned_budget: f64,
    /// Sum of approved expenses' gross amounts only; pending and rejected
    /// claims never count
    pub actual_budget: f64,
    pub variance: f64,
    pub variance_pct: f64,
}

/// A Chapter envelope with its members' aggregated line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterBudget {
    pub chapter_id: ChapterId,
    pub code: String,
    pub name: String,
    pub annual_budget: f64,
    pub line: BudgetLine,
    /// Share of the annual envelope consumed by planned spend -
    /// utilization of the envelope, independent of realization variance
    pub allocation_pct: f64,
}

/// Variance as a percentage of planned spend
///
/// `planned == 0` with spend is fully unplanned: flagged as `-100` by
/// explicit special case, not a generic division.
#[must_use]
fn variance_pct(planned: f64, actual: f64) -> f64 {
    if planned == 0.0 {
        if actual > 0.0 {
            return -100.0;
        }
        return 0.0;
    }
    (planned - actual) / planned * 100.0
}

/// Budget line for one Activity
///
/// A cancelled Activity reports `planned_budget = 0` so cancelled work
/// never inflates a Chapter's planned envelope. Spend already approved
/// against it remains a fact and stays in `actual_budget`.
#[must_use]
pub fn activity_budget<'a, I>(activity: &Activity, expenses: I) -> BudgetLine
where
    I: IntoIterator<Item = &'a Expense>,
{
    let planned = if activity.status.is_cancelled() {
        0.0
    } else {
        activity.planned_budget
    };
    let actual: f64 = expenses
        .into_iter()
        .filter(|e| e.activity_id == activity.id && e.counts_toward_actual())
        .map(Expense::total_amount)
        .sum();
    BudgetLine {
        planned_budget: planned,
        actual_budget: actual,
        variance: planned - actual,
        variance_pct: variance_pct(planned, actual),
    }
}

/// Envelope roll-up for one Chapter
///
/// Sums the already-computed lines of its member Activities and derives
/// `allocation_pct` against the annual envelope (`0` for a zero envelope).
#[must_use]
pub fn chapter_budget(chapter: &Chapter, snapshot: &PlanSnapshot) -> ChapterBudget {
    let mut planned = 0.0;
    let mut actual = 0.0;
    for activity in snapshot.activities_in_chapter(&chapter.id) {
        let line = activity_budget(activity, &snapshot.expenses);
        planned += line.planned_budget;
        actual += line.actual_budget;
    }
    let allocation_pct = if chapter.annual_budget == 0.0 {
        0.0
    } else {
        planned / chapter.annual_budget * 100.0
    };
    ChapterBudget {
        chapter_id: chapter.id.clone(),
        code: chapter.code.clone(),
        name: chapter.name.clone(),
        annual_budget: chapter.annual_budget,
        line: BudgetLine {
            planned_budget: planned,
            actual_budget: actual,
            variance: planned - actual,
            variance_pct: variance_pct(planned, actual),
        },
        allocation_pct,
    }
}

/// Envelope roll-ups for every Chapter in the snapshot
#[must_use]
pub fn chapter_budgets(snapshot: &PlanSnapshot) -> Vec<ChapterBudget> {
    snapshot
        .chapters
        .iter()
        .map(|c| chapter_budget(c, snapshot))
        .collect()
}
