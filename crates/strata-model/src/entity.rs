//! Hierarchy, ledger and budget entities
//!
//! Field names follow the canonical snake_case form; serde aliases accept
//! the camelCase spellings some store backends deliver. Numeric fields all
//! carry `#[serde(default)]` - a missing number becomes `0`, never a parse
//! failure.

use crate::id::{
    ActivityId, AreaId, ChapterId, ExpenseId, IndicatorId, ObjectiveId, RecordId, TargetId,
};
use crate::status::{Direction, ExpenseFlag, ExpenseStatus, NodeStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Area - root of a plan tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: NodeStatus,
}

/// Objective - belongs to one Area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: ObjectiveId,
    #[serde(alias = "areaId")]
    pub area_id: AreaId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: NodeStatus,
}

/// Target - belongs to one Objective; `end_date` drives delay assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    #[serde(alias = "objectiveId")]
    pub objective_id: ObjectiveId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: NodeStatus,
    /// Planned finish date; `None` means open-ended (never assessed late)
    #[serde(default, alias = "endDate")]
    pub end_date: Option<NaiveDate>,
}

/// Indicator - a measurable under one Target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: IndicatorId,
    #[serde(alias = "targetId")]
    pub target_id: TargetId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default, alias = "actualValue")]
    pub actual_value: f64,
    #[serde(default, alias = "targetValue")]
    pub target_value: f64,
    #[serde(default)]
    pub direction: Direction,
}

/// Activity - a unit of work under one Target, optionally budgeted
/// against a Chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    #[serde(alias = "targetId")]
    pub target_id: TargetId,
    /// Budget envelope membership; `None` for unbudgeted work
    #[serde(default, alias = "chapterId")]
    pub chapter_id: Option<ChapterId>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default, alias = "plannedBudget")]
    pub planned_budget: f64,
}

/// Realization record - an immutable, dated observation of progress on a
/// single Activity
///
/// # Invariants
/// - Never mutated or deleted after persistence; corrections happen via
///   new records.
/// - `completion_percentage` is validated into `[0,100]` by the ledger
///   before any write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealizationRecord {
    #[serde(default)]
    pub id: RecordId,
    #[serde(alias = "activityId")]
    pub activity_id: ActivityId,
    #[serde(alias = "recordDate")]
    pub record_date: NaiveDate,
    #[serde(default, alias = "completionPercentage")]
    pub completion_percentage: f64,
    #[serde(default, alias = "workPerformed")]
    pub work_performed: String,
    #[serde(default, alias = "expenseFlag")]
    pub expense_flag: ExpenseFlag,
    /// Optional pointer to supporting evidence (document id, URL)
    #[serde(default, alias = "evidenceRef")]
    pub evidence_ref: Option<String>,
}

/// Expense - a spend claim against one Activity and one Chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(alias = "activityId")]
    pub activity_id: ActivityId,
    #[serde(alias = "chapterId")]
    pub chapter_id: ChapterId,
    #[serde(default)]
    pub amount: f64,
    /// VAT percentage applied on top of `amount`
    #[serde(default, alias = "vatRate")]
    pub vat_rate: f64,
    #[serde(default)]
    pub status: ExpenseStatus,
    #[serde(default)]
    pub description: String,
}

impl Expense {
    /// Gross amount including VAT
    #[inline]
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.amount * (1.0 + self.vat_rate / 100.0)
    }

    /// Whether this expense counts toward actual budget
    #[inline]
    #[must_use]
    pub fn counts_toward_actual(&self) -> bool {
        self.status == ExpenseStatus::Approved
    }
}

/// Chapter - a budget envelope grouping multiple Activities' planned spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "annualBudget")]
    pub annual_budget: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indicator_accepts_camel_case_rows() {
        let row = json!({
            "id": "ind-1",
            "targetId": "t-1",
            "name": "Coverage",
            "actualValue": 42.0,
            "targetValue": 60.0,
            "direction": "increasing"
        });
        let ind: Indicator = serde_json::from_value(row).unwrap();
        assert_eq!(ind.target_id, TargetId::from("t-1"));
        assert!((ind.actual_value - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_numeric_fields_default_to_zero() {
        let row = json!({ "id": "ind-2", "target_id": "t-1" });
        let ind: Indicator = serde_json::from_value(row).unwrap();
        assert_eq!(ind.actual_value, 0.0);
        assert_eq!(ind.target_value, 0.0);
        assert_eq!(ind.status, NodeStatus::Active);
    }

    #[test]
    fn expense_total_includes_vat() {
        let exp = Expense {
            id: ExpenseId::from("e-1"),
            activity_id: ActivityId::from("a-1"),
            chapter_id: ChapterId::from("c-1"),
            amount: 1000.0,
            vat_rate: 11.0,
            status: ExpenseStatus::Approved,
            description: String::new(),
        };
        assert!((exp.total_amount() - 1110.0).abs() < 1e-9);
        assert!(exp.counts_toward_actual());
    }

    #[test]
    fn pending_expense_never_counts() {
        let exp = Expense {
            id: ExpenseId::from("e-2"),
            activity_id: ActivityId::from("a-1"),
            chapter_id: ChapterId::from("c-1"),
            amount: 500.0,
            vat_rate: 0.0,
            status: ExpenseStatus::Pending,
            description: String::new(),
        };
        assert!(!exp.counts_toward_actual());
    }

    #[test]
    fn target_end_date_is_optional() {
        let row = json!({ "id": "t-1", "objectiveId": "o-1", "endDate": "2026-12-31" });
        let target: Target = serde_json::from_value(row).unwrap();
        assert_eq!(
            target.end_date,
            Some(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
        );

        let row = json!({ "id": "t-2", "objective_id": "o-1" });
        let target: Target = serde_json::from_value(row).unwrap();
        assert_eq!(target.end_date, None);
    }
}
