//! Schedule assessment for Targets

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strata_model::Target;

/// Where a Target stands against its planned finish date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Either not yet due, or no end date declared
    OnTrack,
    /// Past its end date with completion below 100
    Delayed,
    /// Completion reached 100
    Done,
}

/// Assess a Target against an explicit reference date
///
/// The caller supplies `as_of`; the crate never reads a clock. A Target due
/// exactly on `as_of` is still on track - delay begins the day after.
#[must_use]
pub fn assess_schedule(target: &Target, completion: f64, as_of: NaiveDate) -> ScheduleStatus {
    if completion >= 100.0 {
        return ScheduleStatus::Done;
    }
    match target.end_date {
        Some(end) if as_of > end => ScheduleStatus::Delayed,
        _ => ScheduleStatus::OnTrack,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_model::{NodeStatus, ObjectiveId, TargetId};

    fn target(end: Option<(i32, u32, u32)>) -> Target {
        Target {
            id: TargetId::from("t-1"),
            objective_id: ObjectiveId::from("o-1"),
            code: "T1".into(),
            name: "Rollout".into(),
            status: NodeStatus::Active,
            end_date: end.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn due_today_is_on_track() {
        let t = target(Some((2026, 6, 30)));
        assert_eq!(
            assess_schedule(&t, 50.0, date(2026, 6, 30)),
            ScheduleStatus::OnTrack
        );
    }

    #[test]
    fn one_day_past_and_incomplete_is_delayed() {
        let t = target(Some((2026, 6, 30)));
        assert_eq!(
            assess_schedule(&t, 99.9, date(2026, 7, 1)),
            ScheduleStatus::Delayed
        );
    }

    #[test]
    fn complete_is_done_even_past_due() {
        let t = target(Some((2026, 6, 30)));
        assert_eq!(
            assess_schedule(&t, 100.0, date(2026, 12, 1)),
            ScheduleStatus::Done
        );
    }

    #[test]
    fn open_ended_target_never_delays() {
        let t = target(None);
        assert_eq!(
            assess_schedule(&t, 10.0, date(2030, 1, 1)),
            ScheduleStatus::OnTrack
        );
    }
}
