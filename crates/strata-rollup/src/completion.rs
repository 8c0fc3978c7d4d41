//! Single-node completion calculator

use strata_model::Direction;

/// Completion ratio of an actual against a target, in `[0,100]`
///
/// - `target == 0` returns `0` - a divide-by-zero guard, documented edge
///   case rather than an error.
/// - `Increasing`: `actual / target`, as a clamped percentage.
/// - `Decreasing` (lower actual is better): `actual == 0` is full marks;
///   otherwise `target / actual`, clamped. Beating the ceiling caps at 100.
///
/// Cancelled nodes are short-circuited to `0` by the aggregator before this
/// function is reached; the calculator itself has no status concept.
#[must_use]
pub fn completion(actual: f64, target: f64, direction: Direction) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    match direction {
        Direction::Increasing => (actual / target * 100.0).clamp(0.0, 100.0),
        Direction::Decreasing => {
            if actual == 0.0 {
                100.0
            } else {
                (target / actual * 100.0).clamp(0.0, 100.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increasing_partial_progress() {
        assert!((completion(30.0, 60.0, Direction::Increasing) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn increasing_overshoot_clamps_to_100() {
        assert_eq!(completion(150.0, 100.0, Direction::Increasing), 100.0);
    }

    #[test]
    fn zero_target_guards_division() {
        assert_eq!(completion(10.0, 0.0, Direction::Increasing), 0.0);
        assert_eq!(completion(10.0, 0.0, Direction::Decreasing), 0.0);
    }

    #[test]
    fn decreasing_beating_ceiling_is_full_marks() {
        // target 10, actual 5: halved the bad number, capped at 100
        assert_eq!(completion(5.0, 10.0, Direction::Decreasing), 100.0);
    }

    #[test]
    fn decreasing_zero_actual_is_full_marks() {
        assert_eq!(completion(0.0, 10.0, Direction::Decreasing), 100.0);
    }

    #[test]
    fn decreasing_overshoot_scales_down() {
        // target 10, actual 20: twice the allowed ceiling
        assert!((completion(20.0, 10.0, Direction::Decreasing) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn negative_actual_clamps_to_zero() {
        assert_eq!(completion(-5.0, 10.0, Direction::Increasing), 0.0);
    }
}
