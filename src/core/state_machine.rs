//! Per-employee-per-day movement state machine. The last recorded movement
//! determines the next one; EXIT (and anything anomalous for the schedule's
//! meal configuration) restarts the cycle with a fresh ENTRY.

use chrono::NaiveTime;

use crate::core::resolver::DaySchedule;
use crate::model::attendance::MovementKind;

/// Next movement given the day's last recorded one. Total over all inputs:
/// states that are unreachable under the current meal-window setting reset
/// to ENTRY rather than erroring.
pub fn next_movement(last: Option<MovementKind>, has_meal_window: bool) -> MovementKind {
    use MovementKind::*;

    match (last, has_meal_window) {
        (None, _) => Entry,
        (Some(Entry), false) => Exit,
        (Some(Entry), true) => MealOut,
        (Some(MealOut), true) => MealIn,
        (Some(MealIn), true) => Exit,
        // EXIT, or a meal movement recorded while the schedule defines no
        // meal window: new cycle.
        _ => Entry,
    }
}

/// MEAL_OUT is only allowed inside the configured window. Schedules without
/// a meal window (or with missing window bounds) never allow it.
pub fn meal_window_open(schedule: &DaySchedule, now: NaiveTime) -> bool {
    if !schedule.has_meal_window {
        return false;
    }
    match (schedule.meal_start, schedule.meal_end) {
        (Some(start), Some(end)) => start <= now && now <= end,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schedule::ScheduleKind;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn meal_schedule(start: Option<NaiveTime>, end: Option<NaiveTime>) -> DaySchedule {
        DaySchedule {
            entry_time: Some(t(9, 0)),
            exit_time: Some(t(18, 0)),
            is_workday: true,
            tolerance_minutes: 15,
            has_meal_window: true,
            meal_start: start,
            meal_end: end,
            kind: ScheduleKind::Fixed,
        }
    }

    #[test]
    fn without_meal_window_alternates_entry_exit() {
        use MovementKind::*;
        let mut last = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            let next = next_movement(last, false);
            seen.push(next);
            last = Some(next);
        }
        assert_eq!(seen, vec![Entry, Exit, Entry, Exit]);
    }

    #[test]
    fn with_meal_window_runs_the_full_cycle() {
        use MovementKind::*;
        let mut last = None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            let next = next_movement(last, true);
            seen.push(next);
            last = Some(next);
        }
        assert_eq!(seen, vec![Entry, MealOut, MealIn, Exit, Entry]);
    }

    #[test]
    fn anomalous_states_reset_to_entry() {
        use MovementKind::*;
        // meal movements recorded for a schedule that has no meal window
        assert_eq!(next_movement(Some(MealOut), false), Entry);
        assert_eq!(next_movement(Some(MealIn), false), Entry);
    }

    #[test]
    fn meal_window_bounds_are_inclusive() {
        let schedule = meal_schedule(Some(t(13, 0)), Some(t(14, 0)));
        assert!(meal_window_open(&schedule, t(13, 0)));
        assert!(meal_window_open(&schedule, t(13, 30)));
        assert!(meal_window_open(&schedule, t(14, 0)));
        assert!(!meal_window_open(&schedule, t(12, 59)));
        assert!(!meal_window_open(&schedule, t(14, 1)));
    }

    #[test]
    fn missing_window_bounds_never_open() {
        let schedule = meal_schedule(Some(t(13, 0)), None);
        assert!(!meal_window_open(&schedule, t(13, 30)));
    }

    #[test]
    fn schedule_without_meal_window_never_opens() {
        let mut schedule = meal_schedule(Some(t(13, 0)), Some(t(14, 0)));
        schedule.has_meal_window = false;
        assert!(!meal_window_open(&schedule, t(13, 30)));
    }
}
