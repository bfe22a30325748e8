//! Lateness computation for ENTRY scans. Regular regimes compare the
//! time-of-day against the resolved entry time plus tolerance; 24h shifts
//! compare elapsed time against the 48-hour work/rest cycle.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::core::resolver::{DaySchedule, SystemDefaults};

/// 24h on, 24h off.
pub const CYCLE_HOURS: f64 = 48.0;
/// Entries under 46h elapsed are early arrivals, not violations.
const EARLY_BAND_HOURS: f64 = 46.0;
/// Entries over 50h elapsed exceed the cycle's 2-hour tolerance band.
const LATE_BAND_HOURS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lateness {
    pub late: bool,
    pub minutes: i32,
}

impl Lateness {
    pub const ON_TIME: Lateness = Lateness {
        late: false,
        minutes: 0,
    };
}

/// Lateness of an ENTRY scan against the resolved day schedule. Minutes are
/// measured from the expected entry time, not from the tolerance limit.
/// Not applicable to 24h shifts; use [`shift24_entry_lateness`] for those.
pub fn entry_lateness(
    schedule: &DaySchedule,
    actual: NaiveTime,
    defaults: &SystemDefaults,
) -> Lateness {
    if !schedule.is_workday {
        return Lateness::ON_TIME;
    }

    // A descriptor without an entry time falls back to the system defaults
    // for both the expected time and the tolerance.
    let (expected, tolerance) = match schedule.entry_time {
        Some(entry) => (entry, schedule.tolerance_minutes),
        None => (defaults.entry_time, defaults.tolerance_minutes),
    };

    let limit = expected + Duration::minutes(tolerance as i64);
    if actual > limit {
        let minutes = ((actual - expected).num_seconds() as f64 / 60.0).round() as i32;
        Lateness {
            late: true,
            minutes,
        }
    } else {
        Lateness::ON_TIME
    }
}

/// Lateness for a 24h-shift ENTRY, judged against the employee's most recent
/// prior entry. The first-ever entry is on time; early returns are not
/// penalized; 46h..=50h elapsed sits inside the cycle's tolerance band.
pub fn shift24_entry_lateness(
    prior_entry: Option<NaiveDateTime>,
    current: NaiveDateTime,
) -> Lateness {
    let Some(prior) = prior_entry else {
        return Lateness::ON_TIME;
    };

    let elapsed_hours = (current - prior).num_seconds() as f64 / 3600.0;
    if elapsed_hours < EARLY_BAND_HOURS {
        Lateness::ON_TIME
    } else if elapsed_hours > LATE_BAND_HOURS {
        let minutes = ((elapsed_hours - CYCLE_HOURS) * 60.0).round() as i32;
        Lateness {
            late: true,
            minutes,
        }
    } else {
        Lateness::ON_TIME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schedule::ScheduleKind;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn dt(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_time(t(h, m, 0))
    }

    fn workday(entry: Option<NaiveTime>, tolerance: i32) -> DaySchedule {
        DaySchedule {
            entry_time: entry,
            exit_time: None,
            is_workday: true,
            tolerance_minutes: tolerance,
            has_meal_window: false,
            meal_start: None,
            meal_end: None,
            kind: ScheduleKind::Fixed,
        }
    }

    #[test]
    fn within_tolerance_is_on_time() {
        let schedule = workday(Some(t(9, 0, 0)), 15);
        let defaults = SystemDefaults::default();
        assert_eq!(
            entry_lateness(&schedule, t(9, 14, 59), &defaults),
            Lateness::ON_TIME
        );
        assert_eq!(
            entry_lateness(&schedule, t(9, 15, 0), &defaults),
            Lateness::ON_TIME
        );
    }

    #[test]
    fn past_tolerance_counts_from_expected() {
        let schedule = workday(Some(t(9, 0, 0)), 15);
        let result = entry_lateness(&schedule, t(9, 15, 1), &SystemDefaults::default());
        assert!(result.late);
        // 15m01s past expected rounds to 15, not 0 past the limit
        assert_eq!(result.minutes, 15);
    }

    #[test]
    fn well_past_tolerance() {
        let schedule = workday(Some(t(9, 0, 0)), 15);
        let result = entry_lateness(&schedule, t(9, 45, 0), &SystemDefaults::default());
        assert!(result.late);
        assert_eq!(result.minutes, 45);
    }

    #[test]
    fn non_workday_is_never_late() {
        let mut schedule = workday(Some(t(9, 0, 0)), 0);
        schedule.is_workday = false;
        let result = entry_lateness(&schedule, t(23, 0, 0), &SystemDefaults::default());
        assert_eq!(result, Lateness::ON_TIME);
    }

    #[test]
    fn missing_entry_time_uses_defaults() {
        let schedule = workday(None, 0);
        let defaults = SystemDefaults::default(); // 09:00, 15 min
        assert_eq!(
            entry_lateness(&schedule, t(9, 10, 0), &defaults),
            Lateness::ON_TIME
        );
        let late = entry_lateness(&schedule, t(9, 20, 0), &defaults);
        assert!(late.late);
        assert_eq!(late.minutes, 20);
    }

    #[test]
    fn first_ever_24h_entry_is_on_time() {
        assert_eq!(shift24_entry_lateness(None, dt(1, 8, 0)), Lateness::ON_TIME);
    }

    #[test]
    fn early_return_is_not_penalized() {
        // 47.5h elapsed
        let result = shift24_entry_lateness(Some(dt(1, 8, 0)), dt(3, 7, 30));
        assert_eq!(result, Lateness::ON_TIME);
    }

    #[test]
    fn inside_tolerance_band_is_on_time() {
        // exactly 50h
        let result = shift24_entry_lateness(Some(dt(1, 8, 0)), dt(3, 10, 0));
        assert_eq!(result, Lateness::ON_TIME);
    }

    #[test]
    fn past_tolerance_band_counts_from_cycle() {
        // 50.5h elapsed -> (50.5 - 48) * 60 = 150
        let result = shift24_entry_lateness(Some(dt(1, 8, 0)), dt(3, 10, 30));
        assert!(result.late);
        assert_eq!(result.minutes, 150);
    }

    #[test]
    fn very_early_return_is_on_time() {
        // 20h elapsed, covering shift swaps
        let result = shift24_entry_lateness(Some(dt(1, 8, 0)), dt(2, 4, 0));
        assert_eq!(result, Lateness::ON_TIME);
    }
}
