//! Pure schedule resolution: maps (employee catalog snapshot, date) to the
//! effective daily schedule. Resolution never fails; missing configuration
//! degrades to system defaults.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::model::schedule::{RotatingShift, ScheduleKind, ScheduleType, WeekdayOverride};

/// System-wide fallbacks applied when an employee has no schedule type or a
/// catalog row lacks an entry time. Loaded per operation, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemDefaults {
    pub entry_time: NaiveTime,
    pub tolerance_minutes: i32,
}

impl Default for SystemDefaults {
    fn default() -> Self {
        Self {
            entry_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            tolerance_minutes: 15,
        }
    }
}

/// The resolved set of time/workday parameters for one employee on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    pub entry_time: Option<NaiveTime>,
    pub exit_time: Option<NaiveTime>,
    pub is_workday: bool,
    pub tolerance_minutes: i32,
    pub has_meal_window: bool,
    pub meal_start: Option<NaiveTime>,
    pub meal_end: Option<NaiveTime>,
    pub kind: ScheduleKind,
}

pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

fn monday_to_friday(date: NaiveDate) -> bool {
    weekday_index(date) < 5
}

/// Resolves the effective schedule for `date`.
///
/// `weekday_override` must be the row matching `date`'s weekday, if any;
/// `rotation` the shift of the active assignment covering `date`, if any.
/// Callers fetch only what the employee's regime needs.
pub fn resolve(
    date: NaiveDate,
    schedule: Option<&ScheduleType>,
    weekday_override: Option<&WeekdayOverride>,
    rotation: Option<&RotatingShift>,
    defaults: &SystemDefaults,
) -> DaySchedule {
    let Some(st) = schedule else {
        // No assigned type: system-wide defaults, Monday to Friday.
        return DaySchedule {
            entry_time: Some(defaults.entry_time),
            exit_time: None,
            is_workday: monday_to_friday(date),
            tolerance_minutes: defaults.tolerance_minutes,
            has_meal_window: false,
            meal_start: None,
            meal_end: None,
            kind: ScheduleKind::Fixed,
        };
    };

    match st.kind() {
        ScheduleKind::Shift24h => DaySchedule {
            entry_time: st.entry_time,
            exit_time: st.exit_time,
            // Every date is nominally on duty; the 48h cycle is judged
            // against the previous entry, not the calendar day.
            is_workday: true,
            tolerance_minutes: st.tolerance_minutes,
            has_meal_window: false,
            meal_start: None,
            meal_end: None,
            kind: ScheduleKind::Shift24h,
        },
        ScheduleKind::Rotating => match rotation {
            Some(shift) => DaySchedule {
                entry_time: Some(shift.entry_time),
                exit_time: Some(shift.exit_time),
                is_workday: true,
                tolerance_minutes: st.tolerance_minutes,
                has_meal_window: st.has_meal_window,
                meal_start: st.meal_start,
                meal_end: st.meal_end,
                kind: ScheduleKind::Rotating,
            },
            // No assignment covering the date means no obligation that day.
            None => DaySchedule {
                entry_time: st.entry_time,
                exit_time: st.exit_time,
                is_workday: false,
                tolerance_minutes: st.tolerance_minutes,
                has_meal_window: st.has_meal_window,
                meal_start: st.meal_start,
                meal_end: st.meal_end,
                kind: ScheduleKind::Rotating,
            },
        },
        ScheduleKind::PerWeekday => per_weekday(date, st, weekday_override),
        ScheduleKind::Fixed if st.per_weekday_override => per_weekday(date, st, weekday_override),
        ScheduleKind::Fixed => DaySchedule {
            entry_time: st.entry_time,
            exit_time: st.exit_time,
            is_workday: monday_to_friday(date),
            tolerance_minutes: st.tolerance_minutes,
            has_meal_window: st.has_meal_window,
            meal_start: st.meal_start,
            meal_end: st.meal_end,
            kind: ScheduleKind::Fixed,
        },
    }
}

fn per_weekday(
    date: NaiveDate,
    st: &ScheduleType,
    weekday_override: Option<&WeekdayOverride>,
) -> DaySchedule {
    match weekday_override {
        Some(day) => DaySchedule {
            entry_time: day.entry_time,
            exit_time: day.exit_time,
            is_workday: day.is_workday,
            tolerance_minutes: st.tolerance_minutes,
            // Meal window present iff the day row carries both ends.
            has_meal_window: day.meal_start.is_some() && day.meal_end.is_some(),
            meal_start: day.meal_start,
            meal_end: day.meal_end,
            kind: ScheduleKind::PerWeekday,
        },
        // No row for this weekday: type defaults, Monday to Friday.
        None => DaySchedule {
            entry_time: st.entry_time,
            exit_time: st.exit_time,
            is_workday: monday_to_friday(date),
            tolerance_minutes: st.tolerance_minutes,
            has_meal_window: st.has_meal_window,
            meal_start: st.meal_start,
            meal_end: st.meal_end,
            kind: ScheduleKind::PerWeekday,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // 2026-01-05 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()
    }

    fn schedule(kind: &str) -> ScheduleType {
        ScheduleType {
            id: 1,
            name: "test".into(),
            description: None,
            system_kind: kind.into(),
            entry_time: Some(t(8, 0)),
            exit_time: Some(t(17, 0)),
            full_shift_hours: 8.0,
            tolerance_minutes: 10,
            has_meal_window: true,
            meal_start: Some(t(13, 0)),
            meal_end: Some(t(14, 0)),
            per_weekday_override: false,
            active: true,
        }
    }

    fn shift() -> RotatingShift {
        RotatingShift {
            id: 5,
            schedule_type_id: 1,
            name: "Turno A".into(),
            entry_time: t(6, 0),
            exit_time: t(14, 0),
            cycle_position: 1,
            consecutive_days: 1,
        }
    }

    #[test]
    fn no_schedule_type_uses_defaults_mon_to_fri() {
        let defaults = SystemDefaults::default();
        let day = resolve(monday(), None, None, None, &defaults);
        assert!(day.is_workday);
        assert_eq!(day.entry_time, Some(t(9, 0)));
        assert_eq!(day.tolerance_minutes, 15);
        assert_eq!(day.kind, ScheduleKind::Fixed);

        let weekend = resolve(sunday(), None, None, None, &defaults);
        assert!(!weekend.is_workday);
    }

    #[test]
    fn resolution_is_idempotent() {
        let st = schedule("FIXED");
        let defaults = SystemDefaults::default();
        let a = resolve(monday(), Some(&st), None, None, &defaults);
        let b = resolve(monday(), Some(&st), None, None, &defaults);
        assert_eq!(a, b);
    }

    #[test]
    fn fixed_schedule_uses_own_fields() {
        let st = schedule("FIXED");
        let day = resolve(monday(), Some(&st), None, None, &SystemDefaults::default());
        assert_eq!(day.entry_time, Some(t(8, 0)));
        assert_eq!(day.exit_time, Some(t(17, 0)));
        assert!(day.is_workday);
        assert!(day.has_meal_window);

        let weekend = resolve(sunday(), Some(&st), None, None, &SystemDefaults::default());
        assert!(!weekend.is_workday);
    }

    #[test]
    fn shift_24h_is_always_a_workday_without_meal_window() {
        let st = schedule("SHIFT_24H");
        let day = resolve(sunday(), Some(&st), None, None, &SystemDefaults::default());
        assert!(day.is_workday);
        assert!(!day.has_meal_window);
        assert_eq!(day.meal_start, None);
        assert_eq!(day.kind, ScheduleKind::Shift24h);
    }

    #[test]
    fn rotating_with_assignment_takes_shift_hours() {
        let st = schedule("ROTATING");
        let sh = shift();
        let day = resolve(monday(), Some(&st), None, Some(&sh), &SystemDefaults::default());
        assert!(day.is_workday);
        assert_eq!(day.entry_time, Some(t(6, 0)));
        assert_eq!(day.exit_time, Some(t(14, 0)));
        // tolerance and meal window come from the type, not the shift
        assert_eq!(day.tolerance_minutes, 10);
        assert!(day.has_meal_window);
    }

    #[test]
    fn rotating_without_assignment_is_not_a_workday() {
        let st = schedule("ROTATING");
        let day = resolve(monday(), Some(&st), None, None, &SystemDefaults::default());
        assert!(!day.is_workday);
        assert_eq!(day.entry_time, Some(t(8, 0)));
    }

    #[test]
    fn per_weekday_row_wins() {
        let st = schedule("PER_WEEKDAY");
        let row = WeekdayOverride {
            id: 1,
            schedule_type_id: 1,
            weekday: 0,
            is_workday: true,
            entry_time: Some(t(7, 30)),
            exit_time: Some(t(15, 30)),
            half_day: false,
            meal_start: Some(t(12, 0)),
            meal_end: Some(t(12, 30)),
        };
        let day = resolve(monday(), Some(&st), Some(&row), None, &SystemDefaults::default());
        assert_eq!(day.entry_time, Some(t(7, 30)));
        assert!(day.has_meal_window);
        assert_eq!(day.meal_end, Some(t(12, 30)));
    }

    #[test]
    fn per_weekday_row_without_meal_times_has_no_window() {
        let st = schedule("PER_WEEKDAY");
        let row = WeekdayOverride {
            id: 1,
            schedule_type_id: 1,
            weekday: 0,
            is_workday: false,
            entry_time: None,
            exit_time: None,
            half_day: false,
            meal_start: Some(t(12, 0)),
            meal_end: None,
        };
        let day = resolve(monday(), Some(&st), Some(&row), None, &SystemDefaults::default());
        assert!(!day.is_workday);
        assert!(!day.has_meal_window);
    }

    #[test]
    fn per_weekday_without_row_falls_back_to_type() {
        let st = schedule("PER_WEEKDAY");
        let day = resolve(monday(), Some(&st), None, None, &SystemDefaults::default());
        assert_eq!(day.entry_time, Some(t(8, 0)));
        assert!(day.is_workday);

        let weekend = resolve(sunday(), Some(&st), None, None, &SystemDefaults::default());
        assert!(!weekend.is_workday);
    }

    #[test]
    fn fixed_with_override_flag_dispatches_per_weekday() {
        let mut st = schedule("FIXED");
        st.per_weekday_override = true;
        let row = WeekdayOverride {
            id: 1,
            schedule_type_id: 1,
            weekday: 0,
            is_workday: true,
            entry_time: Some(t(10, 0)),
            exit_time: Some(t(14, 0)),
            half_day: true,
            meal_start: None,
            meal_end: None,
        };
        let day = resolve(monday(), Some(&st), Some(&row), None, &SystemDefaults::default());
        assert_eq!(day.kind, ScheduleKind::PerWeekday);
        assert_eq!(day.entry_time, Some(t(10, 0)));
    }

    #[test]
    fn unknown_kind_resolves_as_fixed() {
        let st = schedule("LEGACY_VALUE");
        let day = resolve(monday(), Some(&st), None, None, &SystemDefaults::default());
        assert_eq!(day.kind, ScheduleKind::Fixed);
        assert!(day.is_workday);
    }
}
