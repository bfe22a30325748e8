use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validity window during which a rotating shift applies to an employee.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct RotatingShiftAssignment {
    pub id: u64,
    pub employee_id: u64,
    pub rotating_shift_id: u64,
    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-31", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub active: bool,
}

/// Per-day override managed from the manual scheduling grid. Unique per
/// (employee, date). Never feeds lateness computation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DailyShiftAssignment {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub rotating_shift_id: Option<u64>,
    pub is_rest_day: bool,
    #[schema(value_type = String, nullable = true)]
    pub entry_time: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub exit_time: Option<NaiveTime>,
    pub crosses_midnight: bool,
    pub notes: Option<String>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<NaiveDateTime>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub updated_at: Option<NaiveDateTime>,
}

/// What a daily-assignment write asks for. Shift references carry the times
/// copied from the shift definition at write time; later edits to the shift
/// do not retroactively change stored assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyAssignmentKind {
    Rest,
    ShiftRef {
        shift_id: u64,
        entry: NaiveTime,
        exit: NaiveTime,
    },
    Custom {
        entry: NaiveTime,
        exit: NaiveTime,
    },
}

/// Normalized column values for a daily assignment, derived before persisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAssignmentFields {
    pub rotating_shift_id: Option<u64>,
    pub is_rest_day: bool,
    pub entry_time: Option<NaiveTime>,
    pub exit_time: Option<NaiveTime>,
    pub crosses_midnight: bool,
}

pub fn crosses_midnight(entry: NaiveTime, exit: NaiveTime) -> bool {
    exit < entry
}

/// Pure derivation of the stored fields. A rest day clears the shift
/// reference and both times regardless of what was passed in.
pub fn daily_assignment_fields(kind: DailyAssignmentKind) -> DailyAssignmentFields {
    match kind {
        DailyAssignmentKind::Rest => DailyAssignmentFields {
            rotating_shift_id: None,
            is_rest_day: true,
            entry_time: None,
            exit_time: None,
            crosses_midnight: false,
        },
        DailyAssignmentKind::ShiftRef {
            shift_id,
            entry,
            exit,
        } => DailyAssignmentFields {
            rotating_shift_id: Some(shift_id),
            is_rest_day: false,
            entry_time: Some(entry),
            exit_time: Some(exit),
            crosses_midnight: crosses_midnight(entry, exit),
        },
        DailyAssignmentKind::Custom { entry, exit } => DailyAssignmentFields {
            rotating_shift_id: None,
            is_rest_day: false,
            entry_time: Some(entry),
            exit_time: Some(exit),
            crosses_midnight: crosses_midnight(entry, exit),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn rest_day_clears_shift_ref_and_times() {
        let fields = daily_assignment_fields(DailyAssignmentKind::Rest);
        assert!(fields.is_rest_day);
        assert_eq!(fields.rotating_shift_id, None);
        assert_eq!(fields.entry_time, None);
        assert_eq!(fields.exit_time, None);
        assert!(!fields.crosses_midnight);
    }

    #[test]
    fn shift_ref_copies_times() {
        let fields = daily_assignment_fields(DailyAssignmentKind::ShiftRef {
            shift_id: 7,
            entry: t(6, 0),
            exit: t(14, 0),
        });
        assert_eq!(fields.rotating_shift_id, Some(7));
        assert_eq!(fields.entry_time, Some(t(6, 0)));
        assert_eq!(fields.exit_time, Some(t(14, 0)));
        assert!(!fields.crosses_midnight);
    }

    #[test]
    fn night_shift_crosses_midnight() {
        let fields = daily_assignment_fields(DailyAssignmentKind::Custom {
            entry: t(22, 0),
            exit: t(6, 0),
        });
        assert!(fields.crosses_midnight);
    }

    #[test]
    fn crosses_midnight_iff_exit_before_entry() {
        assert!(crosses_midnight(t(22, 0), t(6, 0)));
        assert!(!crosses_midnight(t(9, 0), t(18, 0)));
        assert!(!crosses_midnight(t(9, 0), t(9, 0)));
    }
}
