use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Schedule regimes supported by the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum ScheduleKind {
    /// Same entry/exit every working day, Monday to Friday.
    #[strum(serialize = "FIXED")]
    #[serde(rename = "FIXED")]
    Fixed,
    /// 24 hours on duty, 24 off; judged against the previous entry rather
    /// than the calendar day.
    #[strum(serialize = "SHIFT_24H")]
    #[serde(rename = "SHIFT_24H")]
    Shift24h,
    /// Named shifts assigned to the employee for date ranges.
    #[strum(serialize = "ROTATING")]
    #[serde(rename = "ROTATING")]
    Rotating,
    /// Hours configured per weekday.
    #[strum(serialize = "PER_WEEKDAY")]
    #[serde(rename = "PER_WEEKDAY")]
    PerWeekday,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ScheduleType {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Oficina matutino")]
    pub name: String,
    pub description: Option<String>,
    /// One of ScheduleKind's wire forms; unrecognized values degrade to FIXED.
    #[schema(example = "FIXED")]
    pub system_kind: String,
    #[schema(example = "09:00:00", value_type = String, nullable = true)]
    pub entry_time: Option<NaiveTime>,
    #[schema(example = "18:00:00", value_type = String, nullable = true)]
    pub exit_time: Option<NaiveTime>,
    #[schema(example = 8.0)]
    pub full_shift_hours: f64,
    #[schema(example = 15)]
    pub tolerance_minutes: i32,
    pub has_meal_window: bool,
    #[schema(value_type = String, nullable = true)]
    pub meal_start: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub meal_end: Option<NaiveTime>,
    /// Per-weekday rows override this type even when system_kind is FIXED.
    pub per_weekday_override: bool,
    pub active: bool,
}

impl ScheduleType {
    pub fn kind(&self) -> ScheduleKind {
        self.system_kind.parse().unwrap_or(ScheduleKind::Fixed)
    }
}

/// Weekday-specific hours for a schedule type. Unique per (type, weekday).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct WeekdayOverride {
    pub id: u64,
    pub schedule_type_id: u64,
    /// 0 = Monday .. 6 = Sunday.
    #[schema(example = 0)]
    pub weekday: u8,
    pub is_workday: bool,
    #[schema(value_type = String, nullable = true)]
    pub entry_time: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub exit_time: Option<NaiveTime>,
    pub half_day: bool,
    #[schema(value_type = String, nullable = true)]
    pub meal_start: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub meal_end: Option<NaiveTime>,
}

/// One named shift inside a rotating cycle. Unique per (type, cycle_position).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct RotatingShift {
    pub id: u64,
    pub schedule_type_id: u64,
    #[schema(example = "Turno A")]
    pub name: String,
    #[schema(example = "06:00:00", value_type = String)]
    pub entry_time: NaiveTime,
    #[schema(example = "14:00:00", value_type = String)]
    pub exit_time: NaiveTime,
    #[schema(example = 1)]
    pub cycle_position: i32,
    #[schema(example = 1)]
    pub consecutive_days: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule_type(kind: &str) -> ScheduleType {
        ScheduleType {
            id: 1,
            name: "test".into(),
            description: None,
            system_kind: kind.into(),
            entry_time: None,
            exit_time: None,
            full_shift_hours: 8.0,
            tolerance_minutes: 15,
            has_meal_window: false,
            meal_start: None,
            meal_end: None,
            per_weekday_override: false,
            active: true,
        }
    }

    #[test]
    fn kind_round_trips_wire_forms() {
        assert_eq!(schedule_type("FIXED").kind(), ScheduleKind::Fixed);
        assert_eq!(schedule_type("SHIFT_24H").kind(), ScheduleKind::Shift24h);
        assert_eq!(schedule_type("ROTATING").kind(), ScheduleKind::Rotating);
        assert_eq!(schedule_type("PER_WEEKDAY").kind(), ScheduleKind::PerWeekday);
    }

    #[test]
    fn unknown_kind_degrades_to_fixed() {
        assert_eq!(schedule_type("SOMETHING_ELSE").kind(), ScheduleKind::Fixed);
        assert_eq!(schedule_type("").kind(), ScheduleKind::Fixed);
    }

    #[test]
    fn kind_display_matches_wire_form() {
        assert_eq!(ScheduleKind::Shift24h.to_string(), "SHIFT_24H");
        assert_eq!(ScheduleKind::PerWeekday.to_string(), "PER_WEEKDAY");
    }
}
