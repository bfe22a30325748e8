use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Category of a single attendance scan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum MovementKind {
    #[strum(serialize = "ENTRY")]
    #[serde(rename = "ENTRY")]
    Entry,
    #[strum(serialize = "MEAL_OUT")]
    #[serde(rename = "MEAL_OUT")]
    MealOut,
    #[strum(serialize = "MEAL_IN")]
    #[serde(rename = "MEAL_IN")]
    MealIn,
    #[strum(serialize = "EXIT")]
    #[serde(rename = "EXIT")]
    Exit,
}

/// Append-only attendance record. The late flag and minutes are set once, in
/// the same transaction that creates the row.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceEvent {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "09:03:21", value_type = String)]
    pub time: NaiveTime,
    #[schema(example = "ENTRY")]
    pub movement_kind: String,
    pub late: bool,
    pub late_minutes: i32,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<NaiveDateTime>,
}
