use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A justification presented for a lateness or a missed day. The linked
/// attendance event is null when the employee missed the whole day.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Justification {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = "Cita medica")]
    pub kind: String,
    pub attendance_event_id: Option<u64>,
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub incident_date: NaiveDate,
    pub reason: String,
    #[schema(example = "PENDING")]
    pub status: String,
    pub review_comment: Option<String>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub reviewed_at: Option<NaiveDateTime>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<NaiveDateTime>,
}
