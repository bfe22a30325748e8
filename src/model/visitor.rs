use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Scheduled visitor. The QR token is scanned with the `VISITANTE:` prefix
/// and deactivates automatically after the exit scan.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Visitor {
    pub id: u64,
    #[schema(example = "Carlos Mendez")]
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: String,
    pub department_id: Option<u64>,
    pub reason: String,
    #[schema(example = "2026-01-20", value_type = String, format = "date")]
    pub visit_date: NaiveDate,
    #[schema(example = "11:00:00", value_type = String)]
    pub visit_time: NaiveTime,
    pub qr_token: String,
    pub qr_active: bool,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct VisitRecord {
    pub id: u64,
    pub visitor_id: u64,
    #[schema(value_type = String, format = "date-time")]
    pub entered_at: NaiveDateTime,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub left_at: Option<NaiveDateTime>,
}
