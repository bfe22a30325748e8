use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct VacationPeriod {
    pub id: u64,
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-12-31", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub active: bool,
}

/// Vacation balance per (employee, period).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct VacationBalance {
    pub id: u64,
    pub employee_id: u64,
    pub period_id: u64,
    #[schema(example = 12.0)]
    pub total_days: f64,
    #[schema(example = 4.0)]
    pub days_taken: f64,
    /// Hire date used to compute entitled days by seniority.
    #[schema(example = "2020-03-15", value_type = String, format = "date")]
    pub seniority_date: NaiveDate,
}

impl VacationBalance {
    pub fn pending_days(&self) -> f64 {
        self.total_days - self.days_taken
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct VacationRequest {
    pub id: u64,
    pub employee_id: u64,
    pub balance_id: u64,
    #[schema(example = "2026-07-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-07-05", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub requested_days: f64,
    #[schema(example = "PENDING")]
    pub status: String,
    pub reason: Option<String>,
    pub approval_comment: Option<String>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub approved_at: Option<NaiveDateTime>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<NaiveDateTime>,
}

/// Requested days are derived from the inclusive date range before persisting.
pub fn vacation_days(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64 + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn range_is_inclusive() {
        assert_eq!(vacation_days(d(2026, 7, 1), d(2026, 7, 5)), 5.0);
        assert_eq!(vacation_days(d(2026, 7, 1), d(2026, 7, 1)), 1.0);
    }

    #[test]
    fn pending_days_subtracts_taken() {
        let balance = VacationBalance {
            id: 1,
            employee_id: 1,
            period_id: 1,
            total_days: 12.0,
            days_taken: 4.5,
            seniority_date: d(2020, 3, 15),
        };
        assert_eq!(balance.pending_days(), 7.5);
    }
}
