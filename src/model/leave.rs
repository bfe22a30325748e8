use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Two-tier approval progression shared by leave and vacation requests.
/// PENDING -> APPROVED_SUPERVISOR -> APPROVED_MANAGEMENT, or REJECTED at
/// either tier. Either approved tier counts as approved for overlay checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum ApprovalState {
    #[strum(serialize = "PENDING")]
    #[serde(rename = "PENDING")]
    Pending,
    #[strum(serialize = "APPROVED_SUPERVISOR")]
    #[serde(rename = "APPROVED_SUPERVISOR")]
    ApprovedSupervisor,
    #[strum(serialize = "APPROVED_MANAGEMENT")]
    #[serde(rename = "APPROVED_MANAGEMENT")]
    ApprovedManagement,
    #[strum(serialize = "REJECTED")]
    #[serde(rename = "REJECTED")]
    Rejected,
}

impl ApprovalState {
    pub fn is_approved(self) -> bool {
        matches!(
            self,
            ApprovalState::ApprovedSupervisor | ApprovalState::ApprovedManagement
        )
    }
}

/// Whether a leave covers whole days or a time range on one day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AbsenceKind {
    #[strum(serialize = "FULL_DAYS")]
    #[serde(rename = "FULL_DAYS")]
    FullDays,
    #[strum(serialize = "HOURS")]
    #[serde(rename = "HOURS")]
    Hours,
}

/// Catalog entry describing a category of leave.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeavePolicy {
    pub id: u64,
    #[schema(example = "Cita medica")]
    pub name: String,
    /// Categories flagged here need the management tier after the supervisor.
    pub requires_management_approval: bool,
    #[schema(example = 3)]
    pub min_advance_days: i32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    pub id: u64,
    pub employee_id: u64,
    pub policy_id: u64,
    #[schema(example = "FULL_DAYS")]
    pub absence_kind: String,
    #[schema(example = "2026-02-10", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,
    #[schema(value_type = String, nullable = true)]
    pub start_time: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub end_time: Option<NaiveTime>,
    pub total_days: f64,
    pub total_hours: f64,
    pub paid: bool,
    pub reason: String,
    #[schema(example = "PENDING")]
    pub status: String,
    pub approval_comment: Option<String>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub approved_at: Option<NaiveDateTime>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaveTotals {
    pub total_days: f64,
    pub total_hours: f64,
}

/// Derives total days/hours for a leave request. Invoked explicitly before
/// persisting; a full-day leave with no end date counts as one day.
pub fn leave_totals(
    kind: AbsenceKind,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
) -> LeaveTotals {
    match kind {
        AbsenceKind::FullDays => {
            let end = end_date.unwrap_or(start_date);
            LeaveTotals {
                total_days: (end - start_date).num_days() as f64 + 1.0,
                total_hours: 0.0,
            }
        }
        AbsenceKind::Hours => match (start_time, end_time) {
            (Some(start), Some(end)) => LeaveTotals {
                total_days: 0.0,
                total_hours: (end - start).num_seconds().abs() as f64 / 3600.0,
            },
            _ => LeaveTotals {
                total_days: 0.0,
                total_hours: 0.0,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn full_day_range_is_inclusive() {
        let totals = leave_totals(
            AbsenceKind::FullDays,
            d(2026, 2, 10),
            Some(d(2026, 2, 12)),
            None,
            None,
        );
        assert_eq!(totals.total_days, 3.0);
        assert_eq!(totals.total_hours, 0.0);
    }

    #[test]
    fn missing_end_date_counts_one_day() {
        let totals = leave_totals(AbsenceKind::FullDays, d(2026, 2, 10), None, None, None);
        assert_eq!(totals.total_days, 1.0);
    }

    #[test]
    fn hourly_leave_computes_hours() {
        let totals = leave_totals(
            AbsenceKind::Hours,
            d(2026, 2, 10),
            None,
            Some(t(10, 0)),
            Some(t(12, 30)),
        );
        assert_eq!(totals.total_days, 0.0);
        assert_eq!(totals.total_hours, 2.5);
    }

    #[test]
    fn hourly_leave_without_times_is_zero() {
        let totals = leave_totals(AbsenceKind::Hours, d(2026, 2, 10), None, Some(t(10, 0)), None);
        assert_eq!(totals.total_hours, 0.0);
    }

    #[test]
    fn either_approved_tier_is_approved() {
        assert!(ApprovalState::ApprovedSupervisor.is_approved());
        assert!(ApprovalState::ApprovedManagement.is_approved());
        assert!(!ApprovalState::Pending.is_approved());
        assert!(!ApprovalState::Rejected.is_approved());
    }
}
