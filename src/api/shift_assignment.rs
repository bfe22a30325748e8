use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::model::assignment::{DailyAssignmentKind, DailyShiftAssignment, daily_assignment_fields};
use crate::model::schedule::RotatingShift;

/// What kind of day a grid cell describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    Rest,
    ShiftRef,
    Custom,
}

#[derive(Deserialize, ToSchema)]
pub struct UpsertAssignment {
    pub employee_id: u64,
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "shift_ref")]
    pub kind: AssignmentKind,
    /// Required for kind = shift_ref.
    pub shift_id: Option<u64>,
    /// Required for kind = custom.
    #[schema(value_type = String, nullable = true)]
    pub entry_time: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub exit_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AssignmentQuery {
    pub employee_id: u64,
    #[param(example = "2026-01-01", value_type = String)]
    #[schema(value_type = String, format = "date")]
    pub from: NaiveDate,
    #[param(example = "2026-01-31", value_type = String)]
    #[schema(value_type = String, format = "date")]
    pub to: NaiveDate,
}

/// Daily assignment upsert endpoint. One row per (employee, date); writing
/// the same cell twice replaces it. Grid data never feeds lateness.
#[utoipa::path(
    put,
    path = "/api/daily-assignments",
    request_body(content = UpsertAssignment, content_type = "application/json"),
    responses(
        (status = 200, description = "Assignment stored", body = DailyShiftAssignment),
        (status = 400, description = "Missing fields for the requested kind"),
        (status = 404, description = "Referenced shift not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Daily grid"
)]
pub async fn upsert_assignment(
    pool: web::Data<MySqlPool>,
    payload: web::Json<UpsertAssignment>,
) -> Result<impl Responder, AppError> {
    let kind = match payload.kind {
        AssignmentKind::Rest => DailyAssignmentKind::Rest,
        AssignmentKind::ShiftRef => {
            let shift_id = payload.shift_id.ok_or_else(|| {
                AppError::InvalidInput("shift_id is required for kind shift_ref".into())
            })?;
            // Times are copied from the shift at write time; later shift
            // edits leave stored cells untouched.
            let shift =
                sqlx::query_as::<_, RotatingShift>("SELECT * FROM rotating_shifts WHERE id = ?")
                    .bind(shift_id)
                    .fetch_optional(pool.get_ref())
                    .await?
                    .ok_or_else(|| AppError::NotFound("Rotating shift not found".into()))?;
            DailyAssignmentKind::ShiftRef {
                shift_id,
                entry: shift.entry_time,
                exit: shift.exit_time,
            }
        }
        AssignmentKind::Custom => {
            let (entry, exit) = match (payload.entry_time, payload.exit_time) {
                (Some(entry), Some(exit)) => (entry, exit),
                _ => {
                    return Err(AppError::InvalidInput(
                        "entry_time and exit_time are required for kind custom".into(),
                    ));
                }
            };
            DailyAssignmentKind::Custom { entry, exit }
        }
    };

    let fields = daily_assignment_fields(kind);

    sqlx::query(
        r#"
        INSERT INTO daily_shift_assignments
            (employee_id, date, rotating_shift_id, is_rest_day, entry_time, exit_time,
             crosses_midnight, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            rotating_shift_id = VALUES(rotating_shift_id),
            is_rest_day = VALUES(is_rest_day),
            entry_time = VALUES(entry_time),
            exit_time = VALUES(exit_time),
            crosses_midnight = VALUES(crosses_midnight),
            notes = VALUES(notes)
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.date)
    .bind(fields.rotating_shift_id)
    .bind(fields.is_rest_day)
    .bind(fields.entry_time)
    .bind(fields.exit_time)
    .bind(fields.crosses_midnight)
    .bind(&payload.notes)
    .execute(pool.get_ref())
    .await?;

    let stored = sqlx::query_as::<_, DailyShiftAssignment>(
        "SELECT * FROM daily_shift_assignments WHERE employee_id = ? AND date = ?",
    )
    .bind(payload.employee_id)
    .bind(payload.date)
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(stored))
}

/// Grid range read endpoint
#[utoipa::path(
    get,
    path = "/api/daily-assignments",
    params(AssignmentQuery),
    responses(
        (status = 200, description = "Assignments in range", body = [DailyShiftAssignment]),
        (status = 400, description = "from after to"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Daily grid"
)]
pub async fn assignment_range(
    pool: web::Data<MySqlPool>,
    query: web::Query<AssignmentQuery>,
) -> Result<impl Responder, AppError> {
    if query.from > query.to {
        return Err(AppError::InvalidInput("from cannot be after to".into()));
    }

    let rows = sqlx::query_as::<_, DailyShiftAssignment>(
        r#"
        SELECT * FROM daily_shift_assignments
        WHERE employee_id = ? AND date BETWEEN ? AND ?
        ORDER BY date
        "#,
    )
    .bind(query.employee_id)
    .bind(query.from)
    .bind(query.to)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Grid cell delete endpoint
#[utoipa::path(
    delete,
    path = "/api/daily-assignments/{assignment_id}",
    params(("assignment_id" = u64, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment deleted"),
        (status = 404, description = "Assignment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Daily grid"
)]
pub async fn delete_assignment(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, AppError> {
    let assignment_id = path.into_inner();

    let result = sqlx::query("DELETE FROM daily_shift_assignments WHERE id = ?")
        .bind(assignment_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Assignment not found".into()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Assignment deleted" })))
}
