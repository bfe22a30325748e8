use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::justification::Justification;

#[derive(Deserialize, ToSchema)]
pub struct CreateJustification {
    pub employee_id: u64,
    #[schema(example = "Cita medica")]
    pub kind: String,
    /// Null when the employee missed the whole day.
    pub attendance_event_id: Option<u64>,
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub incident_date: NaiveDate,
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ReviewComment {
    pub comment: Option<String>,
}

/// Justification creation endpoint. When an attendance event is referenced
/// it must belong to the same employee.
#[utoipa::path(
    post,
    path = "/api/justifications",
    request_body(content = CreateJustification, content_type = "application/json"),
    responses(
        (status = 200, description = "Justification created", body = Justification),
        (status = 404, description = "Referenced attendance event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Justifications"
)]
pub async fn create_justification(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateJustification>,
) -> Result<impl Responder, AppError> {
    if let Some(event_id) = payload.attendance_event_id {
        let exists: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM attendance_events WHERE id = ? AND employee_id = ?",
        )
        .bind(event_id)
        .bind(payload.employee_id)
        .fetch_one(pool.get_ref())
        .await?;
        if exists == 0 {
            return Err(AppError::NotFound(
                "Attendance event not found for this employee".into(),
            ));
        }
    }

    let result = sqlx::query(
        r#"
        INSERT INTO justifications
            (employee_id, kind, attendance_event_id, incident_date, reason, status)
        VALUES (?, ?, ?, ?, ?, 'PENDING')
        "#,
    )
    .bind(payload.employee_id)
    .bind(&payload.kind)
    .bind(payload.attendance_event_id)
    .bind(payload.incident_date)
    .bind(&payload.reason)
    .execute(pool.get_ref())
    .await?;

    let created = sqlx::query_as::<_, Justification>("SELECT * FROM justifications WHERE id = ?")
        .bind(result.last_insert_id())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// Approval endpoint
#[utoipa::path(
    put,
    path = "/api/justifications/{justification_id}/approve",
    params(("justification_id" = u64, Path, description = "Justification ID")),
    request_body(content = ReviewComment, content_type = "application/json"),
    responses(
        (status = 200, description = "Justification approved"),
        (status = 409, description = "Justification not pending"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Justifications"
)]
pub async fn approve_justification(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewComment>,
) -> Result<impl Responder, AppError> {
    review(pool.get_ref(), path.into_inner(), "APPROVED", &payload.comment).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Justification approved" })))
}

/// Rejection endpoint
#[utoipa::path(
    put,
    path = "/api/justifications/{justification_id}/reject",
    params(("justification_id" = u64, Path, description = "Justification ID")),
    request_body(content = ReviewComment, content_type = "application/json"),
    responses(
        (status = 200, description = "Justification rejected"),
        (status = 409, description = "Justification not pending"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Justifications"
)]
pub async fn reject_justification(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewComment>,
) -> Result<impl Responder, AppError> {
    review(pool.get_ref(), path.into_inner(), "REJECTED", &payload.comment).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Justification rejected" })))
}

/// Justification list endpoint, pending first.
#[utoipa::path(
    get,
    path = "/api/justifications",
    responses(
        (status = 200, description = "All justifications", body = [Justification]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Justifications"
)]
pub async fn justification_list(pool: web::Data<MySqlPool>) -> Result<impl Responder, AppError> {
    let rows = sqlx::query_as::<_, Justification>(
        "SELECT * FROM justifications ORDER BY status = 'PENDING' DESC, incident_date DESC",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

async fn review(
    pool: &MySqlPool,
    justification_id: u64,
    status: &str,
    comment: &Option<String>,
) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE justifications
        SET status = ?, review_comment = ?, reviewed_at = NOW()
        WHERE id = ? AND status = 'PENDING'
        "#,
    )
    .bind(status)
    .bind(comment)
    .bind(justification_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Conflict(
            "Justification not found or already reviewed".into(),
        ));
    }
    Ok(())
}
