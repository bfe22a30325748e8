use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;

use crate::api::employee::duplicate_to_conflict;
use crate::error::AppError;
use crate::model::vacation::{VacationBalance, VacationPeriod, VacationRequest, vacation_days};

#[derive(Deserialize, ToSchema)]
pub struct CreatePeriod {
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-12-31", value_type = String, format = "date")]
    pub end_date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateBalance {
    pub employee_id: u64,
    pub period_id: u64,
    #[schema(example = 12.0)]
    pub total_days: f64,
    #[schema(example = "2020-03-15", value_type = String, format = "date")]
    pub seniority_date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateVacationRequest {
    pub employee_id: u64,
    pub balance_id: u64,
    #[schema(example = "2026-07-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-07-05", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ReviewComment {
    pub comment: Option<String>,
}

/// Vacation period creation endpoint
#[utoipa::path(
    post,
    path = "/api/vacation/periods",
    request_body(content = CreatePeriod, content_type = "application/json"),
    responses(
        (status = 200, description = "Period created", body = VacationPeriod),
        (status = 400, description = "start_date after end_date"),
        (status = 409, description = "Period already exists for the year"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Vacations"
)]
pub async fn create_period(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreatePeriod>,
) -> Result<impl Responder, AppError> {
    if payload.start_date > payload.end_date {
        return Err(AppError::InvalidInput(
            "start_date cannot be after end_date".into(),
        ));
    }

    let result = sqlx::query(
        "INSERT INTO vacation_periods (year, start_date, end_date, active) VALUES (?, ?, ?, 1)",
    )
    .bind(payload.year)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .execute(pool.get_ref())
    .await
    .map_err(duplicate_to_conflict)?;

    let created = sqlx::query_as::<_, VacationPeriod>("SELECT * FROM vacation_periods WHERE id = ?")
        .bind(result.last_insert_id())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// Balance seeding endpoint. One row per (employee, period).
#[utoipa::path(
    post,
    path = "/api/vacation/balances",
    request_body(content = CreateBalance, content_type = "application/json"),
    responses(
        (status = 200, description = "Balance created", body = VacationBalance),
        (status = 404, description = "Period not found"),
        (status = 409, description = "Balance already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Vacations"
)]
pub async fn create_balance(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateBalance>,
) -> Result<impl Responder, AppError> {
    let period_exists: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM vacation_periods WHERE id = ? AND active = 1")
            .bind(payload.period_id)
            .fetch_one(pool.get_ref())
            .await?;
    if period_exists == 0 {
        return Err(AppError::NotFound("Vacation period not found".into()));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO vacation_balances
            (employee_id, period_id, total_days, days_taken, seniority_date)
        VALUES (?, ?, ?, 0, ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.period_id)
    .bind(payload.total_days)
    .bind(payload.seniority_date)
    .execute(pool.get_ref())
    .await
    .map_err(duplicate_to_conflict)?;

    let created =
        sqlx::query_as::<_, VacationBalance>("SELECT * FROM vacation_balances WHERE id = ?")
            .bind(result.last_insert_id())
            .fetch_one(pool.get_ref())
            .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// Vacation request creation endpoint. Requested days come from the
/// inclusive range; the balance is only checked and debited at approval.
#[utoipa::path(
    post,
    path = "/api/vacation/requests",
    request_body(content = CreateVacationRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Vacation request created", body = VacationRequest),
        (status = 400, description = "start_date after end_date"),
        (status = 404, description = "Balance not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Vacations"
)]
pub async fn create_request(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateVacationRequest>,
) -> Result<impl Responder, AppError> {
    if payload.start_date > payload.end_date {
        return Err(AppError::InvalidInput(
            "start_date cannot be after end_date".into(),
        ));
    }

    let balance_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM vacation_balances WHERE id = ? AND employee_id = ?",
    )
    .bind(payload.balance_id)
    .bind(payload.employee_id)
    .fetch_one(pool.get_ref())
    .await?;
    if balance_exists == 0 {
        return Err(AppError::NotFound(
            "Vacation balance not found for this employee".into(),
        ));
    }

    let requested = vacation_days(payload.start_date, payload.end_date);

    let result = sqlx::query(
        r#"
        INSERT INTO vacation_requests
            (employee_id, balance_id, start_date, end_date, requested_days, status, reason)
        VALUES (?, ?, ?, ?, ?, 'PENDING', ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.balance_id)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(requested)
    .bind(&payload.reason)
    .execute(pool.get_ref())
    .await?;

    let created =
        sqlx::query_as::<_, VacationRequest>("SELECT * FROM vacation_requests WHERE id = ?")
            .bind(result.last_insert_id())
            .fetch_one(pool.get_ref())
            .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// Supervisor approval endpoint. Locks the balance row, verifies the
/// remaining days, then debits and approves in one transaction.
#[utoipa::path(
    put,
    path = "/api/vacation/requests/{request_id}/approve-supervisor",
    params(("request_id" = u64, Path, description = "Vacation request ID")),
    request_body(content = ReviewComment, content_type = "application/json"),
    responses(
        (status = 200, description = "Vacation approved and balance debited"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request not pending"),
        (status = 422, description = "Insufficient balance"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Vacations"
)]
pub async fn approve_supervisor(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewComment>,
) -> Result<impl Responder, AppError> {
    let request_id = path.into_inner();

    let mut tx = pool.begin().await?;

    let request = sqlx::query_as::<_, VacationRequest>(
        "SELECT * FROM vacation_requests WHERE id = ? FOR UPDATE",
    )
    .bind(request_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Vacation request not found".into()))?;

    if request.status != "PENDING" {
        return Err(AppError::Conflict("Vacation request is not pending".into()));
    }

    let balance = sqlx::query_as::<_, VacationBalance>(
        "SELECT * FROM vacation_balances WHERE id = ? FOR UPDATE",
    )
    .bind(request.balance_id)
    .fetch_one(&mut *tx)
    .await?;

    if balance.pending_days() < request.requested_days {
        return Err(AppError::InsufficientBalance(format!(
            "Requested {} days but only {} remain",
            request.requested_days,
            balance.pending_days()
        )));
    }

    sqlx::query("UPDATE vacation_balances SET days_taken = days_taken + ? WHERE id = ?")
        .bind(request.requested_days)
        .bind(balance.id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        UPDATE vacation_requests
        SET status = 'APPROVED_SUPERVISOR', approval_comment = ?, approved_at = NOW()
        WHERE id = ?
        "#,
    )
    .bind(&payload.comment)
    .bind(request_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        request_id,
        days = request.requested_days,
        "vacation approved, balance debited"
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Vacation approved" })))
}

/// Management approval endpoint. Second tier; the balance was already
/// debited at the supervisor tier.
#[utoipa::path(
    put,
    path = "/api/vacation/requests/{request_id}/approve-management",
    params(("request_id" = u64, Path, description = "Vacation request ID")),
    request_body(content = ReviewComment, content_type = "application/json"),
    responses(
        (status = 200, description = "Vacation approved at management tier"),
        (status = 409, description = "Request not at supervisor tier"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Vacations"
)]
pub async fn approve_management(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewComment>,
) -> Result<impl Responder, AppError> {
    let request_id = path.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE vacation_requests
        SET status = 'APPROVED_MANAGEMENT', approval_comment = ?, approved_at = NOW()
        WHERE id = ? AND status = 'APPROVED_SUPERVISOR'
        "#,
    )
    .bind(&payload.comment)
    .bind(request_id)
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Conflict(
            "Vacation request is not at the supervisor tier".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Vacation approved" })))
}

/// Rejection endpoint. A rejection after the supervisor tier restores the
/// days debited at approval.
#[utoipa::path(
    put,
    path = "/api/vacation/requests/{request_id}/reject",
    params(("request_id" = u64, Path, description = "Vacation request ID")),
    request_body(content = ReviewComment, content_type = "application/json"),
    responses(
        (status = 200, description = "Vacation rejected"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already finalized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Vacations"
)]
pub async fn reject_request(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewComment>,
) -> Result<impl Responder, AppError> {
    let request_id = path.into_inner();

    let mut tx = pool.begin().await?;

    let request = sqlx::query_as::<_, VacationRequest>(
        "SELECT * FROM vacation_requests WHERE id = ? FOR UPDATE",
    )
    .bind(request_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Vacation request not found".into()))?;

    let was_debited = match request.status.as_str() {
        "PENDING" => false,
        "APPROVED_SUPERVISOR" => true,
        _ => {
            return Err(AppError::Conflict(
                "Vacation request is already finalized".into(),
            ));
        }
    };

    if was_debited {
        sqlx::query("UPDATE vacation_balances SET days_taken = days_taken - ? WHERE id = ?")
            .bind(request.requested_days)
            .bind(request.balance_id)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query(
        r#"
        UPDATE vacation_requests
        SET status = 'REJECTED', approval_comment = ?, approved_at = NOW()
        WHERE id = ?
        "#,
    )
    .bind(&payload.comment)
    .bind(request_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Vacation rejected" })))
}

/// Balance read endpoint
#[utoipa::path(
    get,
    path = "/api/vacation/balances/{employee_id}",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Balances for the employee", body = [VacationBalance]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Vacations"
)]
pub async fn employee_balances(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, AppError> {
    let employee_id = path.into_inner();

    let balances = sqlx::query_as::<_, VacationBalance>(
        "SELECT * FROM vacation_balances WHERE employee_id = ? ORDER BY period_id DESC",
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(balances))
}
