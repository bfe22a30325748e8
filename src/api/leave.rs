use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::model::leave::{AbsenceKind, LeavePolicy, LeaveRequest, leave_totals};

#[derive(Deserialize, ToSchema)]
pub struct CreateLeavePolicy {
    #[schema(example = "Cita medica")]
    pub name: String,
    #[serde(default)]
    pub requires_management_approval: bool,
    #[schema(example = 3)]
    #[serde(default)]
    pub min_advance_days: i32,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateLeaveRequest {
    pub employee_id: u64,
    pub policy_id: u64,
    #[schema(example = "FULL_DAYS")]
    pub absence_kind: AbsenceKind,
    #[schema(example = "2026-02-10", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,
    #[schema(value_type = String, nullable = true)]
    pub start_time: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub paid: bool,
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ReviewComment {
    pub comment: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    /// Filter by employee ID
    pub employee_id: Option<u64>,
    /// Filter by approval status
    #[param(example = "PENDING")]
    pub status: Option<String>,
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    /// Pagination per page number
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    Str(&'a str),
}

/// Leave policy creation endpoint
#[utoipa::path(
    post,
    path = "/api/leave-policies",
    request_body(content = CreateLeavePolicy, content_type = "application/json"),
    responses(
        (status = 200, description = "Policy created", body = LeavePolicy),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn create_policy(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLeavePolicy>,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO leave_policies (name, requires_management_approval, min_advance_days, active)
        VALUES (?, ?, ?, 1)
        "#,
    )
    .bind(&payload.name)
    .bind(payload.requires_management_approval)
    .bind(payload.min_advance_days)
    .execute(pool.get_ref())
    .await?;

    let created = sqlx::query_as::<_, LeavePolicy>("SELECT * FROM leave_policies WHERE id = ?")
        .bind(result.last_insert_id())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// Leave request creation endpoint. Totals are derived from the payload
/// before the insert; the row starts PENDING.
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(content = CreateLeaveRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Leave request created", body = LeaveRequest),
        (status = 400, description = "Invalid dates, times or advance notice"),
        (status = 404, description = "Policy not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLeaveRequest>,
) -> Result<impl Responder, AppError> {
    if let Some(end) = payload.end_date {
        if payload.start_date > end {
            return Err(AppError::InvalidInput(
                "start_date cannot be after end_date".into(),
            ));
        }
    }

    if payload.absence_kind == AbsenceKind::Hours
        && (payload.start_time.is_none() || payload.end_time.is_none())
    {
        return Err(AppError::InvalidInput(
            "start_time and end_time are required for hourly leave".into(),
        ));
    }

    let policy = sqlx::query_as::<_, LeavePolicy>(
        "SELECT * FROM leave_policies WHERE id = ? AND active = 1",
    )
    .bind(payload.policy_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| AppError::NotFound("Leave policy not found".into()))?;

    let today = Local::now().date_naive();
    let advance = (payload.start_date - today).num_days();
    if advance < policy.min_advance_days as i64 {
        return Err(AppError::InvalidInput(format!(
            "This leave category requires at least {} days of advance notice",
            policy.min_advance_days
        )));
    }

    let totals = leave_totals(
        payload.absence_kind,
        payload.start_date,
        payload.end_date,
        payload.start_time,
        payload.end_time,
    );

    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests
            (employee_id, policy_id, absence_kind, start_date, end_date, start_time,
             end_time, total_days, total_hours, paid, reason, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'PENDING')
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.policy_id)
    .bind(payload.absence_kind.to_string())
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(payload.start_time)
    .bind(payload.end_time)
    .bind(totals.total_days)
    .bind(totals.total_hours)
    .bind(payload.paid)
    .bind(&payload.reason)
    .execute(pool.get_ref())
    .await?;

    let created = sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests WHERE id = ?")
        .bind(result.last_insert_id())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// Supervisor approval endpoint. Only a PENDING request can be approved at
/// this tier; the guarded update makes concurrent reviews lose cleanly.
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve-supervisor",
    params(("leave_id" = u64, Path, description = "Leave request ID")),
    request_body(content = ReviewComment, content_type = "application/json"),
    responses(
        (status = 200, description = "Leave approved at supervisor tier"),
        (status = 409, description = "Request not pending"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn approve_supervisor(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewComment>,
) -> Result<impl Responder, AppError> {
    let leave_id = path.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = 'APPROVED_SUPERVISOR', approval_comment = ?, approved_at = NOW()
        WHERE id = ? AND status = 'PENDING'
        "#,
    )
    .bind(&payload.comment)
    .bind(leave_id)
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Conflict(
            "Leave request not found or not pending".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Leave approved" })))
}

/// Management approval endpoint. Only valid for categories flagged as
/// requiring the second tier, and only after the supervisor tier.
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve-management",
    params(("leave_id" = u64, Path, description = "Leave request ID")),
    request_body(content = ReviewComment, content_type = "application/json"),
    responses(
        (status = 200, description = "Leave approved at management tier"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Request not at supervisor tier, or tier not required"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn approve_management(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewComment>,
) -> Result<impl Responder, AppError> {
    let leave_id = path.into_inner();

    #[derive(sqlx::FromRow)]
    struct PolicyFlagRow {
        requires_management_approval: bool,
    }

    let flag = sqlx::query_as::<_, PolicyFlagRow>(
        r#"
        SELECT p.requires_management_approval
        FROM leave_requests r
        JOIN leave_policies p ON p.id = r.policy_id
        WHERE r.id = ?
        "#,
    )
    .bind(leave_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| AppError::NotFound("Leave request not found".into()))?;

    if !flag.requires_management_approval {
        return Err(AppError::Conflict(
            "This leave category does not use the management tier".into(),
        ));
    }

    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = 'APPROVED_MANAGEMENT', approval_comment = ?, approved_at = NOW()
        WHERE id = ? AND status = 'APPROVED_SUPERVISOR'
        "#,
    )
    .bind(&payload.comment)
    .bind(leave_id)
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Conflict(
            "Leave request is not at the supervisor tier".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Leave approved" })))
}

/// Rejection endpoint. A request can be rejected from either pre-final tier.
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(("leave_id" = u64, Path, description = "Leave request ID")),
    request_body(content = ReviewComment, content_type = "application/json"),
    responses(
        (status = 200, description = "Leave rejected"),
        (status = 409, description = "Request already finalized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewComment>,
) -> Result<impl Responder, AppError> {
    let leave_id = path.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = 'REJECTED', approval_comment = ?, approved_at = NOW()
        WHERE id = ? AND status IN ('PENDING', 'APPROVED_SUPERVISOR')
        "#,
    )
    .bind(&payload.comment)
    .bind(leave_id)
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Conflict(
            "Leave request not found or already finalized".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Leave rejected" })))
}

/// Paginated leave list endpoint
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    pool: web::Data<MySqlPool>,
    query: web::Query<LeaveFilter>,
) -> Result<impl Responder, AppError> {
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(emp_id) = query.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::U64(emp_id));
    }
    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    let count_sql = format!("SELECT COUNT(*) FROM leave_requests{}", where_sql);
    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }
    let total = count_q.fetch_one(pool.get_ref()).await?;

    let data_sql = format!(
        "SELECT * FROM leave_requests{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        where_sql
    );
    let mut data_q = sqlx::query_as::<_, LeaveRequest>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }
    let leaves = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data: leaves,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}
