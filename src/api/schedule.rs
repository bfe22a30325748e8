use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::Value;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::api::employee::duplicate_to_conflict;
use crate::config::Config;
use crate::error::AppError;
use crate::model::employee::Employee;
use crate::model::schedule::{RotatingShift, ScheduleKind, ScheduleType, WeekdayOverride};
use crate::utils::db_utils::{build_update_sql, execute_update};
use crate::utils::{schedule_lookup, system_config};

const UPDATABLE: &[&str] = &[
    "name",
    "description",
    "entry_time",
    "exit_time",
    "full_shift_hours",
    "tolerance_minutes",
    "has_meal_window",
    "meal_start",
    "meal_end",
    "per_weekday_override",
];

#[derive(Deserialize, ToSchema)]
pub struct CreateScheduleType {
    #[schema(example = "Oficina matutino")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "FIXED")]
    pub system_kind: ScheduleKind,
    #[schema(example = "09:00:00", value_type = String, nullable = true)]
    pub entry_time: Option<NaiveTime>,
    #[schema(example = "18:00:00", value_type = String, nullable = true)]
    pub exit_time: Option<NaiveTime>,
    #[schema(example = 8.0)]
    pub full_shift_hours: f64,
    #[schema(example = 15)]
    pub tolerance_minutes: i32,
    #[serde(default)]
    pub has_meal_window: bool,
    #[schema(value_type = String, nullable = true)]
    pub meal_start: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub meal_end: Option<NaiveTime>,
    #[serde(default)]
    pub per_weekday_override: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct UpsertWeekdayOverride {
    /// 0 = Monday .. 6 = Sunday.
    #[schema(example = 0)]
    pub weekday: u8,
    pub is_workday: bool,
    #[schema(value_type = String, nullable = true)]
    pub entry_time: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub exit_time: Option<NaiveTime>,
    #[serde(default)]
    pub half_day: bool,
    #[schema(value_type = String, nullable = true)]
    pub meal_start: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub meal_end: Option<NaiveTime>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateRotatingShift {
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

#[derive(Deserialize, ToSchema)]
pub struct CreateRotationAssignment {
    pub employee_id: u64,
    pub rotating_shift_id: u64,
    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-31", value_type = String, format = "date")]
    pub end_date: NaiveDate,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ResolveQuery {
    pub employee_id: u64,
    #[param(example = "2026-01-05", value_type = String)]
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
}

/// Create schedule type endpoint
#[utoipa::path(
    post,
    path = "/api/schedule-types",
    request_body(content = CreateScheduleType, content_type = "application/json"),
    responses(
        (status = 200, description = "Schedule type created", body = ScheduleType),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedules"
)]
pub async fn create_schedule_type(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateScheduleType>,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO schedule_types
            (name, description, system_kind, entry_time, exit_time, full_shift_hours,
             tolerance_minutes, has_meal_window, meal_start, meal_end,
             per_weekday_override, active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1)
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.system_kind.to_string())
    .bind(payload.entry_time)
    .bind(payload.exit_time)
    .bind(payload.full_shift_hours)
    .bind(payload.tolerance_minutes)
    .bind(payload.has_meal_window)
    .bind(payload.meal_start)
    .bind(payload.meal_end)
    .bind(payload.per_weekday_override)
    .execute(pool.get_ref())
    .await?;

    let created = sqlx::query_as::<_, ScheduleType>("SELECT * FROM schedule_types WHERE id = ?")
        .bind(result.last_insert_id())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// List active schedule types endpoint
#[utoipa::path(
    get,
    path = "/api/schedule-types",
    responses(
        (status = 200, description = "Active schedule types", body = [ScheduleType]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedules"
)]
pub async fn schedule_type_list(pool: web::Data<MySqlPool>) -> Result<impl Responder, AppError> {
    let types = sqlx::query_as::<_, ScheduleType>(
        "SELECT * FROM schedule_types WHERE active = 1 ORDER BY name",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(types))
}

/// Partial update endpoint. The system_kind of an existing type is immutable;
/// migrating employees means creating a new type and reassigning them.
#[utoipa::path(
    patch,
    path = "/api/schedule-types/{type_id}",
    params(("type_id" = u64, Path, description = "Schedule type ID")),
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Schedule type updated"),
        (status = 400, description = "Unknown field in payload"),
        (status = 404, description = "Schedule type not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedules"
)]
pub async fn update_schedule_type(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    let type_id = path.into_inner();

    let update = build_update_sql("schedule_types", &payload, UPDATABLE, "id", type_id as i64)?;
    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(AppError::from)?;

    if affected == 0 {
        return Err(AppError::NotFound("Schedule type not found".into()).into());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Schedule type updated" })))
}

/// Deactivation endpoint. Employees referencing the type fall back to the
/// system defaults on their next scan.
#[utoipa::path(
    delete,
    path = "/api/schedule-types/{type_id}",
    params(("type_id" = u64, Path, description = "Schedule type ID")),
    responses(
        (status = 200, description = "Schedule type deactivated"),
        (status = 404, description = "Schedule type not found or already inactive"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedules"
)]
pub async fn deactivate_schedule_type(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, AppError> {
    let type_id = path.into_inner();

    let result = sqlx::query("UPDATE schedule_types SET active = 0 WHERE id = ? AND active = 1")
        .bind(type_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "Schedule type not found or already inactive".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Schedule type deactivated" })))
}

/// Weekday override upsert endpoint. One row per (type, weekday); a second
/// write for the same weekday replaces the first.
#[utoipa::path(
    put,
    path = "/api/schedule-types/{type_id}/weekdays",
    params(("type_id" = u64, Path, description = "Schedule type ID")),
    request_body(content = UpsertWeekdayOverride, content_type = "application/json"),
    responses(
        (status = 200, description = "Weekday override stored", body = WeekdayOverride),
        (status = 400, description = "Invalid weekday"),
        (status = 404, description = "Schedule type not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedules"
)]
pub async fn upsert_weekday_override(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpsertWeekdayOverride>,
) -> Result<impl Responder, AppError> {
    let type_id = path.into_inner();

    if payload.weekday > 6 {
        return Err(AppError::InvalidInput(
            "weekday must be 0 (Monday) through 6 (Sunday)".into(),
        ));
    }

    ensure_schedule_type(pool.get_ref(), type_id).await?;

    sqlx::query(
        r#"
        INSERT INTO weekday_overrides
            (schedule_type_id, weekday, is_workday, entry_time, exit_time,
             half_day, meal_start, meal_end)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            is_workday = VALUES(is_workday),
            entry_time = VALUES(entry_time),
            exit_time = VALUES(exit_time),
            half_day = VALUES(half_day),
            meal_start = VALUES(meal_start),
            meal_end = VALUES(meal_end)
        "#,
    )
    .bind(type_id)
    .bind(payload.weekday)
    .bind(payload.is_workday)
    .bind(payload.entry_time)
    .bind(payload.exit_time)
    .bind(payload.half_day)
    .bind(payload.meal_start)
    .bind(payload.meal_end)
    .execute(pool.get_ref())
    .await?;

    let stored = sqlx::query_as::<_, WeekdayOverride>(
        "SELECT * FROM weekday_overrides WHERE schedule_type_id = ? AND weekday = ?",
    )
    .bind(type_id)
    .bind(payload.weekday)
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(stored))
}

/// Rotating shift creation endpoint. Cycle positions are unique per type.
#[utoipa::path(
    post,
    path = "/api/schedule-types/{type_id}/shifts",
    params(("type_id" = u64, Path, description = "Schedule type ID")),
    request_body(content = CreateRotatingShift, content_type = "application/json"),
    responses(
        (status = 200, description = "Rotating shift created", body = RotatingShift),
        (status = 404, description = "Schedule type not found"),
        (status = 409, description = "Cycle position already taken"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedules"
)]
pub async fn create_rotating_shift(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<CreateRotatingShift>,
) -> Result<impl Responder, AppError> {
    let type_id = path.into_inner();

    ensure_schedule_type(pool.get_ref(), type_id).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO rotating_shifts
            (schedule_type_id, name, entry_time, exit_time, cycle_position, consecutive_days)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(type_id)
    .bind(&payload.name)
    .bind(payload.entry_time)
    .bind(payload.exit_time)
    .bind(payload.cycle_position)
    .bind(payload.consecutive_days)
    .execute(pool.get_ref())
    .await
    .map_err(duplicate_to_conflict)?;

    let created = sqlx::query_as::<_, RotatingShift>("SELECT * FROM rotating_shifts WHERE id = ?")
        .bind(result.last_insert_id())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// Rotation assignment endpoint. Assigns a rotating shift to an employee for
/// a date range. Overlaps are allowed; resolution picks the oldest.
#[utoipa::path(
    post,
    path = "/api/rotation-assignments",
    request_body(content = CreateRotationAssignment, content_type = "application/json"),
    responses(
        (status = 200, description = "Assignment created"),
        (status = 400, description = "start_date after end_date"),
        (status = 404, description = "Employee or shift not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedules"
)]
pub async fn create_rotation_assignment(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateRotationAssignment>,
) -> Result<impl Responder, AppError> {
    if payload.start_date > payload.end_date {
        return Err(AppError::InvalidInput(
            "start_date cannot be after end_date".into(),
        ));
    }

    let shift_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rotating_shifts WHERE id = ?")
        .bind(payload.rotating_shift_id)
        .fetch_one(pool.get_ref())
        .await?;
    if shift_exists == 0 {
        return Err(AppError::NotFound("Rotating shift not found".into()));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO rotating_shift_assignments
            (employee_id, rotating_shift_id, start_date, end_date, active)
        VALUES (?, ?, ?, ?, 1)
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.rotating_shift_id)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": result.last_insert_id(),
        "message": "Assignment created",
    })))
}

/// Schedule preview endpoint. Resolves what an employee's schedule would be
/// on a date, without recording anything.
#[utoipa::path(
    get,
    path = "/api/schedule/resolve",
    params(ResolveQuery),
    responses(
        (status = 200, description = "Resolved day schedule"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedules"
)]
pub async fn resolve_schedule(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<ResolveQuery>,
) -> Result<impl Responder, AppError> {
    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(query.employee_id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".into()))?;

    let defaults = system_config::load_defaults(pool.get_ref(), config.get_ref()).await;
    let day =
        schedule_lookup::day_schedule(pool.get_ref(), &employee, query.date, &defaults).await?;

    Ok(HttpResponse::Ok().json(day))
}

async fn ensure_schedule_type(pool: &MySqlPool, type_id: u64) -> Result<(), AppError> {
    let exists: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM schedule_types WHERE id = ? AND active = 1")
            .bind(type_id)
            .fetch_one(pool)
            .await?;
    if exists == 0 {
        return Err(AppError::NotFound("Schedule type not found".into()));
    }
    Ok(())
}
