use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;

use crate::config::Config;
use crate::core::lateness::{self, Lateness};
use crate::core::state_machine;
use crate::error::AppError;
use crate::model::attendance::MovementKind;
use crate::model::employee::Employee;
use crate::model::schedule::ScheduleKind;
use crate::utils::{schedule_lookup, system_config};

/// Visitor badges carry this prefix in the scanned identifier.
pub const VISITOR_PREFIX: &str = "VISITANTE:";

#[derive(Deserialize, ToSchema)]
pub struct ScanRequest {
    /// Raw content of the scanned QR code.
    #[schema(example = "5f1c2a9e-7a0b-4c1d-9e8f-2b3c4d5e6f70")]
    pub identifier: String,
}

/// Informational overlays attached to a scan. None of them block the scan.
#[derive(Serialize, ToSchema, Default)]
pub struct Advisories {
    pub vacation_active: bool,
    pub full_day_leave: bool,
    pub hourly_leave_window: bool,
}

#[derive(Serialize, ToSchema)]
pub struct ScanResponse {
    #[schema(example = "ENTRY")]
    pub movement_kind: String,
    pub late: bool,
    pub late_minutes: i32,
    /// Ordinal of this scan within the employee's day, 1-based.
    #[schema(example = 1)]
    pub sequence_number_today: i64,
    pub advisories: Advisories,
}

#[derive(sqlx::FromRow)]
struct LastMovementRow {
    movement_kind: String,
}

#[derive(sqlx::FromRow)]
struct PriorEntryRow {
    date: NaiveDate,
    time: NaiveTime,
}

/// QR scan endpoint
#[utoipa::path(
    post,
    path = "/checkin",
    request_body(
        content = ScanRequest,
        description = "Scanned QR identifier",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Scan recorded", body = ScanResponse),
        (status = 404, description = "Unknown or inactive identifier"),
        (status = 422, description = "Meal departure outside the allowed window"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Checkin"
)]
pub async fn scan(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<ScanRequest>,
) -> Result<impl Responder, AppError> {
    if payload.identifier.starts_with(VISITOR_PREFIX) {
        return visitor_scan(pool.get_ref(), &payload.identifier).await;
    }

    let employee = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employees WHERE qr_token = ? AND active = 1",
    )
    .bind(&payload.identifier)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| AppError::NotFound("Unknown or inactive badge".into()))?;

    let now = Local::now().naive_local();
    let today = now.date();
    let time = now.time();

    let defaults = system_config::load_defaults(pool.get_ref(), config.get_ref()).await;
    let schedule = schedule_lookup::day_schedule(pool.get_ref(), &employee, today, &defaults).await?;
    let advisories = load_advisories(pool.get_ref(), employee.id, today, time).await?;

    // One scan at a time per employee per day. The FOR UPDATE read blocks a
    // concurrent scan until this transaction commits or rolls back.
    let mut tx = pool.begin().await?;

    let last = sqlx::query_as::<_, LastMovementRow>(
        r#"
        SELECT movement_kind
        FROM attendance_events
        WHERE employee_id = ? AND date = ?
        ORDER BY time DESC, id DESC
        LIMIT 1
        FOR UPDATE
        "#,
    )
    .bind(employee.id)
    .bind(today)
    .fetch_optional(&mut *tx)
    .await?
    .map(|row| row.movement_kind.parse().unwrap_or(MovementKind::Entry));

    let movement = state_machine::next_movement(last, schedule.has_meal_window);

    if movement == MovementKind::MealOut && !state_machine::meal_window_open(&schedule, time) {
        return Err(AppError::OutOfWindow(
            "Meal departure is only allowed inside the configured window".into(),
        ));
    }

    let lateness = if movement == MovementKind::Entry {
        if schedule.kind == ScheduleKind::Shift24h {
            let prior = sqlx::query_as::<_, PriorEntryRow>(
                r#"
                SELECT date, time
                FROM attendance_events
                WHERE employee_id = ? AND movement_kind = 'ENTRY' AND date < ?
                ORDER BY date DESC, time DESC
                LIMIT 1
                "#,
            )
            .bind(employee.id)
            .bind(today)
            .fetch_optional(&mut *tx)
            .await?
            .map(|row| row.date.and_time(row.time));
            lateness::shift24_entry_lateness(prior, now)
        } else {
            lateness::entry_lateness(&schedule, time, &defaults)
        }
    } else {
        Lateness::ON_TIME
    };

    sqlx::query(
        r#"
        INSERT INTO attendance_events (employee_id, date, time, movement_kind, late, late_minutes)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee.id)
    .bind(today)
    .bind(time)
    .bind(movement.to_string())
    .bind(lateness.late)
    .bind(lateness.minutes)
    .execute(&mut *tx)
    .await?;

    let sequence: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM attendance_events WHERE employee_id = ? AND date = ?",
    )
    .bind(employee.id)
    .bind(today)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        employee_id = employee.id,
        movement = %movement,
        late = lateness.late,
        late_minutes = lateness.minutes,
        "scan recorded"
    );

    Ok(HttpResponse::Ok().json(ScanResponse {
        movement_kind: movement.to_string(),
        late: lateness.late,
        late_minutes: lateness.minutes,
        sequence_number_today: sequence,
        advisories,
    }))
}

async fn load_advisories(
    pool: &MySqlPool,
    employee_id: u64,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<Advisories, AppError> {
    let vacation_active: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM vacation_requests
        WHERE employee_id = ?
          AND status IN ('APPROVED_SUPERVISOR', 'APPROVED_MANAGEMENT')
          AND start_date <= ? AND end_date >= ?
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(date)
    .fetch_one(pool)
    .await?;

    let full_day_leave: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM leave_requests
        WHERE employee_id = ?
          AND status IN ('APPROVED_SUPERVISOR', 'APPROVED_MANAGEMENT')
          AND absence_kind = 'FULL_DAYS'
          AND start_date <= ? AND COALESCE(end_date, start_date) >= ?
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(date)
    .fetch_one(pool)
    .await?;

    let hourly_leave_window: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM leave_requests
        WHERE employee_id = ?
          AND status IN ('APPROVED_SUPERVISOR', 'APPROVED_MANAGEMENT')
          AND absence_kind = 'HOURS'
          AND start_date = ?
          AND start_time <= ? AND end_time >= ?
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(time)
    .bind(time)
    .fetch_one(pool)
    .await?;

    Ok(Advisories {
        vacation_active: vacation_active > 0,
        full_day_leave: full_day_leave > 0,
        hourly_leave_window: hourly_leave_window > 0,
    })
}

/// Visitor scans toggle between entry and exit; the badge deactivates after
/// the exit so it cannot be reused on another day.
async fn visitor_scan(pool: &MySqlPool, identifier: &str) -> Result<HttpResponse, AppError> {
    #[derive(sqlx::FromRow)]
    struct VisitorRow {
        id: u64,
    }

    #[derive(sqlx::FromRow)]
    struct OpenVisitRow {
        id: u64,
    }

    let visitor = sqlx::query_as::<_, VisitorRow>(
        "SELECT id FROM visitors WHERE qr_token = ? AND qr_active = 1",
    )
    .bind(identifier)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Unknown or inactive visitor badge".into()))?;

    let now = Local::now().naive_local();

    let open_visit = sqlx::query_as::<_, OpenVisitRow>(
        "SELECT id FROM visit_records WHERE visitor_id = ? AND left_at IS NULL ORDER BY id DESC LIMIT 1",
    )
    .bind(visitor.id)
    .fetch_optional(pool)
    .await?;

    match open_visit {
        Some(visit) => {
            let mut tx = pool.begin().await?;
            sqlx::query("UPDATE visit_records SET left_at = ? WHERE id = ?")
                .bind(now)
                .bind(visit.id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("UPDATE visitors SET qr_active = 0 WHERE id = ?")
                .bind(visitor.id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            info!(visitor_id = visitor.id, "visitor exit recorded");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "movement_kind": "EXIT",
                "visitor_id": visitor.id,
            })))
        }
        None => {
            sqlx::query("INSERT INTO visit_records (visitor_id, entered_at) VALUES (?, ?)")
                .bind(visitor.id)
                .bind(now)
                .execute(pool)
                .await?;

            info!(visitor_id = visitor.id, "visitor entry recorded");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "movement_kind": "ENTRY",
                "visitor_id": visitor.id,
            })))
        }
    }
}
