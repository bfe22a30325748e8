use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::checkin::VISITOR_PREFIX;
use crate::error::AppError;
use crate::model::visitor::{VisitRecord, Visitor};

#[derive(Deserialize, ToSchema)]
pub struct RegisterVisitor {
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
}

/// Visitor registration endpoint. Issues a one-visit QR token carrying the
/// visitor prefix so the scan endpoint can tell it apart from a badge.
#[utoipa::path(
    post,
    path = "/api/visitors",
    request_body(content = RegisterVisitor, content_type = "application/json"),
    responses(
        (status = 200, description = "Visitor registered", body = Visitor),
        (status = 500, description = "Internal server error")
    ),
    tag = "Visitors"
)]
pub async fn register_visitor(
    pool: web::Data<MySqlPool>,
    payload: web::Json<RegisterVisitor>,
) -> Result<impl Responder, AppError> {
    let qr_token = format!("{}{}", VISITOR_PREFIX, Uuid::new_v4());

    let result = sqlx::query(
        r#"
        INSERT INTO visitors
            (name, email, company, phone, department_id, reason, visit_date,
             visit_time, qr_token, qr_active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1)
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.company)
    .bind(&payload.phone)
    .bind(payload.department_id)
    .bind(&payload.reason)
    .bind(payload.visit_date)
    .bind(payload.visit_time)
    .bind(&qr_token)
    .execute(pool.get_ref())
    .await?;

    let created = sqlx::query_as::<_, Visitor>("SELECT * FROM visitors WHERE id = ?")
        .bind(result.last_insert_id())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// Visit history endpoint
#[utoipa::path(
    get,
    path = "/api/visitors/{visitor_id}/visits",
    params(("visitor_id" = u64, Path, description = "Visitor ID")),
    responses(
        (status = 200, description = "Visit records", body = [VisitRecord]),
        (status = 404, description = "Visitor not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Visitors"
)]
pub async fn visitor_visits(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, AppError> {
    let visitor_id = path.into_inner();

    let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitors WHERE id = ?")
        .bind(visitor_id)
        .fetch_one(pool.get_ref())
        .await?;
    if exists == 0 {
        return Err(AppError::NotFound("Visitor not found".into()));
    }

    let visits = sqlx::query_as::<_, VisitRecord>(
        "SELECT * FROM visit_records WHERE visitor_id = ? ORDER BY entered_at DESC",
    )
    .bind(visitor_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(visits))
}
