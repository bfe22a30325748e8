use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::AppError;
use crate::model::employee::Employee;
use crate::utils::db_utils::{build_update_sql, execute_update};

/// Columns an update payload may touch. The QR token is deliberately absent;
/// it only changes through the reissue endpoint.
const UPDATABLE: &[&str] = &[
    "employee_code",
    "first_name",
    "last_name",
    "email",
    "department_id",
    "schedule_type_id",
    "overtime_enabled",
];

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "Lopez")]
    pub last_name: String,
    #[schema(example = "ana.lopez@company.com")]
    pub email: String,
    pub department_id: Option<u64>,
    pub schedule_type_id: Option<u64>,
    #[serde(default)]
    pub overtime_enabled: bool,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct EmployeeFilter {
    /// Filter by department
    pub department_id: Option<u64>,
    /// Filter by schedule type
    pub schedule_type_id: Option<u64>,
    /// Filter by active flag
    pub active: Option<bool>,
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    /// Pagination per page number
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue {
    U64(u64),
    Bool(bool),
}

/// Create employee endpoint. Issues a fresh QR token.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body(content = CreateEmployee, content_type = "application/json"),
    responses(
        (status = 200, description = "Employee created", body = Employee),
        (status = 409, description = "Duplicate employee code or email"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateEmployee>,
) -> Result<impl Responder, AppError> {
    let qr_token = Uuid::new_v4().to_string();

    let result = sqlx::query(
        r#"
        INSERT INTO employees
            (employee_code, first_name, last_name, email, department_id,
             schedule_type_id, qr_token, overtime_enabled, active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1)
        "#,
    )
    .bind(&payload.employee_code)
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(payload.department_id)
    .bind(payload.schedule_type_id)
    .bind(&qr_token)
    .bind(payload.overtime_enabled)
    .execute(pool.get_ref())
    .await
    .map_err(duplicate_to_conflict)?;

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(result.last_insert_id())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Paginated employee list endpoint
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeFilter),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employees"
)]
pub async fn employee_list(
    pool: web::Data<MySqlPool>,
    query: web::Query<EmployeeFilter>,
) -> Result<impl Responder, AppError> {
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(department_id) = query.department_id {
        where_sql.push_str(" AND department_id = ?");
        args.push(FilterValue::U64(department_id));
    }
    if let Some(schedule_type_id) = query.schedule_type_id {
        where_sql.push_str(" AND schedule_type_id = ?");
        args.push(FilterValue::U64(schedule_type_id));
    }
    if let Some(active) = query.active {
        where_sql.push_str(" AND active = ?");
        args.push(FilterValue::Bool(active));
    }

    let count_sql = format!("SELECT COUNT(*) FROM employees{}", where_sql);
    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Bool(v) => count_q.bind(*v),
        };
    }
    let total = count_q.fetch_one(pool.get_ref()).await?;

    let data_sql = format!(
        "SELECT * FROM employees{} ORDER BY last_name, first_name LIMIT ? OFFSET ?",
        where_sql
    );
    let mut data_q = sqlx::query_as::<_, Employee>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Bool(v) => data_q.bind(v),
        };
    }
    let employees = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data: employees,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}

/// Get employee endpoint
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, AppError> {
    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".into()))?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Partial update endpoint, restricted to the updatable column set.
#[utoipa::path(
    patch,
    path = "/api/employees/{employee_id}",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Employee updated"),
        (status = 400, description = "Unknown field in payload"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employees"
)]
pub async fn update_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let update = build_update_sql("employees", &payload, UPDATABLE, "id", employee_id as i64)?;
    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(AppError::from)?;

    if affected == 0 {
        return Err(AppError::NotFound("Employee not found".into()).into());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Employee updated" })))
}

/// Deactivation endpoint. Attendance history is kept; the badge stops
/// scanning immediately.
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deactivated"),
        (status = 404, description = "Employee not found or already inactive"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employees"
)]
pub async fn deactivate_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, AppError> {
    let employee_id = path.into_inner();

    let result = sqlx::query("UPDATE employees SET active = 0 WHERE id = ? AND active = 1")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "Employee not found or already inactive".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Employee deactivated" })))
}

/// QR reissue endpoint. The previous token stops working at once.
#[utoipa::path(
    post,
    path = "/api/employees/{employee_id}/qr",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "New QR token issued", body = Object, example = json!({
            "qr_token": "5f1c2a9e-7a0b-4c1d-9e8f-2b3c4d5e6f70"
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employees"
)]
pub async fn reissue_qr(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<impl Responder, AppError> {
    let employee_id = path.into_inner();
    let qr_token = Uuid::new_v4().to_string();

    let result = sqlx::query("UPDATE employees SET qr_token = ? WHERE id = ?")
        .bind(&qr_token)
        .bind(employee_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Employee not found".into()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "qr_token": qr_token })))
}

/// Maps MySQL duplicate-key violations to a caller-visible conflict.
pub fn duplicate_to_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some("23000") {
            return AppError::Conflict("Duplicate value for a unique field".into());
        }
    }
    AppError::Db(e)
}
