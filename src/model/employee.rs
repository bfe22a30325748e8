use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_code": "EMP-001",
        "first_name": "Ana",
        "last_name": "Lopez",
        "email": "ana.lopez@company.com",
        "department_id": 10,
        "schedule_type_id": 3,
        "qr_token": "5f1c2a9e-7a0b-4c1d-9e8f-2b3c4d5e6f70",
        "overtime_enabled": false,
        "active": true
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "EMP-001")]
    pub employee_code: String,

    #[schema(example = "Ana")]
    pub first_name: String,

    #[schema(example = "Lopez")]
    pub last_name: String,

    #[schema(example = "ana.lopez@company.com")]
    pub email: String,

    #[schema(example = 10, nullable = true)]
    pub department_id: Option<u64>,

    /// Nullable; employees without a schedule type fall back to the
    /// system-wide default configuration.
    #[schema(example = 3, nullable = true)]
    pub schedule_type_id: Option<u64>,

    /// Opaque token encoded into the employee's QR badge.
    pub qr_token: String,

    pub overtime_enabled: bool,

    pub active: bool,
}
