use crate::api::checkin::{Advisories, ScanRequest, ScanResponse};
use crate::api::employee::{CreateEmployee, EmployeeFilter, EmployeeListResponse};
use crate::api::justification::CreateJustification;
use crate::api::leave::{CreateLeavePolicy, CreateLeaveRequest, LeaveFilter, LeaveListResponse};
use crate::api::schedule::{
    CreateRotatingShift, CreateRotationAssignment, CreateScheduleType, ResolveQuery,
    UpsertWeekdayOverride,
};
use crate::api::shift_assignment::{AssignmentKind, AssignmentQuery, UpsertAssignment};
use crate::api::vacation::{CreateBalance, CreatePeriod, CreateVacationRequest};
use crate::api::visitor::RegisterVisitor;
use crate::model::assignment::DailyShiftAssignment;
use crate::model::attendance::{AttendanceEvent, MovementKind};
use crate::model::employee::Employee;
use crate::model::justification::Justification;
use crate::model::leave::{AbsenceKind, ApprovalState, LeavePolicy, LeaveRequest};
use crate::model::schedule::{RotatingShift, ScheduleKind, ScheduleType, WeekdayOverride};
use crate::model::vacation::{VacationBalance, VacationPeriod, VacationRequest};
use crate::model::visitor::{VisitRecord, Visitor};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Checador API",
        version = "1.0.0",
        description = r#"
## QR attendance system

This API powers a QR-based employee attendance terminal ("checador") with
schedule resolution, lateness computation and absence management.

### Key Features
- **Scan processing**
  - One public endpoint for employee badges and visitor passes
  - Movement sequencing (entry, meal break, exit) per employee per day
  - Lateness computed against the resolved schedule at scan time
- **Schedule catalog**
  - Fixed, per-weekday, rotating and 24-hour shift regimes
  - Manual daily scheduling grid for informational planning
- **Absence management**
  - Leave requests with two-tier approval
  - Vacation balances debited at approval
  - Justifications for lateness and missed days

### Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::checkin::scan,

        crate::api::employee::create_employee,
        crate::api::employee::employee_list,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::deactivate_employee,
        crate::api::employee::reissue_qr,

        crate::api::schedule::create_schedule_type,
        crate::api::schedule::schedule_type_list,
        crate::api::schedule::update_schedule_type,
        crate::api::schedule::deactivate_schedule_type,
        crate::api::schedule::upsert_weekday_override,
        crate::api::schedule::create_rotating_shift,
        crate::api::schedule::create_rotation_assignment,
        crate::api::schedule::resolve_schedule,

        crate::api::shift_assignment::upsert_assignment,
        crate::api::shift_assignment::assignment_range,
        crate::api::shift_assignment::delete_assignment,

        crate::api::leave::create_policy,
        crate::api::leave::create_leave,
        crate::api::leave::approve_supervisor,
        crate::api::leave::approve_management,
        crate::api::leave::reject_leave,
        crate::api::leave::leave_list,

        crate::api::vacation::create_period,
        crate::api::vacation::create_balance,
        crate::api::vacation::create_request,
        crate::api::vacation::approve_supervisor,
        crate::api::vacation::approve_management,
        crate::api::vacation::reject_request,
        crate::api::vacation::employee_balances,

        crate::api::justification::create_justification,
        crate::api::justification::approve_justification,
        crate::api::justification::reject_justification,
        crate::api::justification::justification_list,

        crate::api::visitor::register_visitor,
        crate::api::visitor::visitor_visits
    ),
    components(
        schemas(
            ScanRequest,
            ScanResponse,
            Advisories,
            MovementKind,
            AttendanceEvent,
            Employee,
            CreateEmployee,
            EmployeeFilter,
            EmployeeListResponse,
            ScheduleKind,
            ScheduleType,
            CreateScheduleType,
            WeekdayOverride,
            UpsertWeekdayOverride,
            RotatingShift,
            CreateRotatingShift,
            CreateRotationAssignment,
            ResolveQuery,
            DailyShiftAssignment,
            AssignmentKind,
            AssignmentQuery,
            UpsertAssignment,
            ApprovalState,
            AbsenceKind,
            LeavePolicy,
            CreateLeavePolicy,
            LeaveRequest,
            CreateLeaveRequest,
            LeaveFilter,
            LeaveListResponse,
            VacationPeriod,
            CreatePeriod,
            VacationBalance,
            CreateBalance,
            VacationRequest,
            CreateVacationRequest,
            Justification,
            CreateJustification,
            Visitor,
            VisitRecord,
            RegisterVisitor
        )
    ),
    tags(
        (name = "Checkin", description = "QR scan processing"),
        (name = "Employees", description = "Employee and badge management"),
        (name = "Schedules", description = "Schedule catalog and resolution"),
        (name = "Daily grid", description = "Manual daily scheduling grid"),
        (name = "Leave", description = "Leave policies and requests"),
        (name = "Vacations", description = "Vacation periods, balances and requests"),
        (name = "Justifications", description = "Lateness and absence justifications"),
        (name = "Visitors", description = "Visitor registration and passes")
    )
)]
pub struct ApiDoc;
