use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::core::resolver::{self, DaySchedule, SystemDefaults, weekday_index};
use crate::error::AppError;
use crate::model::employee::Employee;
use crate::model::schedule::{RotatingShift, ScheduleKind, ScheduleType, WeekdayOverride};

/// Loads the catalog snapshot for (employee, date) and resolves it. The pure
/// dispatch lives in core::resolver; this only runs the lookups the
/// employee's regime actually needs.
pub async fn day_schedule(
    pool: &MySqlPool,
    employee: &Employee,
    date: NaiveDate,
    defaults: &SystemDefaults,
) -> Result<DaySchedule, AppError> {
    let Some(schedule_type_id) = employee.schedule_type_id else {
        return Ok(resolver::resolve(date, None, None, None, defaults));
    };

    let schedule =
        sqlx::query_as::<_, ScheduleType>("SELECT * FROM schedule_types WHERE id = ? AND active = 1")
            .bind(schedule_type_id)
            .fetch_optional(pool)
            .await?;

    // A dangling or disabled reference degrades to the system defaults.
    let Some(schedule) = schedule else {
        return Ok(resolver::resolve(date, None, None, None, defaults));
    };

    let weekday_override = if schedule.kind() == ScheduleKind::PerWeekday
        || schedule.per_weekday_override
    {
        sqlx::query_as::<_, WeekdayOverride>(
            "SELECT * FROM weekday_overrides WHERE schedule_type_id = ? AND weekday = ? LIMIT 1",
        )
        .bind(schedule.id)
        .bind(weekday_index(date))
        .fetch_optional(pool)
        .await?
    } else {
        None
    };

    let rotation = if schedule.kind() == ScheduleKind::Rotating {
        // Overlapping active assignments are possible; the lowest id wins.
        sqlx::query_as::<_, RotatingShift>(
            r#"
            SELECT rs.*
            FROM rotating_shift_assignments a
            JOIN rotating_shifts rs ON rs.id = a.rotating_shift_id
            WHERE a.employee_id = ?
              AND a.active = 1
              AND a.start_date <= ?
              AND a.end_date >= ?
            ORDER BY a.id
            LIMIT 1
            "#,
        )
        .bind(employee.id)
        .bind(date)
        .bind(date)
        .fetch_optional(pool)
        .await?
    } else {
        None
    };

    Ok(resolver::resolve(
        date,
        Some(&schedule),
        weekday_override.as_ref(),
        rotation.as_ref(),
        defaults,
    ))
}
