use chrono::NaiveTime;
use sqlx::MySqlPool;
use tracing::warn;

use crate::config::Config;
use crate::core::resolver::SystemDefaults;

#[derive(Debug, sqlx::FromRow)]
struct SystemConfigRow {
    entry_time: NaiveTime,
    tolerance_minutes: i32,
}

/// Loads the system-wide default schedule parameters for one operation.
/// The lowest-id row wins when more than one exists; a missing or unreadable
/// row degrades to the env-configured defaults instead of failing.
pub async fn load_defaults(pool: &MySqlPool, config: &Config) -> SystemDefaults {
    let row = sqlx::query_as::<_, SystemConfigRow>(
        "SELECT entry_time, tolerance_minutes FROM system_config ORDER BY id LIMIT 1",
    )
    .fetch_optional(pool)
    .await;

    match row {
        Ok(Some(row)) => SystemDefaults {
            entry_time: row.entry_time,
            tolerance_minutes: row.tolerance_minutes,
        },
        Ok(None) => config.system_defaults(),
        Err(e) => {
            warn!(error = %e, "failed to load system_config, using env defaults");
            config.system_defaults()
        }
    }
}
