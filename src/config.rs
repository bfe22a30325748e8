use chrono::NaiveTime;
use dotenvy::dotenv;
use std::env;

use crate::core::resolver::SystemDefaults;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    // Rate limiting
    pub rate_scan_per_min: u32,
    pub rate_api_per_min: u32,

    // Fallbacks when no system_config row exists
    pub default_entry_time: NaiveTime,
    pub default_tolerance_minutes: i32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            rate_scan_per_min: env::var("RATE_SCAN_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
            rate_api_per_min: env::var("RATE_API_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            default_entry_time: env::var("DEFAULT_ENTRY_TIME")
                .unwrap_or_else(|_| "09:00:00".to_string())
                .parse()
                .unwrap(),
            default_tolerance_minutes: env::var("DEFAULT_TOLERANCE_MIN")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }

    pub fn system_defaults(&self) -> SystemDefaults {
        SystemDefaults {
            entry_time: self.default_entry_time,
            tolerance_minutes: self.default_tolerance_minutes,
        }
    }
}
