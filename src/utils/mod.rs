pub mod db_utils;
pub mod schedule_lookup;
pub mod system_config;
