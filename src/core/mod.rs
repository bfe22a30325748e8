pub mod lateness;
pub mod resolver;
pub mod state_machine;
