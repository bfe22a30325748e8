pub mod assignment;
pub mod attendance;
pub mod employee;
pub mod justification;
pub mod leave;
pub mod schedule;
pub mod vacation;
pub mod visitor;
