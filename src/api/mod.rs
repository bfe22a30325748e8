pub mod checkin;
pub mod employee;
pub mod justification;
pub mod leave;
pub mod schedule;
pub mod shift_assignment;
pub mod vacation;
pub mod visitor;
