pub mod attendance;
pub mod employee;
pub mod error;
pub mod health;
