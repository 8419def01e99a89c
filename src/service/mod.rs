pub mod attendance;
pub mod employee;
pub mod validation;

pub use attendance::AttendanceService;
pub use employee::EmployeeService;
