//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod complaint_repo;
pub mod fee_repo;
pub mod leave_repo;
pub mod maintenance_repo;
pub mod mess_menu_repo;
pub mod room_repo;
pub mod student_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use complaint_repo::ComplaintRepo;
pub use fee_repo::FeeRepo;
pub use leave_repo::LeaveRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use mess_menu_repo::MessMenuRepo;
pub use room_repo::RoomRepo;
pub use student_repo::StudentRepo;
pub use user_repo::UserRepo;
