//! Postgres implementations of the `hostel-core` storage ports.
//!
//! - [`room_ledger::PgRoomLedger`] -- [`RoomLedger`](hostel_core::room_assignment::RoomLedger)
//!   over `rooms` and `students.room_id`.
//! - [`attendance_book::PgAttendanceBook`] --
//!   [`AttendanceBook`](hostel_core::attendance::AttendanceBook) over `attendance_records`.

pub mod attendance_book;
pub mod room_ledger;

pub use attendance_book::PgAttendanceBook;
pub use room_ledger::PgRoomLedger;

use hostel_core::error::CoreError;

/// Translate a sqlx error into the core taxonomy for port callers.
///
/// Unique violations on `uq_*` constraints become [`CoreError::Conflict`];
/// everything else is an internal error carrying the driver message.
pub(crate) fn into_core(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::warn!(error = %err, "Storage error behind a core port");
    CoreError::Internal(err.to_string())
}
