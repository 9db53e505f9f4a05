//! Hostel domain logic: identifiers, errors, status vocabularies, and the
//! two cross-record invariants (room occupancy and per-day attendance).
//!
//! Nothing here talks to a database or to HTTP; storage is reached through
//! the [`room_assignment::RoomLedger`] and [`attendance::AttendanceBook`]
//! ports.

mod macros;

pub mod attendance;
pub mod error;
pub mod lifecycle;
pub mod mess_menu;
pub mod roles;
pub mod room_assignment;
pub mod student;
pub mod tickets;
pub mod types;
