//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod attendance;
pub mod complaint;
pub mod fee;
pub mod leave;
pub mod maintenance;
pub mod mess_menu;
pub mod room;
pub mod student;
pub mod user;
