use std::sync::Arc;

use hostel_core::room_assignment::RoomAssignmentCoordinator;
use hostel_db::adapters::{PgAttendanceBook, PgRoomLedger};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and the config sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hostel_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: hostel_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Room assignment coordinator over this state's pool.
    pub fn rooms(&self) -> RoomAssignmentCoordinator<PgRoomLedger> {
        RoomAssignmentCoordinator::new(PgRoomLedger::new(self.pool.clone()))
    }

    /// Attendance book over this state's pool.
    pub fn attendance_book(&self) -> PgAttendanceBook {
        PgAttendanceBook::new(self.pool.clone())
    }
}
