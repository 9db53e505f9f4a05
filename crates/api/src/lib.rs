//! Hostel management API server library.
//!
//! Exposes config, state, error handling, routes and the router builder so
//! that integration tests and the binaries share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
