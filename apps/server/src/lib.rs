//! # Shopfront POS REST API
//!
//! HTTP layer over the pos-db repositories.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         REST API Server                             │
//! │                                                                     │
//! │  Billing UI ───► HTTP (5000) ───► Routes ───► pos-db ───► SQLite   │
//! │                                      │                              │
//! │                                      ▼                              │
//! │                                  pos-core                           │
//! │                            (validation, money)                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router is exposed from the library so tests can drive it with
//! `tower::ServiceExt::oneshot` against an in-memory database.

pub mod config;
pub mod error;
pub mod routes;

use pos_db::Database;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;

/// Shared application state. Cheap to clone; the database handle is a
/// pool wrapper.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}
