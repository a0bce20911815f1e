//! Route assembly.
//!
//! Paths mirror what the billing frontend calls:
//!
//! - `GET  /`                   liveness text
//! - `POST /api/auth/login`     placeholder credential check
//! - `*    /api/products`       inventory CRUD (mutations manager-only)
//! - `*    /api/categories`     category CRUD (mutations manager-only)
//! - `POST /api/sales`          the checkout transaction
//! - `GET  /api/sales`          sale history

pub mod auth;
pub mod categories;
pub mod products;
pub mod sales;

use axum::http::HeaderMap;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pos_core::{Capability, Role};

use crate::error::ApiError;
use crate::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api/auth", auth::router())
        .nest("/api/products", products::router())
        .nest("/api/categories", categories::router())
        .nest("/api/sales", sales::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe.
async fn root() -> &'static str {
    "Shopfront POS API is running"
}

/// Resolves the acting user from the `X-Username` header and checks the
/// given capability against their stored role.
///
/// The header is a stopgap identity mechanism (the login endpoint hands
/// out no real session); the capability check itself stays server-side so
/// a client cannot self-grant catalog access.
pub(crate) async fn require_capability(
    state: &AppState,
    headers: &HeaderMap,
    capability: Capability,
) -> Result<Role, ApiError> {
    let username = headers
        .get("x-username")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(ApiError::Unauthorized)?;

    let user = state
        .db
        .users()
        .find_by_username(username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !user.role.permits(capability) {
        return Err(ApiError::Forbidden);
    }

    Ok(user.role)
}
