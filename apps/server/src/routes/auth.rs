//! Login endpoint.
//!
//! Placeholder credential check carried over from the legacy system:
//! plain-text username + password + role matched exactly, and an opaque
//! random token handed back that nothing validates later. See DESIGN.md
//! before pointing this at anything outside a trusted shop LAN.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use pos_core::Role;

use crate::error::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: LoginUser,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: String,
    pub name: String,
    pub role: Role,
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .db
        .users()
        .verify_login(&body.username, &body.password, body.role)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    info!(username = %user.username, role = %user.role.as_str(), "Login succeeded");

    Ok(Json(LoginResponse {
        user: LoginUser {
            id: user.id,
            name: user.username,
            role: user.role,
        },
        token: Uuid::new_v4().to_string(),
    }))
}
