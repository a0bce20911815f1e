//! Category CRUD endpoints. Mutations are manager-only.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use pos_core::validation::validate_name;
use pos_core::Capability;

use crate::error::ApiError;
use crate::routes::require_capability;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(rename).delete(remove))
}

#[derive(Debug, Serialize)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub name: String,
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    let categories = state.db.categories().list().await?;

    Ok(Json(
        categories
            .into_iter()
            .map(|c| CategoryDto {
                id: c.id,
                name: c.name,
            })
            .collect(),
    ))
}

async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CategoryBody>,
) -> Result<(StatusCode, Json<CategoryDto>), ApiError> {
    require_capability(&state, &headers, Capability::ManageCatalog).await?;
    validate_name("name", &body.name)?;

    let category = state.db.categories().create(&body.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(CategoryDto {
            id: category.id,
            name: category.name,
        }),
    ))
}

async fn rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<CategoryBody>,
) -> Result<StatusCode, ApiError> {
    require_capability(&state, &headers, Capability::ManageCatalog).await?;
    validate_name("name", &body.name)?;

    state.db.categories().rename(&id, &body.name).await?;

    Ok(StatusCode::OK)
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    require_capability(&state, &headers, Capability::ManageCatalog).await?;

    state.db.categories().delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
