//! Inventory endpoints. Mutations are manager-only.
//!
//! Money fields travel as integer cents; the frontend renders them.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pos_core::validation::{validate_name, validate_price_cents, validate_stock_qty};
use pos_core::Capability;
use pos_db::{ProductInput, ProductWithCategory};

use crate::error::ApiError;
use crate::routes::require_capability;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
}

/// Label shown for products with no category attached.
const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub barcode: String,
    pub name: String,
    /// Selling price in cents.
    pub price: i64,
    /// Purchase cost in cents.
    pub cost_price: i64,
    pub category: String,
    pub stock: i64,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductWithCategory> for ProductDto {
    fn from(row: ProductWithCategory) -> Self {
        let p = row.product;
        ProductDto {
            id: p.id,
            barcode: p.barcode,
            name: p.name,
            price: p.price_cents,
            cost_price: p.cost_cents,
            category: row.category_name.unwrap_or_else(|| UNCATEGORIZED.to_string()),
            stock: p.stock_qty,
            brand: p.brand,
            size: p.size,
            color: p.color,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub barcode: String,
    pub name: String,
    /// Selling price in cents.
    pub price: i64,
    /// Purchase cost in cents.
    #[serde(default)]
    pub cost_price: i64,
    /// Category name; unknown names create the category on the fly.
    pub category: Option<String>,
    #[serde(default)]
    pub stock: i64,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl ProductBody {
    fn validate(&self) -> Result<(), ApiError> {
        validate_name("name", &self.name)?;
        validate_name("barcode", &self.barcode)?;
        validate_price_cents("price", self.price)?;
        validate_price_cents("costPrice", self.cost_price)?;
        validate_stock_qty(self.stock)?;
        Ok(())
    }

    fn into_input(self) -> ProductInput {
        ProductInput {
            barcode: self.barcode,
            name: self.name,
            category: self.category,
            cost_cents: self.cost_price,
            price_cents: self.price,
            stock_qty: self.stock,
            brand: self.brand,
            size: self.size,
            color: self.color,
        }
    }
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let products = state.db.products().list().await?;

    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ProductBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    require_capability(&state, &headers, Capability::ManageCatalog).await?;
    body.validate()?;

    let product = state.db.products().insert(&body.into_input()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": product.id })),
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<ProductBody>,
) -> Result<StatusCode, ApiError> {
    require_capability(&state, &headers, Capability::ManageCatalog).await?;
    body.validate()?;

    state.db.products().update(&id, &body.into_input()).await?;

    Ok(StatusCode::OK)
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    require_capability(&state, &headers, Capability::ManageCatalog).await?;

    state.db.products().delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
