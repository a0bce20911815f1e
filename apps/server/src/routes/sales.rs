//! Checkout and sale history endpoints.
//!
//! `POST /api/sales` is the heart of the system: it validates the cart
//! and hands it to the single atomic checkout transaction in pos-db.
//! `GET /api/sales` returns every sale with customer, cashier and line
//! items already resolved (two queries total, regardless of sale count).

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use pos_core::{CheckoutLine, CheckoutRequest, PaymentMethod};
use pos_db::SaleHistoryEntry;

use crate::error::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(history).post(checkout))
}

// =============================================================================
// Checkout
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSaleBody {
    #[serde(default)]
    pub customer_name: String,
    pub customer_mobile: Option<String>,
    pub cashier_name: Option<String>,
    /// Required; an empty list is a valid zero-line sale, a missing field
    /// is a 400.
    pub items: Vec<SaleItemBody>,
    /// All amounts in cents.
    pub subtotal: i64,
    #[serde(default)]
    pub discount: i64,
    pub total: i64,
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Deserialize)]
pub struct SaleItemBody {
    pub id: String,
    pub name: String,
    /// Unit price in cents, as quoted at the till.
    pub price: i64,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSaleResponse {
    pub message: String,
    pub sale_id: String,
    pub invoice_no: String,
}

impl From<NewSaleBody> for CheckoutRequest {
    fn from(body: NewSaleBody) -> Self {
        CheckoutRequest {
            customer_name: body.customer_name,
            customer_mobile: body.customer_mobile,
            cashier_name: body.cashier_name,
            lines: body
                .items
                .into_iter()
                .map(|item| CheckoutLine {
                    product_id: item.id,
                    name: item.name,
                    unit_price_cents: item.price,
                    quantity: item.quantity,
                })
                .collect(),
            subtotal_cents: body.subtotal,
            discount_cents: body.discount,
            total_cents: body.total,
            payment_method: body.payment_method.unwrap_or(PaymentMethod::Cash),
        }
    }
}

async fn checkout(
    State(state): State<AppState>,
    Json(body): Json<NewSaleBody>,
) -> Result<(StatusCode, Json<NewSaleResponse>), ApiError> {
    let request = CheckoutRequest::from(body);
    request.validate()?;

    let receipt = state.db.sales().checkout(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(NewSaleResponse {
            message: "Sale recorded".to_string(),
            sale_id: receipt.sale_id,
            invoice_no: receipt.invoice_no,
        }),
    ))
}

// =============================================================================
// History
// =============================================================================

/// Label for sales with no customer record attached.
const WALK_IN: &str = "Walk-in";
/// Label for sales whose cashier could not be resolved.
const UNKNOWN_CASHIER: &str = "Unknown";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    pub id: String,
    pub invoice_no: String,
    /// RFC 3339 timestamp.
    pub date: String,
    pub customer_name: String,
    pub customer_mobile: String,
    pub cashier_name: String,
    pub subtotal: i64,
    pub discount: i64,
    pub total: i64,
    pub payment_method: PaymentMethod,
    pub items: Vec<InvoiceItemDto>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceItemDto {
    /// Product id as recorded at sale time; may no longer exist in the
    /// catalog.
    pub id: String,
    pub name: String,
    /// Unit price in cents at sale time.
    pub price: i64,
    pub quantity: i64,
}

impl From<SaleHistoryEntry> for InvoiceDto {
    fn from(entry: SaleHistoryEntry) -> Self {
        InvoiceDto {
            id: entry.sale.id,
            invoice_no: entry.sale.invoice_no,
            date: entry.sale.created_at.to_rfc3339(),
            customer_name: entry.customer_name.unwrap_or_else(|| WALK_IN.to_string()),
            customer_mobile: entry.customer_phone.unwrap_or_default(),
            cashier_name: entry
                .cashier_name
                .unwrap_or_else(|| UNKNOWN_CASHIER.to_string()),
            subtotal: entry.sale.subtotal_cents,
            discount: entry.sale.discount_cents,
            total: entry.sale.total_cents,
            payment_method: entry.sale.payment_method,
            items: entry
                .items
                .into_iter()
                .map(|item| InvoiceItemDto {
                    id: item.product_id,
                    name: item.name_snapshot,
                    price: item.unit_price_cents,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

async fn history(State(state): State<AppState>) -> Result<Json<Vec<InvoiceDto>>, ApiError> {
    let entries = state.db.sales().history().await?;

    Ok(Json(entries.into_iter().map(InvoiceDto::from).collect()))
}
