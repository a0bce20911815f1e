//! API error types and their HTTP mapping.
//!
//! Rule violations travel to the client with a specific status and a
//! human-readable message; infrastructure faults are logged in full and
//! surface as an opaque 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use pos_core::{CoreError, ValidationError};
use pos_db::{CheckoutError, DbError};

/// Error returned by route handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 - malformed or rule-breaking input
    #[error("{0}")]
    Validation(String),

    /// 401 - bad credentials or missing/unknown acting user
    #[error("Invalid credentials")]
    Unauthorized,

    /// 403 - acting user lacks the required capability
    #[error("Manager role required")]
    Forbidden,

    /// 404 - entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// 409 - the request conflicts with current state (oversell, unknown
    /// product at checkout, duplicate name)
    #[error("{0}")]
    Conflict(String),

    /// 500 - infrastructure fault; detail is logged, not sent
    #[error("Internal error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Request failed");
                "Transaction failed".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => ApiError::Validation(v.to_string()),
            rule @ (CoreError::ProductNotFound(_) | CoreError::InsufficientStock { .. }) => {
                ApiError::Conflict(rule.to_string())
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::UniqueViolation { .. } => ApiError::Conflict(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Rule(core) => core.into(),
            CheckoutError::Db(db) => db.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_rule_errors_map_to_conflict() {
        let err: ApiError = CheckoutError::Rule(CoreError::ProductNotFound("p1".into())).into();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: ApiError = CheckoutError::Rule(CoreError::InsufficientStock {
            product_id: "p1".into(),
            available: 1,
            requested: 5,
        })
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err: ApiError = ValidationError::Required {
            field: "name".into(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_faults_are_opaque() {
        let err: ApiError = DbError::QueryFailed("secret detail".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
