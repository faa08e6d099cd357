use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use deliveries_core::DeliveryError;

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<DeliveryError>() {
            match e {
                DeliveryError::NotInitialized => StatusCode::BAD_REQUEST,
                DeliveryError::InvalidRow(_) => StatusCode::NOT_FOUND,
                DeliveryError::AlreadyInitialized(_) => StatusCode::CONFLICT,
                DeliveryError::InvalidColumn(_)
                | DeliveryError::UnknownColumn(_)
                | DeliveryError::DateParse(_)
                | DeliveryError::UnknownFrequency(_)
                | DeliveryError::UnknownStatus(_)
                | DeliveryError::UnknownPriority(_) => StatusCode::BAD_REQUEST,
                DeliveryError::HeaderMismatch { .. }
                | DeliveryError::Io(_)
                | DeliveryError::Yaml(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
