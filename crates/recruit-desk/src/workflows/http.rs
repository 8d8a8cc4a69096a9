use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::backend::FetchError;
use crate::workflows::hiring::ResponseError;

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({
        "error": message.into(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) fn fetch_error_status(error: &FetchError) -> StatusCode {
    match error {
        FetchError::Backend(_) => StatusCode::BAD_REQUEST,
        FetchError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        // Backend refusals (not found, already resolved, forbidden) keep their code.
        FetchError::Status { status, .. } if (400..500).contains(status) => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
        }
        FetchError::Transport(_) | FetchError::Status { .. } | FetchError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

pub(crate) fn fetch_error_response(error: &FetchError) -> Response {
    error_response(fetch_error_status(error), error.to_string())
}

pub(crate) fn response_error_status(error: &ResponseError) -> StatusCode {
    match error {
        ResponseError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ResponseError::AlreadyResolved { .. } | ResponseError::InFlight { .. } => {
            StatusCode::CONFLICT
        }
        ResponseError::Backend(err) => fetch_error_status(err),
    }
}
