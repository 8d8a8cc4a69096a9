use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{HireRequestView, RequestCounts, ResponseAction, StatusFilter};
use super::repository::HireRequestSource;
use super::store::RequestWorkflowStore;
use crate::workflows::http::{error_response, fetch_error_response, response_error_status};
use crate::workflows::ids::RequestId;

/// Router builder exposing the hire-request dashboard and response endpoints.
pub fn hire_request_router<S>(store: Arc<RequestWorkflowStore<S>>) -> Router
where
    S: HireRequestSource + 'static,
{
    Router::new()
        .route("/api/v1/admin/hire-requests", get(list_handler::<S>))
        .route("/api/v1/admin/hire-requests/counts", get(counts_handler::<S>))
        .route(
            "/api/v1/admin/hire-requests/refresh",
            post(refresh_handler::<S>),
        )
        .route(
            "/api/v1/admin/hire-requests/:request_id/respond",
            post(respond_handler::<S>),
        )
        .with_state(store)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListParams {
    #[serde(default)]
    pub(crate) status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RespondBody {
    pub(crate) action: ResponseAction,
    #[serde(default)]
    pub(crate) response_message: String,
}

pub(crate) async fn list_handler<S>(
    State(store): State<Arc<RequestWorkflowStore<S>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    S: HireRequestSource + 'static,
{
    let filter = match params.status.as_deref().map(str::parse::<StatusFilter>) {
        None => StatusFilter::default(),
        Some(Ok(filter)) => filter,
        Some(Err(err)) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };

    let requests: Vec<HireRequestView> = store
        .filter_by_status(filter)
        .iter()
        .map(|request| request.view())
        .collect();

    let payload = json!({
        "status": filter.label(),
        "counts": store.counts(),
        "busy": store.is_busy(),
        "requests": requests,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn counts_handler<S>(
    State(store): State<Arc<RequestWorkflowStore<S>>>,
) -> Response
where
    S: HireRequestSource + 'static,
{
    (StatusCode::OK, axum::Json(store.counts())).into_response()
}

pub(crate) async fn refresh_handler<S>(
    State(store): State<Arc<RequestWorkflowStore<S>>>,
) -> Response
where
    S: HireRequestSource + 'static,
{
    match store.load().await {
        Ok(snapshot) => {
            let payload = json!({
                "total": snapshot.len(),
                "counts": RequestCounts::tally(&snapshot),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => fetch_error_response(&err),
    }
}

pub(crate) async fn respond_handler<S>(
    State(store): State<Arc<RequestWorkflowStore<S>>>,
    Path(request_id): Path<i64>,
    axum::Json(body): axum::Json<RespondBody>,
) -> Response
where
    S: HireRequestSource + 'static,
{
    let request_id = RequestId(request_id);
    match store
        .respond(request_id, body.action, &body.response_message)
        .await
    {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(err) => error_response(response_error_status(&err), err.to_string()),
    }
}
