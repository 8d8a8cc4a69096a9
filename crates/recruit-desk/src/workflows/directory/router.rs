use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::DirectorySource;
use super::service::DirectoryService;
use crate::workflows::http::fetch_error_response;
use crate::workflows::ids::{EmployeeId, EmployerId};

/// Router builder exposing employee/employer search and the admin overview numbers.
pub fn directory_router<S>(service: Arc<DirectoryService<S>>) -> Router
where
    S: DirectorySource + 'static,
{
    Router::new()
        .route("/api/v1/admin/employees", get(employees_handler::<S>))
        .route(
            "/api/v1/admin/employees/refresh",
            post(refresh_employees_handler::<S>),
        )
        .route("/api/v1/admin/employers", get(employers_handler::<S>))
        .route(
            "/api/v1/admin/employers/refresh",
            post(refresh_employers_handler::<S>),
        )
        .route(
            "/api/v1/admin/employees/:employee_id",
            delete(delete_employee_handler::<S>),
        )
        .route(
            "/api/v1/admin/employers/:employer_id",
            delete(delete_employer_handler::<S>),
        )
        .route("/api/v1/admin/stats", get(stats_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    pub(crate) q: String,
}

pub(crate) async fn employees_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    S: DirectorySource + 'static,
{
    let outcome = service.search_employees(&params.q);
    (StatusCode::OK, axum::Json(outcome)).into_response()
}

pub(crate) async fn employers_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    S: DirectorySource + 'static,
{
    let outcome = service.search_employers(&params.q);
    (StatusCode::OK, axum::Json(outcome)).into_response()
}

pub(crate) async fn refresh_employees_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
) -> Response
where
    S: DirectorySource + 'static,
{
    match service.refresh_employees().await {
        Ok(total) => (StatusCode::OK, axum::Json(json!({ "total": total }))).into_response(),
        Err(err) => fetch_error_response(&err),
    }
}

pub(crate) async fn refresh_employers_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
) -> Response
where
    S: DirectorySource + 'static,
{
    match service.load_employers().await {
        Ok(total) => (StatusCode::OK, axum::Json(json!({ "total": total }))).into_response(),
        Err(err) => fetch_error_response(&err),
    }
}

pub(crate) async fn stats_handler<S>(State(service): State<Arc<DirectoryService<S>>>) -> Response
where
    S: DirectorySource + 'static,
{
    match service.dashboard_stats().await {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(err) => fetch_error_response(&err),
    }
}

pub(crate) async fn delete_employee_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Path(employee_id): Path<i64>,
) -> Response
where
    S: DirectorySource + 'static,
{
    match service.delete_employee(EmployeeId(employee_id)).await {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "deleted": employee_id })),
        )
            .into_response(),
        Err(err) => fetch_error_response(&err),
    }
}

pub(crate) async fn delete_employer_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Path(employer_id): Path<i64>,
) -> Response
where
    S: DirectorySource + 'static,
{
    match service.delete_employer(EmployerId(employer_id)).await {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "deleted": employer_id })),
        )
            .into_response(),
        Err(err) => fetch_error_response(&err),
    }
}
