use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tokio::sync::Notify;

use crate::backend::{FetchError, HireRequestDto, ResponseSubmission};
use crate::workflows::hiring::domain::HireRequestStatus;
use crate::workflows::hiring::repository::HireRequestSource;
use crate::workflows::hiring::{hire_request_router, RequestWorkflowStore};
use crate::workflows::ids::{EmployeeId, EmployerId, RequestId};

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// The moment the in-memory backend stamps on every response.
pub(super) fn response_stamp() -> DateTime<Utc> {
    at(20, 9)
}

pub(super) fn pending(id: i64) -> HireRequestDto {
    HireRequestDto {
        request_id: RequestId(id),
        employer_id: EmployerId(100 + id),
        employee_id: EmployeeId(200 + id),
        status: HireRequestStatus::Pending,
        message: Some(format!("Interested in candidate #{id}")),
        response_message: None,
        request_date: at(1 + id as u32, 10),
        response_date: None,
        employer_company: Some("Indus Textiles".to_string()),
        employer_username: Some("indus".to_string()),
        employer_email: Some("hr@indus.example".to_string()),
        employee_name: Some(format!("Candidate {id}")),
        employee_field: Some("Accounting".to_string()),
        employee_location: Some("Lahore".to_string()),
        employee_experience: Some("3".to_string()),
        employee_email: None,
    }
}

/// Resolved rows always carry both a response date and a response message.
pub(super) fn resolved(id: i64, status: HireRequestStatus, reply: &str) -> HireRequestDto {
    assert_ne!(status, HireRequestStatus::Pending, "fixture must be resolved");
    HireRequestDto {
        status,
        message: Some(reply.to_string()),
        response_message: Some(reply.to_string()),
        response_date: Some(at(15, 12)),
        ..pending(id)
    }
}

/// `[{1, pending}, {2, accepted}, {3, pending}]`
pub(super) fn mixed_rows() -> Vec<HireRequestDto> {
    vec![
        pending(1),
        resolved(2, HireRequestStatus::Accepted, "Approved by admin"),
        pending(3),
    ]
}

/// Behaves like the recruitment backend: responses flip pending rows in place, stamp a
/// response date and overwrite the message column.
#[derive(Default)]
pub(super) struct MemorySource {
    rows: Mutex<Vec<HireRequestDto>>,
    submissions: Mutex<Vec<ResponseSubmission>>,
    fetch_failure: Mutex<Option<FetchError>>,
    submit_failure: Mutex<Option<FetchError>>,
    fail_fetch_after_submit: Mutex<bool>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub(super) fn with_rows(rows: Vec<HireRequestDto>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub(super) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub(super) fn submissions(&self) -> Vec<ResponseSubmission> {
        self.submissions.lock().expect("submissions poisoned").clone()
    }

    pub(super) fn fail_fetch_with(&self, error: FetchError) {
        *self.fetch_failure.lock().expect("failure poisoned") = Some(error);
    }

    pub(super) fn clear_fetch_failure(&self) {
        *self.fetch_failure.lock().expect("failure poisoned") = None;
    }

    pub(super) fn fail_submit_with(&self, error: FetchError) {
        *self.submit_failure.lock().expect("failure poisoned") = Some(error);
    }

    pub(super) fn fail_fetch_after_submit(&self) {
        *self.fail_fetch_after_submit.lock().expect("flag poisoned") = true;
    }

    pub(super) fn replace_rows(&self, rows: Vec<HireRequestDto>) {
        *self.rows.lock().expect("rows poisoned") = rows;
    }

    fn apply(&self, submission: &ResponseSubmission) -> Result<(), FetchError> {
        let mut rows = self.rows.lock().expect("rows poisoned");
        let row = rows
            .iter_mut()
            .find(|row| row.request_id == submission.request_id)
            .ok_or_else(|| FetchError::Status {
                status: 404,
                reason: "Hire request not found".to_string(),
            })?;

        if row.status != HireRequestStatus::Pending {
            return Err(FetchError::Status {
                status: 400,
                reason: format!("Request has already been {}", row.status),
            });
        }

        row.status = submission.status.into();
        row.response_date = Some(response_stamp());
        row.message = Some(submission.response_message.clone());
        Ok(())
    }
}

impl HireRequestSource for MemorySource {
    async fn fetch_all(&self) -> Result<Vec<HireRequestDto>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.fetch_failure.lock().expect("failure poisoned").clone() {
            return Err(error);
        }
        Ok(self.rows.lock().expect("rows poisoned").clone())
    }

    async fn submit_response(&self, submission: ResponseSubmission) -> Result<(), FetchError> {
        self.submissions
            .lock()
            .expect("submissions poisoned")
            .push(submission.clone());
        if let Some(error) = self.submit_failure.lock().expect("failure poisoned").clone() {
            return Err(error);
        }
        self.apply(&submission)?;
        if *self.fail_fetch_after_submit.lock().expect("flag poisoned") {
            self.fail_fetch_with(FetchError::Transport("connection reset".to_string()));
        }
        Ok(())
    }
}

/// Holds every submission until released, so overlapping responses can be observed.
pub(super) struct GatedSource {
    pub(super) inner: MemorySource,
    pub(super) gate: Notify,
}

impl GatedSource {
    pub(super) fn with_rows(rows: Vec<HireRequestDto>) -> Self {
        Self {
            inner: MemorySource::with_rows(rows),
            gate: Notify::new(),
        }
    }
}

impl HireRequestSource for GatedSource {
    async fn fetch_all(&self) -> Result<Vec<HireRequestDto>, FetchError> {
        self.inner.fetch_all().await
    }

    async fn submit_response(&self, submission: ResponseSubmission) -> Result<(), FetchError> {
        self.gate.notified().await;
        self.inner.submit_response(submission).await
    }
}

pub(super) async fn loaded_store(
    rows: Vec<HireRequestDto>,
) -> (RequestWorkflowStore<MemorySource>, Arc<MemorySource>) {
    let source = Arc::new(MemorySource::with_rows(rows));
    let store = RequestWorkflowStore::new(source.clone());
    store.load().await.expect("initial load succeeds");
    (store, source)
}

pub(super) async fn loaded_router(rows: Vec<HireRequestDto>) -> (axum::Router, Arc<MemorySource>) {
    let (store, source) = loaded_store(rows).await;
    (hire_request_router(Arc::new(store)), source)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn ids(requests: &[crate::workflows::hiring::HireRequest]) -> Vec<i64> {
    requests.iter().map(|request| request.request_id.0).collect()
}
