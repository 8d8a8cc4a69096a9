use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{
    HireRequest, HireRequestStatus, RequestCounts, ResponseAction, ResponseMessage, StatusFilter,
    ValidationError,
};
use super::repository::HireRequestSource;
use crate::backend::{FetchError, ResponseSubmission};
use crate::workflows::ids::RequestId;

/// Session-local view of the hire requests plus the response workflow.
///
/// The collection is an immutable snapshot that every successful `load` swaps out whole.
/// Responses are never patched in locally: after the backend accepts a decision the store
/// reloads, so backend-computed fields such as the response date are always the backend's.
pub struct RequestWorkflowStore<S> {
    source: Arc<S>,
    requests: RwLock<Arc<Vec<HireRequest>>>,
    in_flight: Mutex<HashSet<RequestId>>,
}

/// Result of a persisted response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseReceipt {
    pub request_id: RequestId,
    pub status: HireRequestStatus,
    /// `false` when the follow-up reload failed and the held snapshot predates the response.
    pub resynced: bool,
}

impl<S> RequestWorkflowStore<S>
where
    S: HireRequestSource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            requests: RwLock::new(Arc::new(Vec::new())),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Replace the held collection with the backend's. On failure the previous snapshot stays.
    pub async fn load(&self) -> Result<Arc<Vec<HireRequest>>, FetchError> {
        let rows = self.source.fetch_all().await.map_err(|err| {
            warn!(error = %err, "failed to load hire requests");
            err
        })?;

        let requests = rows
            .into_iter()
            .map(HireRequest::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| {
                warn!(error = %err, "backend returned an inconsistent hire request");
                FetchError::Decode(err.to_string())
            })?;

        let snapshot = Arc::new(requests);
        *self
            .requests
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);

        info!(total = snapshot.len(), "hire requests loaded");
        Ok(snapshot)
    }

    /// Current snapshot, in backend order.
    pub fn snapshot(&self) -> Arc<Vec<HireRequest>> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, request_id: RequestId) -> Option<HireRequest> {
        self.snapshot()
            .iter()
            .find(|request| request.request_id == request_id)
            .cloned()
    }

    pub fn filter_by_status(&self, filter: StatusFilter) -> Vec<HireRequest> {
        self.snapshot()
            .iter()
            .filter(|request| filter.matches(request.status()))
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> RequestCounts {
        RequestCounts::tally(&self.snapshot())
    }

    /// True while any response is waiting on the backend.
    pub fn is_busy(&self) -> bool {
        !self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Accept or reject a pending request, then reload from the backend.
    pub async fn respond(
        &self,
        request_id: RequestId,
        action: ResponseAction,
        response_message: &str,
    ) -> Result<ResponseReceipt, ResponseError> {
        let message = ResponseMessage::parse(response_message)?;

        if let Some(existing) = self.get(request_id) {
            if !existing.is_pending() {
                return Err(ResponseError::AlreadyResolved {
                    request_id,
                    status: existing.status(),
                });
            }
        }

        let _claim =
            InFlightClaim::acquire(&self.in_flight, request_id).ok_or(ResponseError::InFlight {
                request_id,
            })?;

        let outcome = action.target();
        let status = HireRequestStatus::from(outcome);
        debug!(%request_id, %status, "submitting hire request response");

        self.source
            .submit_response(ResponseSubmission {
                request_id,
                status: outcome,
                response_message: message.into_inner(),
            })
            .await
            .map_err(|err| {
                warn!(%request_id, error = %err, "backend refused hire request response");
                ResponseError::Backend(err)
            })?;

        info!(%request_id, %status, "hire request response recorded");

        let resynced = match self.load().await {
            Ok(_) => true,
            Err(err) => {
                warn!(%request_id, error = %err, "response recorded but reload failed");
                false
            }
        };

        Ok(ResponseReceipt {
            request_id,
            status,
            resynced,
        })
    }
}

/// Marks a request as having a response in flight until dropped.
struct InFlightClaim<'a> {
    registry: &'a Mutex<HashSet<RequestId>>,
    request_id: RequestId,
}

impl<'a> InFlightClaim<'a> {
    fn acquire(registry: &'a Mutex<HashSet<RequestId>>, request_id: RequestId) -> Option<Self> {
        let inserted = registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(request_id);
        // Built only on a successful insert; a refused claim must not run `Drop`.
        inserted.then(|| Self {
            registry,
            request_id,
        })
    }
}

impl Drop for InFlightClaim<'_> {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.request_id);
    }
}

/// Error raised by [`RequestWorkflowStore::respond`]. The held collection is untouched in
/// every case.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("hire request {request_id} has already been {status}")]
    AlreadyResolved {
        request_id: RequestId,
        status: HireRequestStatus,
    },
    #[error("a response to hire request {request_id} is already being submitted")]
    InFlight { request_id: RequestId },
    #[error(transparent)]
    Backend(#[from] FetchError),
}
