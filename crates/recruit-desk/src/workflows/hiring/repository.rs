use std::future::Future;

use crate::backend::{FetchError, HireRequestDto, ResponseSubmission};

/// Source of truth for hire requests, so the store can be exercised without a live backend.
pub trait HireRequestSource: Send + Sync {
    /// Every hire request with its backend-joined display columns, newest first.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<HireRequestDto>, FetchError>> + Send;

    /// Persist an accept/reject decision. The backend stamps the response date.
    fn submit_response(
        &self,
        submission: ResponseSubmission,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;
}
