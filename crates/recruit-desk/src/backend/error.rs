/// Failure while talking to the recruitment backend.
///
/// Every variant carries a human-readable reason so callers can surface it as a
/// notification without inspecting transport details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    /// Non-2xx response. `reason` is the backend's `error` field when the body carried one.
    #[error("{reason}")]
    Status { status: u16, reason: String },
    /// The backend answered `ok: false`.
    #[error("{0}")]
    Backend(String),
    #[error("request timed out after {seconds}s; the server is taking too long to respond")]
    Timeout { seconds: u64 },
    #[error("malformed backend payload: {0}")]
    Decode(String),
}

impl FetchError {
    pub(crate) fn status(status: u16, reason: Option<String>) -> Self {
        let reason = reason
            .filter(|reason| !reason.trim().is_empty())
            .unwrap_or_else(|| format!("request failed: {status}"));
        Self::Status { status, reason }
    }

    pub(crate) fn backend(reason: Option<String>) -> Self {
        Self::Backend(
            reason
                .filter(|reason| !reason.trim().is_empty())
                .unwrap_or_else(|| "backend reported a failure without a reason".to_string()),
        )
    }

    pub(crate) fn missing_payload(field: &str) -> Self {
        Self::Decode(format!("envelope is missing the '{field}' payload"))
    }
}
