use serde::Deserialize;

use super::dto::HireRequestDto;
use super::error::FetchError;
use crate::workflows::directory::{DashboardStats, EmployeeRecord, EmployerRecord};

/// `{ "ok": bool, "error": string?, <payload> }` wrapper shared by every backend endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<P> {
    #[serde(default)]
    pub(crate) ok: bool,
    #[serde(default)]
    pub(crate) error: Option<String>,
    #[serde(flatten)]
    pub(crate) payload: P,
}

impl<P> Envelope<P> {
    /// Payload of a successful envelope; `ok: false` turns into [`FetchError::Backend`].
    pub(crate) fn into_payload(self) -> Result<P, FetchError> {
        if self.ok {
            Ok(self.payload)
        } else {
            Err(FetchError::backend(self.error))
        }
    }
}

/// Body of a non-2xx response. Only the reason is trusted.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequestsPayload {
    #[serde(default)]
    pub(crate) requests: Option<Vec<HireRequestDto>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RowsPayload<R> {
    #[serde(default)]
    pub(crate) rows: Option<Vec<R>>,
}

pub(crate) type EmployeeRows = RowsPayload<EmployeeRecord>;
pub(crate) type EmployerRows = RowsPayload<EmployerRecord>;

#[derive(Debug, Deserialize)]
pub(crate) struct StatsPayload {
    #[serde(default)]
    pub(crate) stats: Option<DashboardStats>,
}

/// The respond endpoint echoes the request id and status; neither is trusted over a reload.
#[derive(Debug, Deserialize)]
pub(crate) struct Acknowledgement {}
