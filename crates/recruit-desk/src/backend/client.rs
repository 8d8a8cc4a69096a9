use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{HireRequestDto, ResponseSubmission};
use super::envelope::{
    Acknowledgement, EmployeeRows, EmployerRows, Envelope, ErrorBody, RequestsPayload,
    StatsPayload,
};
use super::error::FetchError;
use crate::config::BackendConfig;
use crate::workflows::directory::{
    DashboardStats, DirectorySource, EmployeeQuery, EmployeeRecord, EmployerRecord,
};
use crate::workflows::hiring::{HireRequestSource, HireRequestStatus};
use crate::workflows::ids::{EmployeeId, EmployerId};

const HIRE_REQUESTS_PATH: &str = "/api/admin/hire-requests";
const RESPOND_PATH: &str = "/api/admin/hire-request/respond";
const EMPLOYEES_PATH: &str = "/api/employees";
const EMPLOYERS_PATH: &str = "/api/employers";
const STATS_PATH: &str = "/api/admin/dashboard/stats";
const EMPLOYEE_PATH: &str = "/api/employee";
const EMPLOYER_PATH: &str = "/api/employer";

/// JSON client for the recruitment backend.
///
/// Employee and employer listings are bounded by the configured directory timeout;
/// hire request calls wait as long as the backend takes.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    directory_timeout: Duration,
}

impl RestClient {
    pub fn new(config: &BackendConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: &BackendConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            directory_timeout: config.directory_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn call<P>(&self, request: RequestBuilder, bound: Option<Duration>) -> Result<P, FetchError>
    where
        P: DeserializeOwned,
    {
        let request = match bound {
            Some(bound) => request.timeout(bound),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|err| self.transport_error(err, bound))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err, bound))?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.error);
            let err = FetchError::status(status.as_u16(), reason);
            warn!(status = status.as_u16(), error = %err, "backend rejected request");
            return Err(err);
        }

        let envelope: Envelope<P> =
            serde_json::from_str(&body).map_err(|err| FetchError::Decode(err.to_string()))?;
        envelope.into_payload()
    }

    fn transport_error(&self, err: reqwest::Error, bound: Option<Duration>) -> FetchError {
        if err.is_timeout() {
            let seconds = bound.unwrap_or(self.directory_timeout).as_secs();
            warn!(seconds, "backend call timed out");
            FetchError::Timeout { seconds }
        } else {
            warn!(error = %err, "backend unreachable");
            FetchError::Transport(err.to_string())
        }
    }
}

impl HireRequestSource for RestClient {
    async fn fetch_all(&self) -> Result<Vec<HireRequestDto>, FetchError> {
        let request = self.http.get(self.url(HIRE_REQUESTS_PATH));
        let payload: RequestsPayload = self.call(request, None).await?;
        let rows = payload
            .requests
            .ok_or_else(|| FetchError::missing_payload("requests"))?;
        debug!(rows = rows.len(), "hire requests fetched");
        Ok(rows)
    }

    async fn submit_response(&self, submission: ResponseSubmission) -> Result<(), FetchError> {
        let request = self.http.post(self.url(RESPOND_PATH)).json(&submission);
        let _: Acknowledgement = self.call(request, None).await?;
        debug!(
            request_id = %submission.request_id,
            status = %HireRequestStatus::from(submission.status),
            "hire request response accepted"
        );
        Ok(())
    }
}

impl DirectorySource for RestClient {
    async fn fetch_employees(
        &self,
        query: &EmployeeQuery,
    ) -> Result<Vec<EmployeeRecord>, FetchError> {
        let request = self.http.get(self.url(EMPLOYEES_PATH)).query(&query.pairs());
        let payload: EmployeeRows = self.call(request, Some(self.directory_timeout)).await?;
        payload.rows.ok_or_else(|| FetchError::missing_payload("rows"))
    }

    async fn fetch_employers(&self) -> Result<Vec<EmployerRecord>, FetchError> {
        let request = self.http.get(self.url(EMPLOYERS_PATH));
        let payload: EmployerRows = self.call(request, Some(self.directory_timeout)).await?;
        payload.rows.ok_or_else(|| FetchError::missing_payload("rows"))
    }

    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, FetchError> {
        let request = self.http.get(self.url(STATS_PATH));
        let payload: StatsPayload = self.call(request, None).await?;
        payload.stats.ok_or_else(|| FetchError::missing_payload("stats"))
    }

    async fn delete_employee(&self, employee_id: EmployeeId) -> Result<(), FetchError> {
        let request = self
            .http
            .delete(self.url(&format!("{EMPLOYEE_PATH}/{employee_id}")));
        let _: Acknowledgement = self.call(request, None).await?;
        debug!(%employee_id, "employee deleted on backend");
        Ok(())
    }

    async fn delete_employer(&self, employer_id: EmployerId) -> Result<(), FetchError> {
        let request = self
            .http
            .delete(self.url(&format!("{EMPLOYER_PATH}/{employer_id}")));
        let _: Acknowledgement = self.call(request, None).await?;
        debug!(%employer_id, "employer deleted on backend");
        Ok(())
    }
}
