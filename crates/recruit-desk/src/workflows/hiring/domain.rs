use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::ids::{EmployeeId, EmployerId, RequestId};

/// Lifecycle state of a hire request. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HireRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl HireRequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            HireRequestStatus::Pending => "pending",
            HireRequestStatus::Accepted => "accepted",
            HireRequestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for HireRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Terminal state reached by responding to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Accepted,
    Rejected,
}

impl From<Outcome> for HireRequestStatus {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Accepted => HireRequestStatus::Accepted,
            Outcome::Rejected => HireRequestStatus::Rejected,
        }
    }
}

/// Admin decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseAction {
    Accept,
    Reject,
}

impl ResponseAction {
    pub const fn target(self) -> Outcome {
        match self {
            ResponseAction::Accept => Outcome::Accepted,
            ResponseAction::Reject => Outcome::Rejected,
        }
    }
}

impl FromStr for ResponseAction {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            _ => Err(UnknownValue {
                kind: "response action",
                value: value.to_string(),
            }),
        }
    }
}

/// View selector for the request list. Purely presentational; never hides data permanently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Accepted,
    Rejected,
}

impl StatusFilter {
    pub const fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Accepted => "accepted",
            StatusFilter::Rejected => "rejected",
        }
    }

    pub fn matches(self, status: HireRequestStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == HireRequestStatus::Pending,
            StatusFilter::Accepted => status == HireRequestStatus::Accepted,
            StatusFilter::Rejected => status == HireRequestStatus::Rejected,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(UnknownValue {
                kind: "status filter",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/// Rejected before any network effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please enter a response message")]
    EmptyResponseMessage,
}

/// Response text that is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMessage(String);

impl ResponseMessage {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyResponseMessage);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// The admin's decision as persisted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub outcome: Outcome,
    pub message: String,
    pub responded_at: DateTime<Utc>,
}

/// Display columns joined in by the backend. Never edited locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySnapshot {
    pub employer_company: Option<String>,
    pub employer_username: Option<String>,
    pub employer_email: Option<String>,
    pub employee_name: Option<String>,
    pub employee_field: Option<String>,
    pub employee_location: Option<String>,
    pub employee_experience: Option<String>,
    pub employee_email: Option<String>,
}

/// An employer's proposal to hire a candidate.
///
/// Status is derived from `resolution`, so a pending request cannot carry a response
/// date or message and a resolved one always carries both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HireRequest {
    pub request_id: RequestId,
    pub employer_id: EmployerId,
    pub employee_id: EmployeeId,
    pub message: String,
    pub request_date: DateTime<Utc>,
    pub resolution: Option<Resolution>,
    pub parties: PartySnapshot,
}

impl HireRequest {
    pub fn status(&self) -> HireRequestStatus {
        match &self.resolution {
            None => HireRequestStatus::Pending,
            Some(resolution) => resolution.outcome.into(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.resolution.is_none()
    }

    pub fn response_message(&self) -> Option<&str> {
        self.resolution
            .as_ref()
            .map(|resolution| resolution.message.as_str())
    }

    pub fn response_date(&self) -> Option<DateTime<Utc>> {
        self.resolution
            .as_ref()
            .map(|resolution| resolution.responded_at)
    }

    pub fn view(&self) -> HireRequestView {
        HireRequestView {
            request_id: self.request_id,
            employer_id: self.employer_id,
            employee_id: self.employee_id,
            status: self.status().label(),
            message: self.message.clone(),
            response_message: self.response_message().map(str::to_string),
            request_date: self.request_date,
            response_date: self.response_date(),
            parties: self.parties.clone(),
        }
    }
}

/// Flat representation handed to rendering collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct HireRequestView {
    pub request_id: RequestId,
    pub employer_id: EmployerId,
    pub employee_id: EmployeeId,
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,
    pub request_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub parties: PartySnapshot,
}

/// Per-status tallies. Always recomputed from the current collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestCounts {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub total: usize,
}

impl RequestCounts {
    pub fn tally(requests: &[HireRequest]) -> Self {
        requests
            .iter()
            .fold(Self::default(), |mut counts, request| {
                match request.status() {
                    HireRequestStatus::Pending => counts.pending += 1,
                    HireRequestStatus::Accepted => counts.accepted += 1,
                    HireRequestStatus::Rejected => counts.rejected += 1,
                }
                counts.total += 1;
                counts
            })
    }
}
