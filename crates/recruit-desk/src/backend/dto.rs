//! Wire shapes returned by the recruitment backend.
//!
//! The backend serialises rows straight from its database joins, so timestamps arrive in
//! whatever format the web framework picked and several text columns may arrive as numbers.
//! Parsing is lenient here and strict in the conversion to domain types.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::workflows::hiring::domain::{
    HireRequest, HireRequestStatus, Outcome, PartySnapshot, Resolution,
};
use crate::workflows::ids::{EmployeeId, EmployerId, RequestId};

/// Row of `GET /api/admin/hire-requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HireRequestDto {
    pub request_id: RequestId,
    pub employer_id: EmployerId,
    pub employee_id: EmployeeId,
    pub status: HireRequestStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response_message: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub request_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub response_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub employer_company: Option<String>,
    #[serde(default)]
    pub employer_username: Option<String>,
    #[serde(default)]
    pub employer_email: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub employee_field: Option<String>,
    #[serde(default)]
    pub employee_location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub employee_experience: Option<String>,
    #[serde(default)]
    pub employee_email: Option<String>,
}

/// Body of `POST /api/admin/hire-request/respond`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSubmission {
    pub request_id: RequestId,
    pub status: Outcome,
    pub response_message: String,
}

/// A backend row that breaks the pending/resolved pairing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidHireRequest {
    #[error("hire request {0} is pending but carries a response date")]
    PendingWithResponseDate(RequestId),
    #[error("hire request {0} is resolved but has no response date")]
    MissingResponseDate(RequestId),
    #[error("hire request {0} is resolved but has no response message")]
    MissingResponseMessage(RequestId),
}

impl TryFrom<HireRequestDto> for HireRequest {
    type Error = InvalidHireRequest;

    fn try_from(dto: HireRequestDto) -> Result<Self, Self::Error> {
        let HireRequestDto {
            request_id,
            employer_id,
            employee_id,
            status,
            message,
            response_message,
            request_date,
            response_date,
            employer_company,
            employer_username,
            employer_email,
            employee_name,
            employee_field,
            employee_location,
            employee_experience,
            employee_email,
        } = dto;

        let resolution = match status {
            HireRequestStatus::Pending => {
                if response_date.is_some() {
                    return Err(InvalidHireRequest::PendingWithResponseDate(request_id));
                }
                None
            }
            HireRequestStatus::Accepted | HireRequestStatus::Rejected => {
                let outcome = if status == HireRequestStatus::Accepted {
                    Outcome::Accepted
                } else {
                    Outcome::Rejected
                };
                let responded_at =
                    response_date.ok_or(InvalidHireRequest::MissingResponseDate(request_id))?;
                // The respond endpoint overwrites `message` in place of a dedicated column.
                let message = response_message
                    .or_else(|| message.clone())
                    .filter(|text| !text.trim().is_empty())
                    .ok_or(InvalidHireRequest::MissingResponseMessage(request_id))?;
                Some(Resolution {
                    outcome,
                    message,
                    responded_at,
                })
            }
        };

        Ok(HireRequest {
            request_id,
            employer_id,
            employee_id,
            message: message.unwrap_or_default(),
            request_date,
            resolution,
            parties: PartySnapshot {
                employer_company,
                employer_username,
                employer_email,
                employee_name,
                employee_field,
                employee_location,
                employee_experience,
                employee_email,
            },
        })
    }
}

/// Accepts RFC 3339, RFC 2822 (the HTTP date format Flask emits) and naive `YYYY-MM-DD HH:MM:SS`
/// timestamps. Naive values are taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(format!("failed to parse '{raw}' as a timestamp"))
}

pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_timestamp(&value).map_err(serde::de::Error::custom))
        .transpose()
}

/// Text column that the backend may hand over as a JSON number (phone numbers, years of
/// experience).
pub(crate) fn deserialize_lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected text, found {other}"
        ))),
    }
}
