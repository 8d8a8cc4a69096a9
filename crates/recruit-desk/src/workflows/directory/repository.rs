use std::future::Future;

use serde::{Deserialize, Serialize};

use super::domain::{DashboardStats, EmployeeRecord, EmployerRecord};
use crate::backend::FetchError;
use crate::workflows::ids::{EmployeeId, EmployerId};

/// Server-side narrowing accepted by `GET /api/employees`. The backend matches every
/// populated filter case-insensitively and ignoring spaces; `role` matches the applicant's
/// field of work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl EmployeeQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Query-string pairs with blank filters dropped.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let filters = [
            ("name", &self.name),
            ("email", &self.email),
            ("mobile_no", &self.mobile_no),
            ("role", &self.role),
            ("location", &self.location),
            ("experience", &self.experience),
        ];
        for (key, value) in filters {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Record fetch collaborator. Implementations bound how long they wait and report
/// [`FetchError::Timeout`] when the bound is exceeded.
pub trait DirectorySource: Send + Sync {
    fn fetch_employees(
        &self,
        query: &EmployeeQuery,
    ) -> impl Future<Output = Result<Vec<EmployeeRecord>, FetchError>> + Send;

    fn fetch_employers(
        &self,
    ) -> impl Future<Output = Result<Vec<EmployerRecord>, FetchError>> + Send;

    fn fetch_dashboard_stats(
        &self,
    ) -> impl Future<Output = Result<DashboardStats, FetchError>> + Send;

    /// Remove an applicant permanently.
    fn delete_employee(
        &self,
        employee_id: EmployeeId,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;

    /// Remove an employer company. The backend refuses admin accounts.
    fn delete_employer(
        &self,
        employer_id: EmployerId,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;
}
