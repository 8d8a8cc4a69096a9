use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use super::domain::{DashboardStats, EmployeeRecord, EmployerRecord};
use super::repository::{DirectorySource, EmployeeQuery};
use super::search::{RecordSearchIndex, SearchOutcome};
use crate::backend::FetchError;
use crate::workflows::ids::{EmployeeId, EmployerId};

/// Holds the employee and employer collections the admin searches over.
///
/// Each load swaps the matching index whole; a failed load keeps the previous one.
pub struct DirectoryService<S> {
    source: Arc<S>,
    default_query: EmployeeQuery,
    employees: RwLock<RecordSearchIndex<EmployeeRecord>>,
    employers: RwLock<RecordSearchIndex<EmployerRecord>>,
}

impl<S> DirectoryService<S>
where
    S: DirectorySource + 'static,
{
    pub fn new(source: Arc<S>, default_query: EmployeeQuery) -> Self {
        Self {
            source,
            default_query,
            employees: RwLock::new(RecordSearchIndex::default()),
            employers: RwLock::new(RecordSearchIndex::default()),
        }
    }

    pub fn default_query(&self) -> &EmployeeQuery {
        &self.default_query
    }

    pub async fn load_employees(&self, query: &EmployeeQuery) -> Result<usize, FetchError> {
        let rows = self.source.fetch_employees(query).await.map_err(|err| {
            warn!(error = %err, "failed to load employees");
            err
        })?;

        let total = rows.len();
        *self
            .employees
            .write()
            .unwrap_or_else(PoisonError::into_inner) = RecordSearchIndex::new(rows);
        info!(total, "employees loaded");
        Ok(total)
    }

    /// Reload employees with the query the service was configured with.
    pub async fn refresh_employees(&self) -> Result<usize, FetchError> {
        self.load_employees(&self.default_query).await
    }

    /// Reload employer companies. Admin accounts are dropped.
    pub async fn load_employers(&self) -> Result<usize, FetchError> {
        let rows = self.source.fetch_employers().await.map_err(|err| {
            warn!(error = %err, "failed to load employers");
            err
        })?;

        let companies: Vec<EmployerRecord> =
            rows.into_iter().filter(|row| !row.is_admin()).collect();
        let total = companies.len();
        *self
            .employers
            .write()
            .unwrap_or_else(PoisonError::into_inner) = RecordSearchIndex::new(companies);
        info!(total, "employers loaded");
        Ok(total)
    }

    pub fn employees(&self) -> RecordSearchIndex<EmployeeRecord> {
        self.employees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn employers(&self) -> RecordSearchIndex<EmployerRecord> {
        self.employers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn search_employees(&self, query: &str) -> SearchOutcome<EmployeeRecord> {
        self.employees().outcome(query)
    }

    pub fn search_employers(&self, query: &str) -> SearchOutcome<EmployerRecord> {
        self.employers().outcome(query)
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, FetchError> {
        self.source.fetch_dashboard_stats().await
    }

    /// Delete an applicant on the backend, then drop it from the held index.
    /// A refused delete leaves the index untouched.
    pub async fn delete_employee(&self, employee_id: EmployeeId) -> Result<(), FetchError> {
        self.source
            .delete_employee(employee_id)
            .await
            .map_err(|err| {
                warn!(%employee_id, error = %err, "failed to delete employee");
                err
            })?;

        let mut employees = self
            .employees
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *employees = employees.without(|row| row.employee_id == employee_id);
        info!(%employee_id, remaining = employees.len(), "employee deleted");
        Ok(())
    }

    /// Delete an employer company on the backend, then drop it from the held index.
    pub async fn delete_employer(&self, employer_id: EmployerId) -> Result<(), FetchError> {
        self.source
            .delete_employer(employer_id)
            .await
            .map_err(|err| {
                warn!(%employer_id, error = %err, "failed to delete employer");
                err
            })?;

        let mut employers = self
            .employers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *employers = employers.without(|row| row.employer_id == employer_id);
        info!(%employer_id, remaining = employers.len(), "employer deleted");
        Ok(())
    }
}
