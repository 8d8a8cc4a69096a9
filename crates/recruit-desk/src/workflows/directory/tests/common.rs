use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::backend::FetchError;
use crate::workflows::directory::domain::{DashboardStats, EmployeeRecord, EmployerRecord};
use crate::workflows::directory::repository::{DirectorySource, EmployeeQuery};
use crate::workflows::directory::{directory_router, DirectoryService};
use crate::workflows::ids::{EmployeeId, EmployerId};

pub(super) fn employee(
    id: i64,
    name: &str,
    field: &str,
    location: &str,
    mobile: &str,
) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: EmployeeId(id),
        name: Some(name.to_string()),
        field: Some(field.to_string()),
        location: Some(location.to_string()),
        mobile_no: Some(mobile.to_string()),
        nearest_route: Some("Route 7".to_string()),
        email: Some(format!("candidate{id}@mail.example")),
        ..EmployeeRecord::default()
    }
}

pub(super) fn employees() -> Vec<EmployeeRecord> {
    vec![
        employee(1, "John Smith", "Manager", "Karachi", "0300-1112233"),
        employee(2, "Sara Ahmed", "Accountant", "Lahore", "0321-4445566"),
        employee(3, "John Doe", "Driver", "Lahore", "0333-7778899"),
        EmployeeRecord {
            employee_id: EmployeeId(4),
            name: Some("Bilal Qureshi".to_string()),
            ..EmployeeRecord::default()
        },
    ]
}

pub(super) fn employer(id: i64, username: &str, company: &str, role: &str) -> EmployerRecord {
    EmployerRecord {
        employer_id: EmployerId(id),
        username: Some(username.to_string()),
        company_name: Some(company.to_string()),
        email: Some(format!("hr@{username}.example")),
        role: Some(role.to_string()),
        phone: Some(format!("042-555-{id:04}")),
        ..EmployerRecord::default()
    }
}

pub(super) fn employers() -> Vec<EmployerRecord> {
    vec![
        employer(9, "siteadmin", "Agency", "admin"),
        employer(8, "indus", "Indus Textiles", "user"),
        employer(7, "margalla", "Margalla Foods", "user"),
    ]
}

pub(super) fn employee_ids(rows: &[EmployeeRecord]) -> Vec<i64> {
    rows.iter().map(|row| row.employee_id.0).collect()
}

pub(super) fn employer_ids(rows: &[EmployerRecord]) -> Vec<i64> {
    rows.iter().map(|row| row.employer_id.0).collect()
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    employees: Mutex<Vec<EmployeeRecord>>,
    employers: Mutex<Vec<EmployerRecord>>,
    failure: Mutex<Option<FetchError>>,
    queries: Mutex<Vec<EmployeeQuery>>,
    stats_calls: AtomicUsize,
    deletes: AtomicUsize,
}

impl MemoryDirectory {
    pub(super) fn seeded() -> Self {
        Self {
            employees: Mutex::new(employees()),
            employers: Mutex::new(employers()),
            ..Self::default()
        }
    }

    pub(super) fn fail_with(&self, error: FetchError) {
        *self.failure.lock().expect("failure poisoned") = Some(error);
    }

    pub(super) fn queries(&self) -> Vec<EmployeeQuery> {
        self.queries.lock().expect("queries poisoned").clone()
    }

    pub(super) fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub(super) fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub(super) fn clear_failure(&self) {
        *self.failure.lock().expect("failure poisoned") = None;
    }

    fn failure(&self) -> Option<FetchError> {
        self.failure.lock().expect("failure poisoned").clone()
    }
}

impl DirectorySource for MemoryDirectory {
    async fn fetch_employees(
        &self,
        query: &EmployeeQuery,
    ) -> Result<Vec<EmployeeRecord>, FetchError> {
        self.queries
            .lock()
            .expect("queries poisoned")
            .push(query.clone());
        if let Some(error) = self.failure() {
            return Err(error);
        }
        Ok(self.employees.lock().expect("employees poisoned").clone())
    }

    async fn fetch_employers(&self) -> Result<Vec<EmployerRecord>, FetchError> {
        if let Some(error) = self.failure() {
            return Err(error);
        }
        Ok(self.employers.lock().expect("employers poisoned").clone())
    }

    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, FetchError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failure() {
            return Err(error);
        }
        Ok(DashboardStats {
            total_employees: 4,
            active_companies: 2,
            pending_requests: 1,
            cvs_processed: 3,
        })
    }

    async fn delete_employee(&self, employee_id: EmployeeId) -> Result<(), FetchError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failure() {
            return Err(error);
        }
        let mut rows = self.employees.lock().expect("employees poisoned");
        let before = rows.len();
        rows.retain(|row| row.employee_id != employee_id);
        if rows.len() == before {
            return Err(FetchError::status(404, Some("Employee not found".to_string())));
        }
        Ok(())
    }

    async fn delete_employer(&self, employer_id: EmployerId) -> Result<(), FetchError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failure() {
            return Err(error);
        }
        let mut rows = self.employers.lock().expect("employers poisoned");
        let position = rows
            .iter()
            .position(|row| row.employer_id == employer_id)
            .ok_or_else(|| FetchError::status(404, Some("Company not found".to_string())))?;
        if rows[position].is_admin() {
            return Err(FetchError::status(
                403,
                Some("Cannot delete admin accounts".to_string()),
            ));
        }
        rows.remove(position);
        Ok(())
    }
}

pub(super) async fn loaded_service() -> (DirectoryService<MemoryDirectory>, Arc<MemoryDirectory>) {
    let source = Arc::new(MemoryDirectory::seeded());
    let service = DirectoryService::new(source.clone(), EmployeeQuery::with_limit(200));
    service
        .refresh_employees()
        .await
        .expect("employees load");
    service.load_employers().await.expect("employers load");
    (service, source)
}

pub(super) async fn loaded_router() -> (axum::Router, Arc<MemoryDirectory>) {
    let (service, source) = loaded_service().await;
    (directory_router(Arc::new(service)), source)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
