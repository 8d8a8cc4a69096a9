use serde::{Deserialize, Serialize};

use super::search::SearchableRecord;
use crate::backend::dto::deserialize_lenient_text;
use crate::workflows::ids::{EmployeeId, EmployerId};

/// Applicant row from `GET /api/employees`. Columns the desk does not know are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub nearest_route: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub cnic_no: Option<String>,
    #[serde(default)]
    pub educational_profile: Option<String>,
    #[serde(default)]
    pub recent_completed_education: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub experience: Option<String>,
    #[serde(default)]
    pub experience_detail: Option<String>,
    #[serde(default)]
    pub cv: Option<String>,
    #[serde(default)]
    pub masked_cv: Option<String>,
}

/// Employee columns eligible for free-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeField {
    Name,
    MobileNo,
    NearestRoute,
    Field,
    Location,
}

impl SearchableRecord for EmployeeRecord {
    type Field = EmployeeField;

    const SEARCH_FIELDS: &'static [EmployeeField] = &[
        EmployeeField::Name,
        EmployeeField::MobileNo,
        EmployeeField::NearestRoute,
        EmployeeField::Field,
        EmployeeField::Location,
    ];

    fn field_value(&self, field: EmployeeField) -> Option<&str> {
        match field {
            EmployeeField::Name => self.name.as_deref(),
            EmployeeField::MobileNo => self.mobile_no.as_deref(),
            EmployeeField::NearestRoute => self.nearest_route.as_deref(),
            EmployeeField::Field => self.field.as_deref(),
            EmployeeField::Location => self.location.as_deref(),
        }
    }
}

/// Employer account row from `GET /api/employers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerRecord {
    pub employer_id: EmployerId,
    #[serde(default)]
    pub username: Option<String>,
    /// Wire column is spelled `comapny_name`.
    #[serde(default, rename(deserialize = "comapny_name"), alias = "company_name")]
    pub company_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename(deserialize = "referance"), alias = "reference")]
    pub reference: Option<String>,
}

impl EmployerRecord {
    /// Admin accounts share the employer table but are not companies.
    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| role.trim().eq_ignore_ascii_case("admin"))
    }
}

/// Employer columns eligible for free-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployerField {
    Username,
    CompanyName,
    Email,
    Phone,
}

impl SearchableRecord for EmployerRecord {
    type Field = EmployerField;

    const SEARCH_FIELDS: &'static [EmployerField] = &[
        EmployerField::Username,
        EmployerField::CompanyName,
        EmployerField::Email,
        EmployerField::Phone,
    ];

    fn field_value(&self, field: EmployerField) -> Option<&str> {
        match field {
            EmployerField::Username => self.username.as_deref(),
            EmployerField::CompanyName => self.company_name.as_deref(),
            EmployerField::Email => self.email.as_deref(),
            EmployerField::Phone => self.phone.as_deref(),
        }
    }
}

/// Headline numbers for the admin overview, computed by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_employees: u64,
    #[serde(default)]
    pub active_companies: u64,
    #[serde(default)]
    pub pending_requests: u64,
    #[serde(default)]
    pub cvs_processed: u64,
}
