//! Employee and employer records held for the admin desk, with multi-term search.

pub mod domain;
pub mod repository;
pub mod router;
pub mod search;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{DashboardStats, EmployeeField, EmployeeRecord, EmployerField, EmployerRecord};
pub use repository::{DirectorySource, EmployeeQuery};
pub use router::directory_router;
pub use search::{
    search, RecordSearchIndex, SearchNotice, SearchOutcome, SearchQuery, SearchableRecord,
};
pub use service::DirectoryService;
