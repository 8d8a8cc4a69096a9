//! Hire-request approval workflow: listing, status filtering, tallies and the one-shot
//! accept/reject response.

pub mod domain;
pub mod repository;
pub mod router;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    HireRequest, HireRequestStatus, HireRequestView, Outcome, PartySnapshot, RequestCounts,
    Resolution, ResponseAction, ResponseMessage, StatusFilter, UnknownValue, ValidationError,
};
pub use repository::HireRequestSource;
pub use router::hire_request_router;
pub use store::{RequestWorkflowStore, ResponseError, ResponseReceipt};
