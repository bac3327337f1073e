//! Service layer for AddonHub
//!
//! The service layer provides business logic on top of the storage layer,
//! handling authorization, validation, and audit recording.

pub mod addon;
pub mod audit;

pub use addon::{AddonQuery, AddonService, SortOrder};
pub use audit::AuditService;
