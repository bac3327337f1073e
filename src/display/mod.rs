//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.

pub mod addon;
pub mod audit;

pub use addon::{format_addon_details, format_addon_list, format_category_list};
pub use audit::format_audit_list;
