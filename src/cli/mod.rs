//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod addon;
pub mod audit;

pub use addon::{handle_addon_command, AddonCommands};
pub use audit::{handle_audit_command, AuditCommands};
