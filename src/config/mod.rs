//! Configuration module for AddonHub
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Audit backend selection

pub mod paths;
pub mod settings;

pub use paths::AddonHubPaths;
pub use settings::{AuditBackend, AuditSettings, Settings};
