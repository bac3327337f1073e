//! Core data models for AddonHub
//!
//! This module contains the catalog domain: add-ons, their categories, and
//! the acting user.

pub mod actor;
pub mod addon;
pub mod category;
pub mod ids;

pub use actor::Actor;
pub use addon::{Addon, AddonAuthor, AddonPatch, AddonValidationError, NewAddon};
pub use category::Category;
pub use ids::{AddonId, AuditId};
