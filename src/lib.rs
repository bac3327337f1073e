//! AddonHub - add-on catalog administration with a change audit trail
//!
//! This library provides the core functionality for the AddonHub CLI: a
//! categorized catalog of downloadable game add-ons, team-only editing, and
//! an audit log that records who changed what.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (add-ons, categories, actors, ids)
//! - `storage`: JSON file storage layer
//! - `audit`: Change recording, field diffs and audit stores
//! - `services`: Business logic layer
//! - `cli`: Command handlers
//! - `display`: Terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use addonhub::config::{paths::AddonHubPaths, settings::Settings};
//! use addonhub::storage::Storage;
//!
//! let paths = AddonHubPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths, &settings)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::AddonHubError;
