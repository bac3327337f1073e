//! Storage layer for AddonHub
//!
//! Provides JSON file storage for the catalog with atomic writes, and owns
//! the change recorder so every mutation path has it at hand.

pub mod addons;
pub mod file_io;
pub mod init;

pub use addons::{AddonRepository, CategorizedAddons};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;

use crate::audit::ChangeRecorder;
use crate::config::paths::AddonHubPaths;
use crate::config::settings::Settings;
use crate::error::AddonHubError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: AddonHubPaths,
    pub addons: AddonRepository,
    pub audit: ChangeRecorder,
}

impl Storage {
    /// Create a new Storage instance with the audit backend from `settings`
    pub fn new(paths: AddonHubPaths, settings: &Settings) -> Result<Self, AddonHubError> {
        paths.ensure_directories()?;

        Ok(Self {
            addons: AddonRepository::new(paths.addons_file()),
            audit: ChangeRecorder::open(&paths, &settings.audit),
            paths,
        })
    }

    /// Create storage with an explicit recorder
    pub fn with_recorder(
        paths: AddonHubPaths,
        audit: ChangeRecorder,
    ) -> Result<Self, AddonHubError> {
        paths.ensure_directories()?;

        Ok(Self {
            addons: AddonRepository::new(paths.addons_file()),
            audit,
            paths,
        })
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), AddonHubError> {
        self.addons.load()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddonHubPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert!(storage.audit.list(10).is_empty());
    }
}
