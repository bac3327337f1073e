//! Storage initialization
//!
//! Handles first-run setup: directories and an empty, fully-categorized
//! catalog file.

use crate::config::paths::AddonHubPaths;
use crate::error::AddonHubError;

use super::addons::empty_catalog;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
pub fn initialize_storage(paths: &AddonHubPaths) -> Result<(), AddonHubError> {
    paths.ensure_directories()?;

    if !paths.addons_file().exists() {
        write_json_atomic(paths.addons_file(), &empty_catalog())?;
        tracing::info!(path = %paths.addons_file().display(), "created empty catalog");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::AddonRepository;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_empty_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddonHubPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();
        assert!(paths.addons_file().exists());

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(paths.addons_file()).unwrap()).unwrap();
        assert_eq!(raw.as_object().unwrap().len(), 10);

        let repo = AddonRepository::new(paths.addons_file());
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_initialize_keeps_existing_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddonHubPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.addons_file(), r#"{"sound": []}"#).unwrap();

        initialize_storage(&paths).unwrap();

        let contents = std::fs::read_to_string(paths.addons_file()).unwrap();
        assert_eq!(contents, r#"{"sound": []}"#);
    }
}
