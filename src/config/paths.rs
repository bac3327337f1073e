//! Path management for AddonHub
//!
//! Provides XDG-compliant path resolution for configuration, catalog data,
//! and the audit log stores.
//!
//! ## Path Resolution Order
//!
//! 1. `ADDONHUB_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/addonhub` or `~/.config/addonhub`
//! 3. Windows: `%APPDATA%\addonhub`

use std::path::PathBuf;

use crate::error::AddonHubError;

/// Manages all paths used by AddonHub
#[derive(Debug, Clone)]
pub struct AddonHubPaths {
    /// Base directory for all AddonHub data
    base_dir: PathBuf,
}

impl AddonHubPaths {
    /// Create a new AddonHubPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, AddonHubError> {
        let base_dir = if let Ok(custom) = std::env::var("ADDONHUB_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create AddonHubPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/addonhub/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/addonhub/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to addons.json
    pub fn addons_file(&self) -> PathBuf {
        self.data_dir().join("addons.json")
    }

    /// JSON mirror of the ring-buffer audit store
    pub fn audit_mirror_file(&self) -> PathBuf {
        self.base_dir.join("audit-logs.json")
    }

    /// CSV table backing the durable audit store
    pub fn audit_table_file(&self) -> PathBuf {
        self.base_dir.join("audit_log.csv")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), AddonHubError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AddonHubError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AddonHubError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if AddonHub has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, AddonHubError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| AddonHubError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("addonhub"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, AddonHubError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| AddonHubError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("addonhub"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddonHubPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddonHubPaths::with_base_dir(temp_dir.path().join("hub"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddonHubPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.addons_file(),
            temp_dir.path().join("data").join("addons.json")
        );
        assert_eq!(
            paths.audit_mirror_file(),
            temp_dir.path().join("audit-logs.json")
        );
        assert_eq!(paths.audit_table_file(), temp_dir.path().join("audit_log.csv"));
    }
}
