//! User settings for AddonHub
//!
//! Manages the audit backend selection, retention policy, the default acting
//! user, and the list of team members allowed to edit the catalog.

use serde::{Deserialize, Serialize};

use super::paths::AddonHubPaths;
use crate::error::AddonHubError;
use crate::models::Actor;

/// Which audit store is used for this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditBackend {
    /// Bounded ring buffer held in memory only
    Memory,
    /// Bounded ring buffer mirrored to `audit-logs.json`
    #[default]
    File,
    /// Unbounded CSV table (`audit_log.csv`)
    Table,
}

impl std::fmt::Display for AuditBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditBackend::Memory => write!(f, "memory"),
            AuditBackend::File => write!(f, "file"),
            AuditBackend::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for AuditBackend {
    type Err = AddonHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(AuditBackend::Memory),
            "file" => Ok(AuditBackend::File),
            "table" => Ok(AuditBackend::Table),
            other => Err(AddonHubError::Config(format!(
                "Unknown audit backend '{}' (expected memory, file or table)",
                other
            ))),
        }
    }
}

/// Audit log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Backing store selected at startup
    #[serde(default)]
    pub backend: AuditBackend,

    /// Maximum number of entries kept by the ring buffer
    #[serde(default = "default_retention_cap")]
    pub retention_cap: usize,

    /// Page size used when no limit is given
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Record UPDATE entries even when no tracked field changed
    #[serde(default)]
    pub record_empty_updates: bool,
}

fn default_retention_cap() -> usize {
    1000
}

fn default_page_size() -> usize {
    50
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            backend: AuditBackend::default(),
            retention_cap: default_retention_cap(),
            default_page_size: default_page_size(),
            record_empty_updates: false,
        }
    }
}

/// Default identity used when no `--user-id` is passed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorSettings {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar: String,
}

/// User settings for AddonHub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Audit log configuration
    #[serde(default)]
    pub audit: AuditSettings,

    /// Acting user when none is given on the command line
    #[serde(default)]
    pub actor: ActorSettings,

    /// User ids holding the add-ons team role
    #[serde(default)]
    pub team_member_ids: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            audit: AuditSettings::default(),
            actor: ActorSettings::default(),
            team_member_ids: Vec::new(),
        }
    }
}

impl Settings {
    /// Whether the given user id belongs to the add-ons team
    pub fn is_team_member(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.team_member_ids.iter().any(|id| id == user_id)
    }

    /// Resolve the acting user, letting explicit values override the defaults
    pub fn resolve_actor(
        &self,
        user_id: Option<String>,
        username: Option<String>,
        avatar: Option<String>,
    ) -> Actor {
        let user_id = user_id.unwrap_or_else(|| self.actor.user_id.clone());
        let username = username.unwrap_or_else(|| {
            if self.actor.username.is_empty() {
                user_id.clone()
            } else {
                self.actor.username.clone()
            }
        });
        let avatar = avatar.unwrap_or_else(|| self.actor.avatar.clone());
        let is_addons_team = self.is_team_member(&user_id);

        Actor {
            user_id,
            username,
            avatar,
            is_addons_team,
        }
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AddonHubPaths) -> Result<Self, AddonHubError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                AddonHubError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AddonHubError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AddonHubPaths) -> Result<(), AddonHubError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AddonHubError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            AddonHubError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.audit.backend, AuditBackend::File);
        assert_eq!(settings.audit.retention_cap, 1000);
        assert_eq!(settings.audit.default_page_size, 50);
        assert!(!settings.audit.record_empty_updates);
        assert!(settings.team_member_ids.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddonHubPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.audit.backend = AuditBackend::Table;
        settings.team_member_ids.push("1001".into());

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.audit.backend, AuditBackend::Table);
        assert!(loaded.is_team_member("1001"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddonHubPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"audit": {"backend": "memory"}}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.audit.backend, AuditBackend::Memory);
        assert_eq!(loaded.audit.retention_cap, 1000);
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("TABLE".parse::<AuditBackend>().unwrap(), AuditBackend::Table);
        assert!("postgres".parse::<AuditBackend>().is_err());
    }

    #[test]
    fn test_resolve_actor() {
        let mut settings = Settings::default();
        settings.actor.user_id = "42".into();
        settings.actor.username = "alice".into();
        settings.team_member_ids.push("42".into());

        let actor = settings.resolve_actor(None, None, None);
        assert_eq!(actor.username, "alice");
        assert!(actor.is_addons_team);

        let other = settings.resolve_actor(Some("7".into()), None, None);
        assert_eq!(other.user_id, "7");
        assert!(!other.is_addons_team);
    }

    #[test]
    fn test_empty_user_is_never_team() {
        let mut settings = Settings::default();
        settings.team_member_ids.push(String::new());
        assert!(!settings.is_team_member(""));
    }
}
