//! Add-on repository for JSON storage
//!
//! Manages loading and saving the catalog to addons.json. On disk the catalog
//! is grouped by category: `{ "bloodfx": [...], "sound": [...], ... }`.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::AddonHubError;
use crate::models::{Addon, AddonId, Category};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout: add-ons grouped under their category slug
pub type CategorizedAddons = BTreeMap<Category, Vec<Addon>>;

/// A layout with every category present and empty
pub fn empty_catalog() -> CategorizedAddons {
    Category::all().iter().map(|c| (*c, Vec::new())).collect()
}

/// Repository for add-on persistence
pub struct AddonRepository {
    path: PathBuf,
    data: RwLock<HashMap<AddonId, Addon>>,
}

impl AddonRepository {
    /// Create a new add-on repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load add-ons from disk
    pub fn load(&self) -> Result<(), AddonHubError> {
        let catalog: CategorizedAddons = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            AddonHubError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for (category, addons) in catalog {
            for mut addon in addons {
                // The grouping key wins over a stale per-item category
                addon.category = category;
                data.insert(addon.id.clone(), addon);
            }
        }

        Ok(())
    }

    /// Save add-ons to disk
    pub fn save(&self) -> Result<(), AddonHubError> {
        let data = self.data.read().map_err(|e| {
            AddonHubError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut catalog = empty_catalog();
        for addon in data.values() {
            catalog.entry(addon.category).or_default().push(addon.clone());
        }
        for addons in catalog.values_mut() {
            addons.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        }

        write_json_atomic(&self.path, &catalog)
    }

    /// Get an add-on by ID
    pub fn get(&self, id: &AddonId) -> Result<Option<Addon>, AddonHubError> {
        let data = self.data.read().map_err(|e| {
            AddonHubError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(id).cloned())
    }

    /// Get all add-ons (unordered)
    pub fn get_all(&self) -> Result<Vec<Addon>, AddonHubError> {
        let data = self.data.read().map_err(|e| {
            AddonHubError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().cloned().collect())
    }

    /// First add-on whose name matches case-insensitively
    pub fn get_by_name(&self, name: &str) -> Result<Option<Addon>, AddonHubError> {
        let data = self.data.read().map_err(|e| {
            AddonHubError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let wanted = name.trim().to_lowercase();
        let mut matches: Vec<_> = data
            .values()
            .filter(|a| a.name.to_lowercase() == wanted)
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(matches.first().map(|a| (*a).clone()))
    }

    /// Whether an id is taken
    pub fn contains(&self, id: &AddonId) -> Result<bool, AddonHubError> {
        let data = self.data.read().map_err(|e| {
            AddonHubError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.contains_key(id))
    }

    /// Insert or update an add-on
    pub fn upsert(&self, addon: Addon) -> Result<(), AddonHubError> {
        let mut data = self.data.write().map_err(|e| {
            AddonHubError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(addon.id.clone(), addon);
        Ok(())
    }

    /// Delete an add-on, returning it if it existed
    pub fn delete(&self, id: &AddonId) -> Result<Option<Addon>, AddonHubError> {
        let mut data = self.data.write().map_err(|e| {
            AddonHubError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(id))
    }

    /// Count add-ons
    pub fn count(&self) -> Result<usize, AddonHubError> {
        let data = self.data.read().map_err(|e| {
            AddonHubError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
