//! Add-on service
//!
//! Business logic for the catalog: browsing with filters and sorting, and
//! team-only create/update/delete. Every mutation is handed to the change
//! recorder after it has been saved.

use std::str::FromStr;

use crate::error::{AddonHubError, AddonHubResult};
use crate::models::{Actor, Addon, AddonId, AddonPatch, Category, NewAddon};
use crate::storage::Storage;

/// Catalog ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recently created first
    #[default]
    Newest,
    Oldest,
    /// Most downloaded first
    Popular,
    /// Alphabetical by name
    Name,
}

impl FromStr for SortOrder {
    type Err = AddonHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "popular" => Ok(SortOrder::Popular),
            "name" => Ok(SortOrder::Name),
            other => Err(AddonHubError::Validation(format!(
                "Unknown sort order '{}' (expected newest, oldest, popular or name)",
                other
            ))),
        }
    }
}

/// Filters for listing the catalog
#[derive(Debug, Clone, Default)]
pub struct AddonQuery {
    pub category: Option<Category>,
    pub search: Option<String>,
    pub sort: SortOrder,
}

/// Service for add-on management
pub struct AddonService<'a> {
    storage: &'a Storage,
}

impl<'a> AddonService<'a> {
    /// Create a new add-on service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// List add-ons matching `query`
    pub fn list(&self, query: &AddonQuery) -> AddonHubResult<Vec<Addon>> {
        let mut addons: Vec<Addon> = self
            .storage
            .addons
            .get_all()?
            .into_iter()
            .filter(|a| query.category.map_or(true, |c| a.category == c))
            .filter(|a| query.search.as_deref().map_or(true, |q| a.matches_search(q)))
            .collect();

        match query.sort {
            SortOrder::Newest => addons.sort_by(|a, b| {
                b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id))
            }),
            SortOrder::Oldest => addons.sort_by(|a, b| {
                a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
            }),
            SortOrder::Popular => addons.sort_by(|a, b| {
                b.downloads.cmp(&a.downloads).then_with(|| a.id.cmp(&b.id))
            }),
            SortOrder::Name => addons.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.id.cmp(&b.id))
            }),
        }

        Ok(addons)
    }

    /// Get an add-on by ID
    pub fn get(&self, id: &AddonId) -> AddonHubResult<Option<Addon>> {
        self.storage.addons.get(id)
    }

    /// Find an add-on by ID or name
    pub fn find(&self, identifier: &str) -> AddonHubResult<Option<Addon>> {
        if let Some(addon) = self.storage.addons.get(&AddonId::new(identifier.trim()))? {
            return Ok(Some(addon));
        }
        self.storage.addons.get_by_name(identifier)
    }

    /// Create a new add-on (team only)
    pub fn create(&self, actor: &Actor, input: NewAddon) -> AddonHubResult<Addon> {
        actor.require_team()?;

        let name = input.name.trim();
        if name.is_empty()
            || input.description.trim().is_empty()
            || input.category.trim().is_empty()
            || input.download_url.trim().is_empty()
        {
            return Err(AddonHubError::Validation(
                "Missing required fields (name, description, category, download URL)".into(),
            ));
        }

        let category: Category = input.category.parse()?;
        let id = self.unique_id(category)?;

        let mut addon = Addon::new(id, name, category, input.download_url.trim());
        addon.description = input.description;
        if let Some(image_url) = input.image_url.filter(|u| !u.trim().is_empty()) {
            addon.image_url = image_url;
        }
        addon.video_url = input.video_url.filter(|u| !u.trim().is_empty());
        addon.author = input.author;
        addon.featured = input.featured;
        addon.tags = input.tags;

        addon
            .validate()
            .map_err(|e| AddonHubError::Validation(e.to_string()))?;

        self.storage.addons.upsert(addon.clone())?;
        self.storage.addons.save()?;

        self.storage.audit.record_create(actor.snapshot(), &addon);

        Ok(addon)
    }

    /// Apply a partial edit (team only)
    pub fn update(&self, actor: &Actor, id: &AddonId, patch: AddonPatch) -> AddonHubResult<Addon> {
        actor.require_team()?;

        let before = self
            .storage
            .addons
            .get(id)?
            .ok_or_else(|| AddonHubError::addon_not_found(id.to_string()))?;

        let mut addon = before.clone();
        addon.apply(patch);

        addon
            .validate()
            .map_err(|e| AddonHubError::Validation(e.to_string()))?;

        self.storage.addons.upsert(addon.clone())?;
        self.storage.addons.save()?;

        self.storage
            .audit
            .record_update(actor.snapshot(), &before, &addon);

        Ok(addon)
    }

    /// Delete an add-on (team only)
    pub fn delete(&self, actor: &Actor, id: &AddonId) -> AddonHubResult<Addon> {
        actor.require_team()?;

        let addon = self
            .storage
            .addons
            .delete(id)?
            .ok_or_else(|| AddonHubError::addon_not_found(id.to_string()))?;
        self.storage.addons.save()?;

        self.storage.audit.record_delete(actor.snapshot(), &addon);

        Ok(addon)
    }

    /// Count a download. Open to everyone and not audited.
    pub fn track_download(&self, id: &AddonId) -> AddonHubResult<Addon> {
        let mut addon = self
            .storage
            .addons
            .get(id)?
            .ok_or_else(|| AddonHubError::addon_not_found(id.to_string()))?;

        addon.record_download();
        self.storage.addons.upsert(addon.clone())?;
        self.storage.addons.save()?;

        tracing::debug!(id = %addon.id, downloads = addon.downloads, "download tracked");
        Ok(addon)
    }

    /// `<category>_<millis>`, suffixed when two creations land in the same millisecond
    fn unique_id(&self, category: Category) -> AddonHubResult<AddonId> {
        let base = AddonId::generate(category);
        if !self.storage.addons.contains(&base)? {
            return Ok(base);
        }

        let mut n = 2;
        loop {
            let candidate = base.with_suffix(n);
            if !self.storage.addons.contains(&candidate)? {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}
