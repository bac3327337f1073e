//! Add-on model
//!
//! A downloadable catalog item together with the author credit, plus the
//! input shapes used to create and edit one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::AddonId;
use crate::audit::{ChangeSet, EntityType, FieldChange, Trackable};

/// Image shown when an add-on has no preview of its own
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=300";

/// Maximum length of an add-on name
pub const MAX_NAME_LEN: usize = 100;

/// Credit for whoever made the add-on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonAuthor {
    #[serde(default)]
    pub discord_tag: String,
    #[serde(default)]
    pub discord_id: String,
    #[serde(default)]
    pub discord_username: String,
    #[serde(default)]
    pub discord_avatar: String,
}

impl AddonAuthor {
    pub fn is_empty(&self) -> bool {
        self.discord_tag.is_empty() && self.discord_id.is_empty()
    }
}

/// A catalog add-on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    pub id: AddonId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub category: Category,

    pub download_url: String,

    #[serde(default = "default_image_url")]
    pub image_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    #[serde(default)]
    pub author: AddonAuthor,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Download counter, bumped outside of any edit
    #[serde(default)]
    pub downloads: u64,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_image_url() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

/// Input for creating an add-on
#[derive(Debug, Clone, Default)]
pub struct NewAddon {
    pub name: String,
    pub description: String,
    pub category: String,
    pub download_url: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub author: AddonAuthor,
    pub featured: bool,
    pub tags: Vec<String>,
}

/// Partial edit of an add-on; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct AddonPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub download_url: Option<String>,
    pub image_url: Option<String>,
    /// `Some(None)` clears the video
    pub video_url: Option<Option<String>>,
    pub author: Option<AddonAuthor>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl AddonPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.download_url.is_none()
            && self.image_url.is_none()
            && self.video_url.is_none()
            && self.author.is_none()
            && self.featured.is_none()
            && self.tags.is_none()
    }
}

impl Addon {
    /// Build a new add-on from validated parts
    pub fn new(
        id: AddonId,
        name: impl Into<String>,
        category: Category,
        download_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category,
            download_url: download_url.into(),
            image_url: default_image_url(),
            video_url: None,
            author: AddonAuthor::default(),
            created_at: Utc::now(),
            updated_at: None,
            downloads: 0,
            featured: false,
            tags: Vec::new(),
        }
    }

    /// Merge a patch into this add-on and stamp `updated_at`
    pub fn apply(&mut self, patch: AddonPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(url) = patch.download_url {
            self.download_url = url.trim().to_string();
        }
        if let Some(url) = patch.image_url {
            self.image_url = url;
        }
        if let Some(video) = patch.video_url {
            self.video_url = video;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.updated_at = Some(Utc::now());
    }

    /// Record one download
    pub fn record_download(&mut self) {
        self.downloads = self.downloads.saturating_add(1);
    }

    /// Case-insensitive match on name or description
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Validate the add-on
    pub fn validate(&self) -> Result<(), AddonValidationError> {
        if self.name.trim().is_empty() {
            return Err(AddonValidationError::EmptyName);
        }

        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(AddonValidationError::NameTooLong(self.name.chars().count()));
        }

        if self.download_url.trim().is_empty() {
            return Err(AddonValidationError::MissingDownloadUrl);
        }

        Ok(())
    }
}

impl Trackable for Addon {
    const ENTITY_TYPE: EntityType = EntityType::Addon;

    fn entity_id(&self) -> String {
        self.id.to_string()
    }

    fn entity_name(&self) -> String {
        self.name.clone()
    }

    fn changes_since(&self, before: &Self) -> Vec<FieldChange> {
        ChangeSet::new()
            .field("name", &before.name, &self.name)
            .field("description", &before.description, &self.description)
            .field("category", &before.category, &self.category)
            .field("downloadUrl", &before.download_url, &self.download_url)
            .field("imageUrl", &before.image_url, &self.image_url)
            .field("videoUrl", &before.video_url, &self.video_url)
            .field("author", &before.author, &self.author)
            .field("featured", &before.featured, &self.featured)
            .field("tags", &before.tags, &self.tags)
            .into_changes()
    }
}

impl fmt::Display for Addon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}

/// Validation errors for add-ons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddonValidationError {
    EmptyName,
    NameTooLong(usize),
    MissingDownloadUrl,
}

impl fmt::Display for AddonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Add-on name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Add-on name too long ({} characters, max {})",
                len, MAX_NAME_LEN
            ),
            Self::MissingDownloadUrl => write!(f, "Download URL is required"),
        }
    }
}

impl std::error::Error for AddonValidationError {}
