//! Add-on CLI commands
//!
//! Implements CLI commands for browsing and managing the catalog.

use clap::Subcommand;

use crate::display::addon::{format_addon_details, format_addon_list, format_category_list};
use crate::error::{AddonHubError, AddonHubResult};
use crate::models::{Actor, AddonAuthor, AddonPatch, Category, NewAddon};
use crate::services::{AddonQuery, AddonService};
use crate::storage::Storage;

/// Add-on subcommands
#[derive(Subcommand)]
pub enum AddonCommands {
    /// List add-ons
    List {
        /// Only show one category (slug, e.g. "bloodfx")
        #[arg(short, long)]
        category: Option<String>,
        /// Search name and description
        #[arg(short, long)]
        search: Option<String>,
        /// Sort order: newest, oldest, popular, name
        #[arg(long, default_value = "newest")]
        sort: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show add-on details
    Show {
        /// Add-on name or ID
        addon: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Create a new add-on (team only)
    Create {
        /// Add-on name
        name: String,
        /// Category slug
        #[arg(short, long)]
        category: String,
        /// Description
        #[arg(short, long)]
        description: String,
        /// Download URL
        #[arg(short = 'u', long)]
        download_url: String,
        /// Preview image URL
        #[arg(long)]
        image_url: Option<String>,
        /// Preview video URL
        #[arg(long)]
        video_url: Option<String>,
        /// Author Discord tag
        #[arg(long)]
        author_tag: Option<String>,
        /// Author Discord ID
        #[arg(long)]
        author_id: Option<String>,
        /// Author Discord username
        #[arg(long)]
        author_name: Option<String>,
        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Mark as featured
        #[arg(long)]
        featured: bool,
    },

    /// Edit an add-on (team only)
    Update {
        /// Add-on name or ID
        addon: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// Move to another category
        #[arg(short, long)]
        category: Option<String>,
        /// New download URL
        #[arg(short = 'u', long)]
        download_url: Option<String>,
        /// New preview image URL
        #[arg(long)]
        image_url: Option<String>,
        /// New preview video URL
        #[arg(long, conflicts_with = "clear_video")]
        video_url: Option<String>,
        /// Remove the preview video
        #[arg(long)]
        clear_video: bool,
        /// Replace tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
        /// Set featured flag
        #[arg(long)]
        featured: Option<bool>,
    },

    /// Delete an add-on (team only)
    Delete {
        /// Add-on name or ID
        addon: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Count a download
    Download {
        /// Add-on name or ID
        addon: String,
    },

    /// List categories with add-on counts
    Categories,
}

/// Handle an add-on command
pub fn handle_addon_command(
    storage: &Storage,
    actor: &Actor,
    cmd: AddonCommands,
) -> AddonHubResult<()> {
    let service = AddonService::new(storage);

    match cmd {
        AddonCommands::List {
            category,
            search,
            sort,
            json,
        } => {
            let query = AddonQuery {
                category: category.as_deref().map(str::parse::<Category>).transpose()?,
                search,
                sort: sort.parse()?,
            };
            let addons = service.list(&query)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&addons)?);
            } else {
                print!("{}", format_addon_list(&addons));
            }
        }

        AddonCommands::Show { addon, json } => {
            let a = service
                .find(&addon)?
                .ok_or_else(|| AddonHubError::addon_not_found(&addon))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&a)?);
            } else {
                print!("{}", format_addon_details(&a));
            }
        }

        AddonCommands::Create {
            name,
            category,
            description,
            download_url,
            image_url,
            video_url,
            author_tag,
            author_id,
            author_name,
            tags,
            featured,
        } => {
            let input = NewAddon {
                name,
                description,
                category,
                download_url,
                image_url,
                video_url,
                author: AddonAuthor {
                    discord_tag: author_tag.unwrap_or_default(),
                    discord_id: author_id.unwrap_or_default(),
                    discord_username: author_name.unwrap_or_default(),
                    discord_avatar: String::new(),
                },
                featured,
                tags: clean_tags(tags),
            };

            let created = service.create(actor, input)?;
            println!("Created add-on: {} ({})", created.name, created.id);
        }

        AddonCommands::Update {
            addon,
            name,
            description,
            category,
            download_url,
            image_url,
            video_url,
            clear_video,
            tags,
            featured,
        } => {
            let a = service
                .find(&addon)?
                .ok_or_else(|| AddonHubError::addon_not_found(&addon))?;

            let patch = AddonPatch {
                name,
                description,
                category: category.as_deref().map(str::parse::<Category>).transpose()?,
                download_url,
                image_url,
                video_url: if clear_video { Some(None) } else { video_url.map(Some) },
                author: None,
                featured,
                tags: tags.map(clean_tags),
            };

            if patch.is_empty() {
                println!("Nothing to update for '{}'", a.name);
                return Ok(());
            }

            let updated = service.update(actor, &a.id, patch)?;
            println!("Updated add-on: {} ({})", updated.name, updated.id);
        }

        AddonCommands::Delete { addon, force } => {
            let a = service
                .find(&addon)?
                .ok_or_else(|| AddonHubError::addon_not_found(&addon))?;

            if !force {
                println!("About to delete add-on: {} ({})", a.name, a.id);
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(actor, &a.id)?;
            println!("Deleted add-on: {}", deleted.name);
        }

        AddonCommands::Download { addon } => {
            let a = service
                .find(&addon)?
                .ok_or_else(|| AddonHubError::addon_not_found(&addon))?;

            let updated = service.track_download(&a.id)?;
            println!("{}", updated.download_url);
        }

        AddonCommands::Categories => {
            let addons = service.list(&AddonQuery::default())?;
            let counts: Vec<(Category, usize)> = Category::all()
                .iter()
                .map(|c| (*c, addons.iter().filter(|a| a.category == *c).count()))
                .collect();
            print!("{}", format_category_list(&counts));
        }
    }

    Ok(())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
