//! Add-on display formatting
//!
//! Formats catalog entries for terminal output in table and detail views.

use crate::models::{Addon, Category};

/// Format a list of add-ons as a table
pub fn format_addon_list(addons: &[Addon]) -> String {
    if addons.is_empty() {
        return "No add-ons found.".to_string();
    }

    let id_width = addons
        .iter()
        .map(|a| a.id.as_str().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let name_width = addons
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 40);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<name_width$}  {:<12}  {:>9}  {}\n",
        "ID",
        "Name",
        "Category",
        "Downloads",
        "Author",
        id_width = id_width,
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:-<id_width$}  {:-<name_width$}  {:-<12}  {:->9}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        id_width = id_width,
        name_width = name_width,
    ));

    for addon in addons {
        let featured = if addon.featured { " *" } else { "" };
        output.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {:<12}  {:>9}  {}{}\n",
            addon.id.as_str(),
            truncate(&addon.name, name_width),
            addon.category.label(),
            addon.downloads,
            author_label(addon),
            featured,
            id_width = id_width,
            name_width = name_width,
        ));
    }

    output.push_str(&format!("\nTotal: {} add-ons", addons.len()));
    if addons.iter().any(|a| a.featured) {
        output.push_str("\n* = featured");
    }
    output.push('\n');

    output
}

/// Format a single add-on's details
pub fn format_addon_details(addon: &Addon) -> String {
    let mut output = String::new();

    output.push_str(&format!("Add-on: {}\n", addon.name));
    output.push_str(&format!("  ID:        {}\n", addon.id));
    output.push_str(&format!("  Category:  {}\n", addon.category.label()));
    output.push_str(&format!("  Downloads: {}\n", addon.downloads));
    output.push_str(&format!(
        "  Featured:  {}\n",
        if addon.featured { "Yes" } else { "No" }
    ));

    if !addon.description.is_empty() {
        output.push('\n');
        output.push_str(&format!("  {}\n", addon.description));
    }

    output.push('\n');
    output.push_str(&format!("  Download:  {}\n", addon.download_url));
    output.push_str(&format!("  Image:     {}\n", addon.image_url));
    if let Some(video) = &addon.video_url {
        output.push_str(&format!("  Video:     {}\n", video));
    }

    if !addon.tags.is_empty() {
        output.push_str(&format!("  Tags:      {}\n", addon.tags.join(", ")));
    }

    if !addon.author.is_empty() {
        output.push('\n');
        output.push_str(&format!("  Author:    {}\n", author_label(addon)));
        if !addon.author.discord_id.is_empty() {
            output.push_str(&format!("  Discord:   {}\n", addon.author.discord_id));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:   {}\n",
        addon.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if let Some(updated) = addon.updated_at {
        output.push_str(&format!(
            "  Modified:  {}\n",
            updated.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output
}

/// Category slugs with their labels and add-on counts
pub fn format_category_list(counts: &[(Category, usize)]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<12}  {:<12}  {:>6}\n", "Slug", "Label", "Addons"));
    output.push_str(&format!("{:-<12}  {:-<12}  {:->6}\n", "", "", ""));

    for (category, count) in counts {
        output.push_str(&format!(
            "{:<12}  {:<12}  {:>6}\n",
            category.slug(),
            category.label(),
            count
        ));
    }

    output
}

fn author_label(addon: &Addon) -> &str {
    if !addon.author.discord_username.is_empty() {
        &addon.author.discord_username
    } else if !addon.author.discord_tag.is_empty() {
        &addon.author.discord_tag
    } else {
        "-"
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AddonId;

    fn addon(id: &str, name: &str) -> Addon {
        Addon::new(
            AddonId::new(id),
            name,
            Category::Sound,
            "https://cdn.example/file.zip",
        )
    }

    #[test]
    fn test_format_addon_list() {
        let mut featured = addon("sound_1", "Hitsounds");
        featured.featured = true;
        featured.author.discord_username = "alice".into();

        let output = format_addon_list(&[featured, addon("sound_2", "Footsteps")]);
        assert!(output.contains("Hitsounds"));
        assert!(output.contains("Footsteps"));
        assert!(output.contains("alice *"));
        assert!(output.contains("Total: 2 add-ons"));
        assert!(output.contains("* = featured"));
    }

    #[test]
    fn test_format_empty_list() {
        assert!(format_addon_list(&[]).contains("No add-ons found"));
    }

    #[test]
    fn test_long_names_truncated() {
        let output = format_addon_list(&[addon("sound_1", &"x".repeat(80))]);
        assert!(output.contains(&format!("{}...", "x".repeat(37))));
    }

    #[test]
    fn test_format_addon_details() {
        let mut a = addon("sound_1", "Hitsounds");
        a.video_url = Some("https://video.example/1".into());
        a.tags = vec!["pvp".into(), "audio".into()];

        let output = format_addon_details(&a);
        assert!(output.contains("Add-on: Hitsounds"));
        assert!(output.contains("Video:     https://video.example/1"));
        assert!(output.contains("Tags:      pvp, audio"));
        assert!(!output.contains("Modified"));
    }

    #[test]
    fn test_format_category_list() {
        let output = format_category_list(&[(Category::BloodFx, 3)]);
        assert!(output.contains("bloodfx"));
        assert!(output.contains("Bloodfx"));
        assert!(output.contains("3"));
    }
}
