//! Add-on categories
//!
//! The catalog is partitioned into a fixed set of categories, addressed by
//! their lowercase slug.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AddonHubError;

/// Category an add-on is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Explanation,
    Settings,
    Sound,
    #[serde(rename = "bloodfx")]
    BloodFx,
    Citizen,
    Mods,
    Skin,
    #[serde(rename = "killfx")]
    KillFx,
    Props,
    Reshades,
}

impl Category {
    /// All categories in sidebar order
    pub fn all() -> &'static [Category] {
        &[
            Category::Explanation,
            Category::Settings,
            Category::Sound,
            Category::BloodFx,
            Category::Citizen,
            Category::Mods,
            Category::Skin,
            Category::KillFx,
            Category::Props,
            Category::Reshades,
        ]
    }

    /// URL/id slug
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Explanation => "explanation",
            Category::Settings => "settings",
            Category::Sound => "sound",
            Category::BloodFx => "bloodfx",
            Category::Citizen => "citizen",
            Category::Mods => "mods",
            Category::Skin => "skin",
            Category::KillFx => "killfx",
            Category::Props => "props",
            Category::Reshades => "reshades",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Explanation => "Explanation",
            Category::Settings => "Settings",
            Category::Sound => "Sound",
            Category::BloodFx => "Bloodfx",
            Category::Citizen => "Citizen",
            Category::Mods => "Mods",
            Category::Skin => "Skin",
            Category::KillFx => "Killfx",
            Category::Props => "Props",
            Category::Reshades => "Reshades",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = AddonHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| AddonHubError::category_not_found(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("BloodFX".parse::<Category>().unwrap(), Category::BloodFx);
        assert_eq!(" props ".parse::<Category>().unwrap(), Category::Props);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "weapons".parse::<Category>().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_serde_uses_slug() {
        for category in Category::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.slug()));
        }
    }

    #[test]
    fn test_all_has_ten_categories() {
        assert_eq!(Category::all().len(), 10);
    }
}
