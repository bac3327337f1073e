//! Audit entry data structures
//!
//! Defines the structure of audit log entries including action types,
//! entity types, the actor snapshot, and field-level changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::format_value;
use crate::models::AuditId;

/// Types of actions that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Create => write!(f, "CREATE"),
            AuditAction::Update => write!(f, "UPDATE"),
            AuditAction::Delete => write!(f, "DELETE"),
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(AuditAction::Create),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            other => Err(format!("unknown audit action '{}'", other)),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    Addon,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Addon => write!(f, "ADDON"),
        }
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADDON" => Ok(EntityType::Addon),
            other => Err(format!("unknown entity type '{}'", other)),
        }
    }
}

/// Who performed an action, copied at the time of the action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSnapshot {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub user_avatar: String,
}

/// One field that differs between two snapshots of an entity
///
/// A field that is absent on one side is reported as `null` on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: String,
    #[serde(default)]
    pub old_value: Value,
    #[serde(default)]
    pub new_value: Value,
}

impl FieldChange {
    pub fn new(field: impl Into<String>, old_value: Value, new_value: Value) -> Self {
        Self {
            field: field.into(),
            old_value,
            new_value,
        }
    }

    /// `field: old -> new`
    pub fn describe(&self) -> String {
        format!(
            "{}: {} -> {}",
            self.field,
            format_value(&self.old_value),
            format_value(&self.new_value)
        )
    }
}

/// A single audit log entry
///
/// Entries are immutable once built; the only way one leaves a store is
/// eviction by a bounded store's retention cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Unique identifier
    pub id: AuditId,

    /// When the action occurred (UTC); the ordering key
    pub timestamp: DateTime<Utc>,

    /// Type of action performed
    pub action: AuditAction,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// ID of the affected entity
    pub entity_id: String,

    /// Entity name at the time of the action
    pub entity_name: String,

    /// Who performed the action
    #[serde(flatten)]
    pub actor: ActorSnapshot,

    /// Field-level changes (UPDATE only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<FieldChange>,
}

impl AuditEntry {
    /// Create a new entry stamped with a fresh id and the current time
    pub fn new(
        action: AuditAction,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: impl Into<String>,
        actor: ActorSnapshot,
        changes: Vec<FieldChange>,
    ) -> Self {
        Self {
            id: AuditId::new(),
            timestamp: Utc::now(),
            action,
            entity_type,
            entity_id: entity_id.into(),
            entity_name: entity_name.into(),
            actor,
            changes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alice() -> ActorSnapshot {
        ActorSnapshot {
            user_id: "1001".into(),
            username: "alice".into(),
            user_avatar: "a1b2".into(),
        }
    }

    #[test]
    fn test_action_display() {
        assert_eq!(AuditAction::Create.to_string(), "CREATE");
        assert_eq!(AuditAction::Update.to_string(), "UPDATE");
        assert_eq!(AuditAction::Delete.to_string(), "DELETE");
        assert_eq!("DELETE".parse::<AuditAction>().unwrap(), AuditAction::Delete);
        assert!("delete".parse::<AuditAction>().is_err());
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = AuditEntry::new(
            AuditAction::Update,
            EntityType::Addon,
            "addon_1",
            "Blood FX",
            alice(),
            vec![FieldChange::new("name", json!("A"), json!("B"))],
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["action"], json!("UPDATE"));
        assert_eq!(value["entityType"], json!("ADDON"));
        assert_eq!(value["entityId"], json!("addon_1"));
        assert_eq!(value["entityName"], json!("Blood FX"));
        assert_eq!(value["userId"], json!("1001"));
        assert_eq!(value["username"], json!("alice"));
        assert_eq!(value["userAvatar"], json!("a1b2"));
        assert_eq!(
            value["changes"],
            json!([{"field": "name", "oldValue": "A", "newValue": "B"}])
        );
    }

    #[test]
    fn test_empty_changes_omitted() {
        let entry = AuditEntry::new(
            AuditAction::Create,
            EntityType::Addon,
            "addon_1",
            "Blood FX",
            alice(),
            Vec::new(),
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("changes").is_none());

        let back: AuditEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
