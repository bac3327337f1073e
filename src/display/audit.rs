//! Audit log display formatting

use crate::audit::AuditEntry;

/// Format audit entries, newest first, one block per entry.
///
/// `total` is the number of entries held by the store.
pub fn format_audit_list(entries: &[AuditEntry], total: usize) -> String {
    if entries.is_empty() {
        return "No audit entries recorded.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20}  {:<6}  {:<30}  {}\n",
        "Time", "Action", "Add-on", "By"
    ));
    output.push_str(&format!("{:-<20}  {:-<6}  {:-<30}  {:-<12}\n", "", "", "", ""));

    for entry in entries {
        output.push_str(&format!(
            "{:<20}  {:<6}  {:<30}  {}\n",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.action,
            entry_label(entry),
            entry.actor.username,
        ));

        for change in &entry.changes {
            output.push_str(&format!("{:22}  {}\n", "", change.describe()));
        }
    }

    output.push_str(&format!("\nShowing {} of {} entries\n", entries.len(), total));
    output
}

fn entry_label(entry: &AuditEntry) -> String {
    let label = format!("{} ({})", entry.entity_name, entry.entity_id);
    if label.chars().count() > 30 {
        let head: String = label.chars().take(27).collect();
        format!("{}...", head)
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{ActorSnapshot, AuditAction, EntityType, FieldChange};
    use serde_json::json;

    fn alice() -> ActorSnapshot {
        ActorSnapshot {
            user_id: "1001".into(),
            username: "alice".into(),
            user_avatar: String::new(),
        }
    }

    #[test]
    fn test_format_empty() {
        assert!(format_audit_list(&[], 0).contains("No audit entries"));
    }

    #[test]
    fn test_format_entries_with_changes() {
        let update = AuditEntry::new(
            AuditAction::Update,
            EntityType::Addon,
            "sound_1",
            "Hitsounds",
            alice(),
            vec![FieldChange::new("featured", json!(false), json!(true))],
        );
        let delete = AuditEntry::new(
            AuditAction::Delete,
            EntityType::Addon,
            "bloodfx_1",
            "Blood FX",
            alice(),
            Vec::new(),
        );

        let output = format_audit_list(&[update, delete], 7);
        assert!(output.contains("UPDATE"));
        assert!(output.contains("Hitsounds (sound_1)"));
        assert!(output.contains("featured: false -> true"));
        assert!(output.contains("DELETE"));
        assert!(output.contains("alice"));
        assert!(output.contains("Showing 2 of 7 entries"));
    }
}
