//! The change recorder
//!
//! Front door for everything that writes or reads audit history. Recording
//! never fails the caller: by the time an entry is written the audited
//! operation has already succeeded, so store errors are only logged.

use std::sync::Arc;

use crate::config::{AddonHubPaths, AuditBackend, AuditSettings};

use super::diff::summarize;
use super::entry::{ActorSnapshot, AuditAction, AuditEntry, EntityType, FieldChange};
use super::store::{AuditStore, RingBufferStore};
use super::table::TableStore;
use super::trackable::Trackable;

/// Records and lists audit entries over an injected store
#[derive(Clone)]
pub struct ChangeRecorder {
    store: Arc<dyn AuditStore>,
    record_empty_updates: bool,
    default_limit: usize,
}

impl ChangeRecorder {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        let defaults = AuditSettings::default();
        Self {
            store,
            record_empty_updates: defaults.record_empty_updates,
            default_limit: defaults.default_page_size,
        }
    }

    /// Build the store chosen in settings
    pub fn open(paths: &AddonHubPaths, settings: &AuditSettings) -> Self {
        let store: Arc<dyn AuditStore> = match settings.backend {
            AuditBackend::Memory => Arc::new(RingBufferStore::in_memory(settings.retention_cap)),
            AuditBackend::File => Arc::new(RingBufferStore::with_mirror(
                paths.audit_mirror_file(),
                settings.retention_cap,
            )),
            AuditBackend::Table => Arc::new(TableStore::new(paths.audit_table_file())),
        };

        tracing::debug!(backend = %settings.backend, store = %store.describe(), "audit store opened");

        Self {
            store,
            record_empty_updates: settings.record_empty_updates,
            default_limit: settings.default_page_size,
        }
    }

    pub fn with_record_empty_updates(mut self, enabled: bool) -> Self {
        self.record_empty_updates = enabled;
        self
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn store(&self) -> &dyn AuditStore {
        self.store.as_ref()
    }

    /// Append one entry; failures are logged, never returned
    pub fn record(
        &self,
        action: AuditAction,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: impl Into<String>,
        actor: ActorSnapshot,
        changes: Vec<FieldChange>,
    ) {
        let entry = AuditEntry::new(action, entity_type, entity_id, entity_name, actor, changes);
        let mut summary = format!(
            "{} {} \"{}\" by {}",
            entry.action, entry.entity_type, entry.entity_name, entry.actor.username
        );
        if let Some(changes) = summarize(&entry.changes) {
            summary.push_str(&format!(" ({})", changes));
        }
        let entity_id = entry.entity_id.clone();

        match self.store.append(entry) {
            Ok(()) => tracing::info!(entity_id = %entity_id, "audit: {}", summary),
            Err(e) => tracing::error!(entity_id = %entity_id, error = %e, "failed to record audit entry: {}", summary),
        }
    }

    pub fn record_create<T: Trackable>(&self, actor: ActorSnapshot, entity: &T) {
        self.record(
            AuditAction::Create,
            T::ENTITY_TYPE,
            entity.entity_id(),
            entity.entity_name(),
            actor,
            Vec::new(),
        );
    }

    /// Record an edit with the tracked-field diff between `before` and `after`.
    ///
    /// Edits that touched no tracked field are skipped unless configured
    /// otherwise.
    pub fn record_update<T: Trackable>(&self, actor: ActorSnapshot, before: &T, after: &T) {
        let changes = after.changes_since(before);
        if changes.is_empty() && !self.record_empty_updates {
            tracing::debug!(entity_id = %after.entity_id(), "no tracked changes; skipping audit entry");
            return;
        }

        self.record(
            AuditAction::Update,
            T::ENTITY_TYPE,
            after.entity_id(),
            after.entity_name(),
            actor,
            changes,
        );
    }

    pub fn record_delete<T: Trackable>(&self, actor: ActorSnapshot, entity: &T) {
        self.record(
            AuditAction::Delete,
            T::ENTITY_TYPE,
            entity.entity_id(),
            entity.entity_name(),
            actor,
            Vec::new(),
        );
    }

    /// Most recent entries first. A failing store yields an empty list.
    pub fn list(&self, limit: usize) -> Vec<AuditEntry> {
        match self.store.recent(limit) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read audit log");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AddonHubError, AddonHubResult};
    use crate::models::{Addon, AddonId, Category};
    use tempfile::TempDir;

    struct BrokenStore;

    impl AuditStore for BrokenStore {
        fn append(&self, _entry: AuditEntry) -> AddonHubResult<()> {
            Err(AddonHubError::Audit("disk on fire".into()))
        }

        fn recent(&self, _limit: usize) -> AddonHubResult<Vec<AuditEntry>> {
            Err(AddonHubError::Audit("disk on fire".into()))
        }

        fn len(&self) -> AddonHubResult<usize> {
            Err(AddonHubError::Audit("disk on fire".into()))
        }

        fn describe(&self) -> String {
            "broken".into()
        }
    }

    fn alice() -> ActorSnapshot {
        ActorSnapshot {
            user_id: "1001".into(),
            username: "alice".into(),
            user_avatar: "a1b2".into(),
        }
    }

    fn memory_recorder() -> ChangeRecorder {
        ChangeRecorder::new(Arc::new(RingBufferStore::in_memory(1000)))
    }

    fn blood_fx() -> Addon {
        Addon::new(
            AddonId::new("addon_1"),
            "Blood FX",
            Category::BloodFx,
            "https://cdn.example/bloodfx.zip",
        )
    }

    #[test]
    fn test_record_then_list_one() {
        let recorder = memory_recorder();
        recorder.record(
            AuditAction::Create,
            EntityType::Addon,
            "addon_0",
            "Earlier",
            alice(),
            Vec::new(),
        );
        recorder.record(
            AuditAction::Update,
            EntityType::Addon,
            "addon_1",
            "Blood FX",
            alice(),
            vec![FieldChange::new("name", "A".into(), "B".into())],
        );

        let latest = recorder.list(1);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].entity_id, "addon_1");
        assert_eq!(latest[0].action, AuditAction::Update);
        assert_eq!(latest[0].changes.len(), 1);
    }

    #[test]
    fn test_delete_example() {
        let recorder = memory_recorder();
        recorder.record_delete(alice(), &blood_fx());

        let entries = recorder.list(10);
        let first = &entries[0];
        assert_eq!(first.action.to_string(), "DELETE");
        assert_eq!(first.entity_name, "Blood FX");
        assert_eq!(first.actor.username, "alice");
        assert!(first.changes.is_empty());
    }

    #[test]
    fn test_update_records_tracked_diff() {
        let recorder = memory_recorder();
        let before = blood_fx();
        let mut after = before.clone();
        after.name = "Blood FX 2".into();
        after.downloads = 40;

        recorder.record_update(alice(), &before, &after);

        let entry = &recorder.list(1)[0];
        assert_eq!(entry.entity_name, "Blood FX 2");
        assert_eq!(entry.changes.len(), 1);
        assert_eq!(entry.changes[0].field, "name");
    }

    #[test]
    fn test_empty_update_skipped_by_default() {
        let recorder = memory_recorder();
        let before = blood_fx();
        let mut after = before.clone();
        after.downloads += 1;

        recorder.record_update(alice(), &before, &after);
        assert!(recorder.list(10).is_empty());

        let recorder = recorder.with_record_empty_updates(true);
        recorder.record_update(alice(), &before, &after);
        assert_eq!(recorder.list(10).len(), 1);
    }

    #[test]
    fn test_broken_store_never_fails_caller() {
        let recorder = ChangeRecorder::new(Arc::new(BrokenStore));
        recorder.record_create(alice(), &blood_fx());
        assert!(recorder.list(10).is_empty());
    }

    #[test]
    fn test_open_selects_backend() {
        let temp = TempDir::new().unwrap();
        let paths = AddonHubPaths::with_base_dir(temp.path().to_path_buf());

        let mut settings = AuditSettings::default();
        settings.backend = AuditBackend::Table;
        let recorder = ChangeRecorder::open(&paths, &settings);
        recorder.record_create(alice(), &blood_fx());
        assert!(paths.audit_table_file().exists());
        assert!(!paths.audit_mirror_file().exists());

        settings.backend = AuditBackend::File;
        let recorder = ChangeRecorder::open(&paths, &settings);
        recorder.record_create(alice(), &blood_fx());
        assert!(paths.audit_mirror_file().exists());

        settings.backend = AuditBackend::Memory;
        settings.default_page_size = 7;
        let recorder = ChangeRecorder::open(&paths, &settings);
        assert!(recorder.list(10).is_empty());
        assert_eq!(recorder.default_limit(), 7);
    }
}
