//! Audit service
//!
//! Read side of the change history, restricted to the add-ons team.

use crate::audit::AuditEntry;
use crate::error::AddonHubResult;
use crate::models::Actor;
use crate::storage::Storage;

/// Service for browsing recorded changes
pub struct AuditService<'a> {
    storage: &'a Storage,
}

impl<'a> AuditService<'a> {
    /// Create a new audit service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Most recent entries first. `None` uses the configured page size.
    pub fn list(&self, actor: &Actor, limit: Option<usize>) -> AddonHubResult<Vec<AuditEntry>> {
        actor.require_team()?;

        let limit = limit.unwrap_or_else(|| self.storage.audit.default_limit());
        Ok(self.storage.audit.list(limit))
    }

    /// Number of entries currently held by the store
    pub fn count(&self) -> AddonHubResult<usize> {
        self.storage.audit.store().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditAction, ChangeRecorder, EntityType, RingBufferStore};
    use crate::config::paths::AddonHubPaths;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddonHubPaths::with_base_dir(temp_dir.path().to_path_buf());
        let recorder = ChangeRecorder::new(Arc::new(RingBufferStore::in_memory(1000)));
        let storage = Storage::with_recorder(paths, recorder).unwrap();
        (temp_dir, storage)
    }

    fn actor(is_addons_team: bool) -> Actor {
        Actor {
            user_id: "1001".into(),
            username: "alice".into(),
            avatar: String::new(),
            is_addons_team,
        }
    }

    fn seed(storage: &Storage, count: usize) {
        for i in 0..count {
            storage.audit.record(
                AuditAction::Create,
                EntityType::Addon,
                format!("props_{}", i),
                format!("Prop {}", i),
                actor(true).snapshot(),
                Vec::new(),
            );
        }
    }

    #[test]
    fn test_list_requires_team() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage, 1);

        let service = AuditService::new(&storage);
        assert!(service.list(&actor(false), None).unwrap_err().is_not_authorized());
        assert_eq!(service.list(&actor(true), None).unwrap().len(), 1);
    }

    #[test]
    fn test_list_limits() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage, 60);

        let service = AuditService::new(&storage);
        assert_eq!(service.list(&actor(true), None).unwrap().len(), 50);
        assert_eq!(service.list(&actor(true), Some(5)).unwrap().len(), 5);
        assert!(service.list(&actor(true), Some(0)).unwrap().is_empty());
        assert_eq!(service.count().unwrap(), 60);
    }

    #[test]
    fn test_list_newest_first() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage, 3);

        let entries = AuditService::new(&storage).list(&actor(true), None).unwrap();
        assert_eq!(entries[0].entity_id, "props_2");
        assert_eq!(entries[2].entity_id, "props_0");
    }
}
