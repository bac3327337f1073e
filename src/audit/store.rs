//! Audit store interface and the bounded ring-buffer store
//!
//! The ring buffer keeps the most recent entries at the head and evicts from
//! the tail once its capacity is reached. It can optionally mirror itself to
//! a JSON file so history survives restarts.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{AddonHubError, AddonHubResult};
use crate::storage::file_io::{read_json, write_json_atomic};

use super::entry::AuditEntry;

/// Backing storage for audit entries.
///
/// Implementations only ever append; `recent` returns newest first.
pub trait AuditStore: Send + Sync {
    /// Append one entry
    fn append(&self, entry: AuditEntry) -> AddonHubResult<()>;

    /// Up to `limit` entries in descending timestamp order
    fn recent(&self, limit: usize) -> AddonHubResult<Vec<AuditEntry>>;

    /// Number of entries currently held
    fn len(&self) -> AddonHubResult<usize>;

    fn is_empty(&self) -> AddonHubResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Short label for status output
    fn describe(&self) -> String;
}

/// Bounded, most-recent-first store with an optional JSON mirror
pub struct RingBufferStore {
    entries: RwLock<VecDeque<AuditEntry>>,
    capacity: usize,
    mirror: Option<PathBuf>,
}

impl RingBufferStore {
    /// Purely in-memory store
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
            mirror: None,
        }
    }

    /// Store mirrored to `path`, seeded from the file if it exists.
    ///
    /// An unreadable mirror is logged and the store starts empty; the file is
    /// replaced on the next append.
    pub fn with_mirror(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let path = path.into();
        let capacity = capacity.max(1);

        let mut entries = match load_mirror(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable audit log");
                Vec::new()
            }
        };

        // Stable: entries sharing a timestamp keep their file order
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(capacity);

        Self {
            entries: RwLock::new(entries.into()),
            capacity,
            mirror: Some(path),
        }
    }

}

fn load_mirror(path: &Path) -> AddonHubResult<Vec<AuditEntry>> {
    read_json(path)
}

impl AuditStore for RingBufferStore {
    fn append(&self, entry: AuditEntry) -> AddonHubResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| AddonHubError::Audit(format!("Failed to acquire write lock: {}", e)))?;

        match &self.mirror {
            Some(path) => {
                // The buffer only changes once the mirror holds the new entry
                let mut next = entries.clone();
                next.push_front(entry);
                next.truncate(self.capacity);
                write_json_atomic(path, &next)?;
                *entries = next;
            }
            None => {
                entries.push_front(entry);
                entries.truncate(self.capacity);
            }
        }

        Ok(())
    }

    fn recent(&self, limit: usize) -> AddonHubResult<Vec<AuditEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| AddonHubError::Audit(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.iter().take(limit).cloned().collect())
    }

    fn len(&self) -> AddonHubResult<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|e| AddonHubError::Audit(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.len())
    }

    fn describe(&self) -> String {
        match &self.mirror {
            Some(path) => format!(
                "ring buffer (cap {}) mirrored to {}",
                self.capacity,
                path.display()
            ),
            None => format!("in-memory ring buffer (cap {})", self.capacity),
        }
    }
}
