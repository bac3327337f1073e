//! Durable table-backed audit store
//!
//! Entries are appended as rows of a CSV table whose columns follow the
//! snake_case convention of a relational `audit_log` table. The table is
//! never trimmed; retention is left to whoever owns the file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AddonHubError, AddonHubResult};
use crate::models::AuditId;

use super::entry::{ActorSnapshot, AuditEntry, FieldChange};
use super::store::AuditStore;

/// One row of the audit table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRow {
    pub id: String,
    pub timestamp: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub entity_name: String,
    pub user_id: String,
    pub username: String,
    pub user_avatar: String,
    /// JSON-encoded array of `{field, oldValue, newValue}`
    pub changes: String,
}

impl TryFrom<&AuditEntry> for AuditRow {
    type Error = AddonHubError;

    fn try_from(entry: &AuditEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id.to_string(),
            timestamp: entry.timestamp.to_rfc3339(),
            action: entry.action.to_string(),
            entity_type: entry.entity_type.to_string(),
            entity_id: entry.entity_id.clone(),
            entity_name: entry.entity_name.clone(),
            user_id: entry.actor.user_id.clone(),
            username: entry.actor.username.clone(),
            user_avatar: entry.actor.user_avatar.clone(),
            changes: serde_json::to_string(&entry.changes)?,
        })
    }
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = AddonHubError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        let id: AuditId = row
            .id
            .parse()
            .map_err(|e| AddonHubError::Audit(format!("Bad audit id '{}': {}", row.id, e)))?;

        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .map_err(|e| {
                AddonHubError::Audit(format!("Bad timestamp '{}': {}", row.timestamp, e))
            })?
            .with_timezone(&Utc);

        let changes: Vec<FieldChange> = if row.changes.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&row.changes)?
        };

        Ok(Self {
            id,
            timestamp,
            action: row.action.parse().map_err(AddonHubError::Audit)?,
            entity_type: row.entity_type.parse().map_err(AddonHubError::Audit)?,
            entity_id: row.entity_id,
            entity_name: row.entity_name,
            actor: ActorSnapshot {
                user_id: row.user_id,
                username: row.username,
                user_avatar: row.user_avatar,
            },
            changes,
        })
    }
}

/// Append-only CSV table of audit entries
pub struct TableStore {
    path: PathBuf,
    /// Serializes appends so rows are never interleaved
    write_lock: Mutex<()>,
}

impl TableStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read every row in file order
    pub fn read_all(&self) -> AddonHubResult<Vec<AuditEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut entries = Vec::new();

        for (line_num, row) in reader.deserialize::<AuditRow>().enumerate() {
            let row = row.map_err(|e| {
                AddonHubError::Audit(format!("Failed to read audit row {}: {}", line_num + 1, e))
            })?;
            entries.push(AuditEntry::try_from(row)?);
        }

        Ok(entries)
    }
}

impl AuditStore for TableStore {
    fn append(&self, entry: AuditEntry) -> AddonHubResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| AddonHubError::Audit(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let needs_header = std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AddonHubError::Io(format!("Failed to open audit table: {}", e)))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);

        writer.serialize(AuditRow::try_from(&entry)?)?;
        writer
            .flush()
            .map_err(|e| AddonHubError::Io(format!("Failed to flush audit table: {}", e)))?;

        Ok(())
    }

    fn recent(&self, limit: usize) -> AddonHubResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        // Newest row first before the stable sort, so ties favour the later append
        entries.reverse();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        Ok(entries)
    }

    fn len(&self) -> AddonHubResult<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        Ok(reader.records().filter(|r| r.is_ok()).count())
    }

    fn describe(&self) -> String {
        format!("table {}", self.path.display())
    }
}
