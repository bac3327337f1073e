//! Audit logging system for AddonHub
//!
//! Records every create, update and delete on catalog entities, together
//! with who did it and which fields changed.
//!
//! # Architecture
//!
//! - `AuditEntry`: one immutable record (action, entity, actor snapshot,
//!   field changes, timestamp).
//! - `diff`: field-level comparison of two JSON snapshots, skipping
//!   system-managed fields. `Trackable` + `ChangeSet` give the typed
//!   equivalent for known entity types.
//! - `AuditStore`: injected backing store. `RingBufferStore` is bounded
//!   (optionally mirrored to JSON); `TableStore` is an unbounded CSV table.
//! - `ChangeRecorder`: records and lists entries without ever failing the
//!   operation being audited.
//!
//! # Example
//!
//! ```rust,ignore
//! use addonhub::audit::ChangeRecorder;
//!
//! let recorder = ChangeRecorder::open(&paths, &settings.audit);
//! recorder.record_update(actor.snapshot(), &before, &after);
//! for entry in recorder.list(50) {
//!     println!("{}", entry.format_human_readable());
//! }
//! ```

mod diff;
mod entry;
mod recorder;
mod store;
mod table;
mod trackable;

pub use diff::{diff, format_value, is_excluded, summarize, values_equal, ChangeSet, EXCLUDED_FIELDS};
pub use entry::{ActorSnapshot, AuditAction, AuditEntry, EntityType, FieldChange};
pub use recorder::ChangeRecorder;
pub use store::{AuditStore, RingBufferStore};
pub use table::{AuditRow, TableStore};
pub use trackable::Trackable;
