//! Entities whose edits are audited

use super::entry::{EntityType, FieldChange};

/// An entity with an explicit list of audited fields.
///
/// Implementors compare each tracked field with its own type (see
/// [`ChangeSet`](super::ChangeSet)); fields left out of the list, such as
/// ids, timestamps and counters, never show up in an audit entry.
pub trait Trackable {
    /// Tag written to audit entries
    const ENTITY_TYPE: EntityType;

    fn entity_id(&self) -> String;

    /// Display name snapshot stored with the entry
    fn entity_name(&self) -> String;

    /// Tracked fields that differ from `before`, in declaration order
    fn changes_since(&self, before: &Self) -> Vec<FieldChange>;
}
