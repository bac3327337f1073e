//! The user performing an operation
//!
//! Identity comes from the login provider; team membership decides whether
//! the user may edit the catalog.

use serde::{Deserialize, Serialize};

use crate::audit::ActorSnapshot;
use crate::error::{AddonHubError, AddonHubResult};

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: String,
    pub username: String,
    pub avatar: String,
    pub is_addons_team: bool,
}

impl Actor {
    /// Fail unless this user holds the add-ons team role
    pub fn require_team(&self) -> AddonHubResult<()> {
        if self.user_id.is_empty() {
            return Err(AddonHubError::NotAuthorized(
                "no acting user configured (pass --user-id)".into(),
            ));
        }
        if !self.is_addons_team {
            return Err(AddonHubError::NotAuthorized(format!(
                "{} is not a member of the add-ons team",
                self.username
            )));
        }
        Ok(())
    }

    /// Denormalized copy stored on audit entries
    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            user_avatar: self.avatar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(team: bool) -> Actor {
        Actor {
            user_id: "1001".into(),
            username: "alice".into(),
            avatar: "a1b2".into(),
            is_addons_team: team,
        }
    }

    #[test]
    fn test_require_team() {
        assert!(actor(true).require_team().is_ok());
        assert!(actor(false).require_team().unwrap_err().is_not_authorized());
    }

    #[test]
    fn test_anonymous_is_rejected() {
        let mut anonymous = actor(true);
        anonymous.user_id.clear();
        assert!(anonymous.require_team().is_err());
    }

    #[test]
    fn test_snapshot() {
        let snap = actor(true).snapshot();
        assert_eq!(snap.user_id, "1001");
        assert_eq!(snap.username, "alice");
        assert_eq!(snap.user_avatar, "a1b2");
    }
}
