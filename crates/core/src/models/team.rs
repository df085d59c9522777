//! Team model - the concrete invitable entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Invitable, InvitableType, InviteTarget};

/// A team that users can be invited to join
///
/// A team backed by an organization is the "restricted" invitable kind:
/// only emails of organization members may be invited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    /// Parent organization, if this is an organization workspace
    pub organization_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            organization_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_organization(mut self, organization_id: Uuid) -> Self {
        self.organization_id = Some(organization_id);
        self
    }
}

impl Invitable for Team {
    fn invite_target(&self) -> InviteTarget {
        InviteTarget::new(self.id, InvitableType::Team)
    }
}
