//! Invite model
//!
//! An invitation tracks the sender and recipient, and what the recipient is
//! invited to. Each invite carries a unique token; the registration flow
//! exchanges the token for recipient signup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type tag for invitable entities
///
/// Stored alongside the invitable id so the invite can reference any entity
/// kind that accepts invitations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvitableType {
    Team,
}

impl InvitableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitableType::Team => "Team",
        }
    }

    /// Parse a stored type tag
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "Team" => Some(InvitableType::Team),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvitableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tagged reference to the entity an invite targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteTarget {
    pub id: Uuid,
    pub kind: InvitableType,
}

impl InviteTarget {
    pub fn new(id: Uuid, kind: InvitableType) -> Self {
        Self { id, kind }
    }
}

/// An entity type that can be the target of an invitation
pub trait Invitable {
    fn invite_target(&self) -> InviteTarget;
}

/// An invitation of an email address to join an invitable entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub sender_id: Uuid,
    /// Set iff a user with matching email existed at creation time
    pub recipient_id: Option<Uuid>,
    pub invitable_id: Uuid,
    pub invitable_type: InvitableType,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invite {
    /// The invited-to entity as a tagged reference
    pub fn target(&self) -> InviteTarget {
        InviteTarget::new(self.invitable_id, self.invitable_type)
    }

    /// Did the email match an existing user when the invite was created?
    pub fn existing_user(&self) -> bool {
        self.recipient_id.is_some()
    }
}
