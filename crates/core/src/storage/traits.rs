//! Storage repository traits
//!
//! These traits define the storage interface, allowing for different
//! implementations (SQLite, mock, future network backend). They are also
//! the seams the invite pipeline consumes: a user directory, an invitable
//! capability interface, and the invite table itself.

use uuid::Uuid;

use crate::error::Result;
use crate::models::{Invite, InviteTarget, Organization, User};

/// Lookup capability over account records
pub trait UserDirectory {
    /// Create a user
    fn create_user(&self, user: &User) -> Result<()>;

    /// Find a user by id
    fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Find a user by exact email
    ///
    /// Callers pass the normalized email; the lookup itself is exact.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Capability interface over invitable entities
///
/// Dispatched on the type tag carried by `InviteTarget`, so new invitable
/// kinds only extend the implementation, not the pipeline.
pub trait InvitableDirectory {
    /// Does the referenced entity exist?
    fn invitable_exists(&self, target: &InviteTarget) -> Result<bool>;

    /// Current members of the invitable
    fn invitable_members(&self, target: &InviteTarget) -> Result<Vec<User>>;

    /// Parent organization of the invitable, if it is the restricted kind
    fn invitable_organization(&self, target: &InviteTarget) -> Result<Option<Organization>>;

    /// Members of an organization
    fn organization_members(&self, organization_id: Uuid) -> Result<Vec<User>>;
}

/// Invite repository operations
pub trait InviteRepository {
    /// Persist a new invite
    fn create_invite(&self, invite: &Invite) -> Result<()>;

    /// Find an invite by id
    fn find_invite_by_id(&self, id: Uuid) -> Result<Option<Invite>>;

    /// Find an invite by token
    fn find_invite_by_token(&self, token: &str) -> Result<Option<Invite>>;

    /// List invites for an invitable
    fn list_invites_for_target(&self, target: &InviteTarget) -> Result<Vec<Invite>>;

    /// Delete an invite
    fn delete_invite(&self, invite_id: Uuid) -> Result<()>;
}

/// Combined storage interface
///
/// Provides access to all repository operations.
/// Implementations may be backed by SQLite, mocks, or network.
pub trait Storage: UserDirectory + InvitableDirectory + InviteRepository {}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where T: UserDirectory + InvitableDirectory + InviteRepository {}
