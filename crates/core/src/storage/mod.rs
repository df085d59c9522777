//! SQLite storage layer for the invitation core

mod invites;
mod migrations;
mod organizations;
mod parse;
mod teams;
mod traits;
mod users;

use std::path::Path;

use rusqlite::Connection;
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Invite, InvitableType, InviteTarget, Organization, User};

pub use invites::InviteStore;
pub use organizations::OrganizationStore;
pub use teams::TeamStore;
pub use traits::{InvitableDirectory, InviteRepository, Storage, UserDirectory};
pub use users::UserStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get user store
    pub fn users(&self) -> UserStore<'_> {
        UserStore::new(&self.conn)
    }

    /// Get organization store
    pub fn organizations(&self) -> OrganizationStore<'_> {
        OrganizationStore::new(&self.conn)
    }

    /// Get team store
    pub fn teams(&self) -> TeamStore<'_> {
        TeamStore::new(&self.conn)
    }

    /// Get invite store
    pub fn invites(&self) -> InviteStore<'_> {
        InviteStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl UserDirectory for Database {
    fn create_user(&self, user: &User) -> Result<()> {
        self.users().create(user)
    }

    fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.users().find_by_id(id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users().find_by_email(email)
    }
}

impl InvitableDirectory for Database {
    fn invitable_exists(&self, target: &InviteTarget) -> Result<bool> {
        match target.kind {
            InvitableType::Team => Ok(self.teams().find_by_id(target.id)?.is_some()),
        }
    }

    fn invitable_members(&self, target: &InviteTarget) -> Result<Vec<User>> {
        match target.kind {
            InvitableType::Team => self.teams().members(target.id),
        }
    }

    fn invitable_organization(&self, target: &InviteTarget) -> Result<Option<Organization>> {
        match target.kind {
            InvitableType::Team => self.teams().organization(target.id),
        }
    }

    fn organization_members(&self, organization_id: Uuid) -> Result<Vec<User>> {
        self.organizations().members(organization_id)
    }
}

impl InviteRepository for Database {
    fn create_invite(&self, invite: &Invite) -> Result<()> {
        self.invites().create(invite)
    }

    fn find_invite_by_id(&self, id: Uuid) -> Result<Option<Invite>> {
        self.invites().find_by_id(id)
    }

    fn find_invite_by_token(&self, token: &str) -> Result<Option<Invite>> {
        self.invites().find_by_token(token)
    }

    fn list_invites_for_target(&self, target: &InviteTarget) -> Result<Vec<Invite>> {
        self.invites().list_for_target(target)
    }

    fn delete_invite(&self, invite_id: Uuid) -> Result<()> {
        self.invites().delete(invite_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{Invitable, Team};

    fn seeded_db() -> (Database, User, Team) {
        let db = Database::open_in_memory().unwrap();
        let user = User::new("member@example.com".to_string());
        db.users().create(&user).unwrap();
        let team = Team::new("Platform".to_string());
        db.teams().create(&team).unwrap();
        (db, user, team)
    }

    fn make_invite(sender_id: Uuid, target: InviteTarget) -> Invite {
        let now = Utc::now();
        Invite {
            id: Uuid::new_v4(),
            email: "invitee@example.com".to_string(),
            token: crate::token::generate(),
            sender_id,
            recipient_id: None,
            invitable_id: target.id,
            invitable_type: target.kind,
            role: Some("member".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invites.db");

        let db = Database::open(&path).unwrap();
        assert!(db.schema_version() > 0);
        drop(db);

        // Re-open picks up the existing schema
        let db = Database::open(&path).unwrap();
        assert!(db.schema_version() > 0);
    }

    #[test]
    fn test_invite_round_trip_by_token_and_id() {
        let (db, user, team) = seeded_db();
        let invite = make_invite(user.id, team.invite_target());
        db.invites().create(&invite).unwrap();

        let by_token = db.invites().find_by_token(&invite.token).unwrap().unwrap();
        assert_eq!(by_token.id, invite.id);
        assert_eq!(by_token.email, invite.email);
        assert_eq!(by_token.invitable_type, InvitableType::Team);
        assert_eq!(by_token.role.as_deref(), Some("member"));

        let by_id = db.invites().find_by_id(invite.id).unwrap().unwrap();
        assert_eq!(by_id.token, invite.token);

        assert!(db.invites().find_by_token("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_and_delete_invites() {
        let (db, user, team) = seeded_db();
        let target = team.invite_target();

        let first = make_invite(user.id, target);
        let second = make_invite(user.id, target);
        db.invites().create(&first).unwrap();
        db.invites().create(&second).unwrap();

        let listed = db.invites().list_for_target(&target).unwrap();
        assert_eq!(listed.len(), 2);

        db.invites().delete(first.id).unwrap();
        let listed = db.invites().list_for_target(&target).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, second.id);
    }

    #[test]
    fn test_user_directory_lookups_are_exact() {
        let (db, user, _) = seeded_db();

        let found = db.users().find_by_email("member@example.com").unwrap();
        assert_eq!(found.unwrap().id, user.id);

        // The directory does no case folding; normalization happens upstream
        assert!(db.users().find_by_email("MEMBER@example.com").unwrap().is_none());
        assert!(db.users().find_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_invitable_dispatch_for_team() {
        let (db, user, team) = seeded_db();
        let target = team.invite_target();

        assert!(db.invitable_exists(&target).unwrap());
        assert!(db.invitable_members(&target).unwrap().is_empty());
        assert!(db.invitable_organization(&target).unwrap().is_none());

        db.teams().add_member(team.id, user.id).unwrap();
        let members = db.invitable_members(&target).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].email, user.email);

        let missing = InviteTarget::new(Uuid::new_v4(), InvitableType::Team);
        assert!(!db.invitable_exists(&missing).unwrap());
    }

    #[test]
    fn test_team_organization_lookup() {
        let db = Database::open_in_memory().unwrap();
        let org = Organization::new("Acme".to_string());
        db.organizations().create(&org).unwrap();

        let team = Team::new("Platform".to_string()).with_organization(org.id);
        db.teams().create(&team).unwrap();

        let found = db.teams().organization(team.id).unwrap().unwrap();
        assert_eq!(found.id, org.id);
        assert_eq!(found.name, "Acme");

        let member = User::new("m@acme.com".to_string());
        db.users().create(&member).unwrap();
        db.organizations().add_member(org.id, member.id).unwrap();
        let members = db.organization_members(org.id).unwrap();
        assert_eq!(members.len(), 1);
    }

    #[test]
    fn test_invite_foreign_keys_enforced() {
        let (db, _, team) = seeded_db();
        // Sender that does not exist in the users table
        let invite = make_invite(Uuid::new_v4(), team.invite_target());

        match db.invites().create(&invite) {
            Err(crate::error::Error::Database(_)) => {}
            other => panic!("expected database error, got {:?}", other),
        }
    }
}
