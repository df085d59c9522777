//! Invite storage operations

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_invitable_type, parse_uuid, parse_uuid_opt, OptionalExt};
use crate::error::Result;
use crate::invariants::assert_invite_invariants;
use crate::models::{Invite, InviteTarget};

pub struct InviteStore<'a> {
    conn: &'a Connection,
}

const SELECT_COLUMNS: &str = "id, email, token, sender_id, recipient_id, \
     invitable_id, invitable_type, role, created_at, updated_at";

fn invite_from_row(row: &Row<'_>) -> std::result::Result<Invite, rusqlite::Error> {
    Ok(Invite {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        email: row.get(1)?,
        token: row.get(2)?,
        sender_id: parse_uuid(&row.get::<_, String>(3)?)?,
        recipient_id: parse_uuid_opt(row.get::<_, Option<String>>(4)?)?,
        invitable_id: parse_uuid(&row.get::<_, String>(5)?)?,
        invitable_type: parse_invitable_type(&row.get::<_, String>(6)?)?,
        role: row.get(7)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?)?,
        updated_at: parse_datetime(&row.get::<_, String>(9)?)?,
    })
}

impl<'a> InviteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persist a new invite
    #[instrument(skip(self, invite), fields(email = %invite.email, invitable = %invite.invitable_type))]
    pub fn create(&self, invite: &Invite) -> Result<()> {
        assert_invite_invariants(invite);

        self.conn.execute(
            "INSERT INTO invites (id, email, token, sender_id, recipient_id,
                 invitable_id, invitable_type, role, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                invite.id.to_string(),
                invite.email,
                invite.token,
                invite.sender_id.to_string(),
                invite.recipient_id.map(|id| id.to_string()),
                invite.invitable_id.to_string(),
                invite.invitable_type.as_str(),
                invite.role,
                invite.created_at.to_rfc3339(),
                invite.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find invite by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Invite>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SELECT_COLUMNS} FROM invites WHERE id = ?1"))?;

        let invite = stmt
            .query_row(params![id.to_string()], invite_from_row)
            .optional()?;

        Ok(invite)
    }

    /// Find invite by token
    #[instrument(skip(self, token))]
    pub fn find_by_token(&self, token: &str) -> Result<Option<Invite>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM invites WHERE token = ?1"
        ))?;

        let invite = stmt.query_row(params![token], invite_from_row).optional()?;

        Ok(invite)
    }

    /// List invites for an invitable
    #[instrument(skip(self))]
    pub fn list_for_target(&self, target: &InviteTarget) -> Result<Vec<Invite>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM invites
             WHERE invitable_id = ?1 AND invitable_type = ?2
             ORDER BY created_at DESC"
        ))?;

        let invites = stmt
            .query_map(
                params![target.id.to_string(), target.kind.as_str()],
                invite_from_row,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(invites)
    }

    /// Delete an invite
    pub fn delete(&self, invite_id: Uuid) -> Result<()> {
        self.conn.execute(
            "DELETE FROM invites WHERE id = ?1",
            params![invite_id.to_string()],
        )?;
        Ok(())
    }
}
