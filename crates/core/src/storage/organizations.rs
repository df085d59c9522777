//! Organization storage operations

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{Organization, User};

pub struct OrganizationStore<'a> {
    conn: &'a Connection,
}

impl<'a> OrganizationStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new organization
    #[instrument(skip(self, organization), fields(name = %organization.name))]
    pub fn create(&self, organization: &Organization) -> Result<()> {
        self.conn.execute(
            "INSERT INTO organizations (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![
                organization.id.to_string(),
                organization.name,
                organization.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find organization by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM organizations WHERE id = ?1")?;

        let organization = stmt
            .query_row(params![id.to_string()], |row| {
                Ok(Organization {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    name: row.get(1)?,
                    created_at: parse_datetime(&row.get::<_, String>(2)?)?,
                })
            })
            .optional()?;

        Ok(organization)
    }

    /// Add a member to an organization
    pub fn add_member(&self, organization_id: Uuid, user_id: Uuid) -> Result<()> {
        self.conn.execute(
            "INSERT INTO organization_members (organization_id, user_id, joined_at)
             VALUES (?1, ?2, ?3)",
            params![
                organization_id.to_string(),
                user_id.to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List members of an organization
    #[instrument(skip(self))]
    pub fn members(&self, organization_id: Uuid) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT u.id, u.email, u.created_at
             FROM users u
             JOIN organization_members m ON m.user_id = u.id
             WHERE m.organization_id = ?1
             ORDER BY u.email",
        )?;

        let members = stmt
            .query_map(params![organization_id.to_string()], |row| {
                Ok(User {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    email: row.get(1)?,
                    created_at: parse_datetime(&row.get::<_, String>(2)?)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(members)
    }
}
