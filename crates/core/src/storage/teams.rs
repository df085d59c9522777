//! Team storage operations

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid, parse_uuid_opt, OptionalExt};
use crate::error::Result;
use crate::models::{Organization, Team, User};

pub struct TeamStore<'a> {
    conn: &'a Connection,
}

impl<'a> TeamStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new team
    #[instrument(skip(self, team), fields(name = %team.name))]
    pub fn create(&self, team: &Team) -> Result<()> {
        self.conn.execute(
            "INSERT INTO teams (id, name, organization_id, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                team.id.to_string(),
                team.name,
                team.organization_id.map(|id| id.to_string()),
                team.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find team by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Team>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, organization_id, created_at FROM teams WHERE id = ?1")?;

        let team = stmt
            .query_row(params![id.to_string()], |row| {
                Ok(Team {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    name: row.get(1)?,
                    organization_id: parse_uuid_opt(row.get::<_, Option<String>>(2)?)?,
                    created_at: parse_datetime(&row.get::<_, String>(3)?)?,
                })
            })
            .optional()?;

        Ok(team)
    }

    /// Add a member to a team
    pub fn add_member(&self, team_id: Uuid, user_id: Uuid) -> Result<()> {
        self.conn.execute(
            "INSERT INTO team_members (team_id, user_id, joined_at) VALUES (?1, ?2, ?3)",
            params![
                team_id.to_string(),
                user_id.to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List members of a team
    #[instrument(skip(self))]
    pub fn members(&self, team_id: Uuid) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT u.id, u.email, u.created_at
             FROM users u
             JOIN team_members m ON m.user_id = u.id
             WHERE m.team_id = ?1
             ORDER BY u.email",
        )?;

        let members = stmt
            .query_map(params![team_id.to_string()], |row| {
                Ok(User {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    email: row.get(1)?,
                    created_at: parse_datetime(&row.get::<_, String>(2)?)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(members)
    }

    /// Parent organization of a team, if any
    #[instrument(skip(self))]
    pub fn organization(&self, team_id: Uuid) -> Result<Option<Organization>> {
        let mut stmt = self.conn.prepare(
            "SELECT o.id, o.name, o.created_at
             FROM organizations o
             JOIN teams t ON t.organization_id = o.id
             WHERE t.id = ?1",
        )?;

        let organization = stmt
            .query_row(params![team_id.to_string()], |row| {
                Ok(Organization {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    name: row.get(1)?,
                    created_at: parse_datetime(&row.get::<_, String>(2)?)?,
                })
            })
            .optional()?;

        Ok(organization)
    }
}
