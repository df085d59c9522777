//! Invite creation pipeline
//!
//! `InviteManager` owns the single transition an invite makes: from a
//! pending request to a persisted row, or failure with nothing written.
//! The steps run in a fixed order: normalize email, generate token,
//! resolve references, resolve recipient, validate, insert.

use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::InviteConfig;
use crate::error::{Error, Result, ValidationError, ValidationErrors};
use crate::invariants::assert_target_valid;
use crate::models::{Invite, InviteTarget};
use crate::storage::Storage;
use crate::token;

/// A request to invite an email address to an invitable entity
#[derive(Debug, Clone)]
pub struct NewInvite {
    pub email: String,
    pub sender_id: Uuid,
    pub target: InviteTarget,
    pub role: Option<String>,
}

impl NewInvite {
    pub fn new(email: impl Into<String>, sender_id: Uuid, target: InviteTarget) -> Self {
        Self {
            email: email.into(),
            sender_id,
            target,
            role: None,
        }
    }

    /// Role the recipient will receive on acceptance
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Validates and persists invites against an injected store and config
pub struct InviteManager<'a, S: Storage> {
    store: &'a S,
    config: InviteConfig,
}

impl<'a, S: Storage> InviteManager<'a, S> {
    pub fn new(store: &'a S, config: InviteConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &InviteConfig {
        &self.config
    }

    /// Create an invite, or fail with the complete set of violated rules
    ///
    /// Either the whole operation succeeds or nothing is written. The
    /// membership pre-checks and the insert are not one transaction; two
    /// racing creates for the same email can both pass the duplicate check.
    /// The unique token constraint is the durable guard.
    #[instrument(skip(self, new_invite), fields(invitable = %new_invite.target.kind))]
    pub fn create(&self, new_invite: NewInvite) -> Result<Invite> {
        assert_target_valid(&new_invite.target, "InviteManager::create");

        // Normalization happens before any comparison or storage
        let email = self.config.normalize_email(&new_invite.email);

        // Token is assigned exactly once, before the row is written. If
        // validation fails it is discarded along with the record.
        let token = token::generate();

        // References must resolve before validation; failures here are
        // referential, not validation errors
        let sender = self
            .store
            .find_user_by_id(new_invite.sender_id)?
            .ok_or(Error::UnknownSender(new_invite.sender_id))?;

        if !self.store.invitable_exists(&new_invite.target)? {
            return Err(Error::UnknownInvitable {
                kind: new_invite.target.kind,
                id: new_invite.target.id,
            });
        }

        // Recipient resolution uses the normalized email
        let recipient = self.store.find_user_by_email(&email)?;

        let mut errors = ValidationErrors::default();

        if email.is_empty() {
            errors.push(ValidationError::MissingEmail);
        }

        // Organization workspaces can only invite organization members
        if let Some(organization) = self.store.invitable_organization(&new_invite.target)? {
            let members = self.store.organization_members(organization.id)?;
            if !members
                .iter()
                .any(|member| self.config.emails_match(&member.email, &email))
            {
                errors.push(ValidationError::NotOrganizationMember);
            }
        }

        // Reject emails already belonging to a member of the invitable
        let members = self.store.invitable_members(&new_invite.target)?;
        if members
            .iter()
            .any(|member| self.config.emails_match(&member.email, &email))
        {
            errors.push(ValidationError::AlreadyMember);
        }

        errors.into_result()?;

        let now = chrono::Utc::now();
        let invite = Invite {
            id: Uuid::new_v4(),
            email,
            token,
            sender_id: sender.id,
            recipient_id: recipient.map(|user| user.id),
            invitable_id: new_invite.target.id,
            invitable_type: new_invite.target.kind,
            role: new_invite.role,
            created_at: now,
            updated_at: now,
        };

        self.store.create_invite(&invite)?;
        info!(invite_id = %invite.id, existing_user = invite.existing_user(), "Invite created");

        Ok(invite)
    }
}
