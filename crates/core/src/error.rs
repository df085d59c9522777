//! Error types for the invitation core

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::models::InvitableType;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Sender id does not resolve to a user in the directory
    #[error("Unknown sender: {0}")]
    UnknownSender(Uuid),

    /// Invitable reference does not resolve to a stored entity
    #[error("Unknown invitable: {kind} {id}")]
    UnknownInvitable { kind: InvitableType, id: Uuid },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A single invite validation rule violation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email can't be blank")]
    MissingEmail,

    #[error("email doesn't correspond to an organization member")]
    NotOrganizationMember,

    #[error("user is already a member")]
    AlreadyMember,
}

/// The complete set of violated rules for one create attempt
///
/// Validation does not short-circuit: the caller gets every violation at
/// once, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, error: ValidationError) -> bool {
        self.0.contains(&error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Consume into an error if any rule was violated
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collect() {
        let mut errors = ValidationErrors::default();
        assert!(errors.is_empty());
        assert!(errors.clone().into_result().is_ok());

        errors.push(ValidationError::MissingEmail);
        errors.push(ValidationError::AlreadyMember);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(ValidationError::MissingEmail));
        assert!(!errors.contains(ValidationError::NotOrganizationMember));

        match errors.into_result() {
            Err(Error::Validation(collected)) => assert_eq!(collected.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = ValidationErrors::default();
        errors.push(ValidationError::MissingEmail);
        errors.push(ValidationError::NotOrganizationMember);
        assert_eq!(
            errors.to_string(),
            "email can't be blank; email doesn't correspond to an organization member"
        );
    }
}
