//! Invitation Core Library
//!
//! Models, validation pipeline, and storage for invitations: who sent an
//! invite, what entity it invites the recipient to join, and the token the
//! registration flow exchanges for signup.

pub mod config;
pub mod error;
pub mod invariants;
pub mod manager;
pub mod models;
pub mod storage;
pub mod token;

pub use config::InviteConfig;
pub use error::{Error, Result, ValidationError, ValidationErrors};
pub use manager::{InviteManager, NewInvite};
pub use models::*;
pub use storage::{
    Database, InvitableDirectory, InviteRepository, InviteStore, OrganizationStore, Storage,
    TeamStore, UserDirectory, UserStore,
};
