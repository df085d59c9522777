//! Data models for the invitation core

mod invite;
mod organization;
mod team;
mod user;

pub use invite::*;
pub use organization::*;
pub use team::*;
pub use user::*;
