//! Invitation configuration
//!
//! Settings are injected into `InviteManager` at construction rather than
//! read from global state, so components stay testable in isolation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for invite creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InviteConfig {
    /// Compare and store emails case-sensitively.
    ///
    /// When false (the default), emails are lower-cased before storage and
    /// every membership comparison.
    pub case_sensitive_email: bool,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            case_sensitive_email: false,
        }
    }
}

impl InviteConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Normalize an email for storage and comparison
    ///
    /// Always trims surrounding whitespace; lower-cases unless configured
    /// case-sensitive.
    pub fn normalize_email(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if self.case_sensitive_email {
            trimmed.to_string()
        } else {
            trimmed.to_lowercase()
        }
    }

    /// Compare a stored email against a normalized one under the configured mode
    pub fn emails_match(&self, stored: &str, normalized: &str) -> bool {
        if self.case_sensitive_email {
            stored == normalized
        } else {
            stored.to_lowercase() == normalized
        }
    }
}
