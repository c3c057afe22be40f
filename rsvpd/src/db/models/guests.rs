//! Database models for guestbook entries.

use crate::db::errors::{DbError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Longest accepted guest name, in characters
pub const MAX_NAME_CHARS: usize = 255;
/// Longest accepted guestbook message, in characters
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Attendance response attached to a guestbook entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    #[default]
    Confirmed,
    Declined,
}

impl GuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestStatus::Confirmed => "confirmed",
            GuestStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown guest status '{0}', expected 'confirmed' or 'declined'")]
pub struct UnknownStatus(pub String);

impl FromStr for GuestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(GuestStatus::Confirmed),
            "declined" => Ok(GuestStatus::Declined),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for GuestStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// A stored guestbook entry. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GuestEntry {
    pub id: i64,
    pub name: String,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub status: GuestStatus,
    pub ip: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Request to create a new guestbook entry
#[derive(Debug, Clone, PartialEq)]
pub struct GuestCreateDBRequest {
    pub name: String,
    pub message: String,
    pub status: GuestStatus,
    pub ip: Option<String>,
}

impl GuestCreateDBRequest {
    /// Build a request from raw input, trimming `name` and `message`.
    pub fn new(name: &str, message: &str, status: GuestStatus, ip: Option<String>) -> Result<Self> {
        let request = Self {
            name: name.trim().to_string(),
            message: message.trim().to_string(),
            status,
            ip,
        };
        request.validate()?;
        Ok(request)
    }

    /// Stores call this before writing; the fields are public so it cannot be enforced by `new` alone.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Err(DbError::invalid("Name and message are required"));
        }
        if self.name.chars().count() > MAX_NAME_CHARS {
            return Err(DbError::invalid(format!("Name must be at most {MAX_NAME_CHARS} characters")));
        }
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(DbError::invalid(format!(
                "Message must be at most {MAX_MESSAGE_CHARS} characters"
            )));
        }
        Ok(())
    }
}

/// Entry counts used by the public guest summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct GuestSummary {
    pub total: i64,
    pub recent: i64,
}
