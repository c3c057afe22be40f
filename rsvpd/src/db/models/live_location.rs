//! Database models for the shared live location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Singleton location record. Inactive with no details until an admin shares it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveLocation {
    pub is_active: bool,
    pub description: Option<String>,
    pub map_url: Option<String>,
    pub phone: Option<String>,
    pub note: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub last_updated_by: Option<String>,
}

/// Full replacement for the mutable location fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationUpdateDBRequest {
    pub is_active: bool,
    pub description: Option<String>,
    pub map_url: Option<String>,
    pub phone: Option<String>,
    pub note: Option<String>,
}
