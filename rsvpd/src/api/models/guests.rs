//! API request/response models for RSVPs and the guestbook.

use crate::api::models::stats::StatsResponse;
use crate::db::models::guests::{GuestCreateDBRequest, GuestEntry, GuestStatus};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Request body for submitting an RSVP.
///
/// Fields are optional at the type level so a missing field is reported as a validation error
/// rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RsvpCreate {
    /// Guest's name
    #[schema(example = "An")]
    pub name: Option<String>,
    /// Message for the guestbook
    #[schema(example = "Chúc mừng!")]
    pub message: Option<String>,
    /// `confirmed` (default) or `declined`
    #[schema(example = "confirmed")]
    pub status: Option<String>,
}

impl RsvpCreate {
    /// Validate and normalize into a storage request tagged with the caller's address
    pub fn into_db_request(self, ip: String) -> Result<GuestCreateDBRequest> {
        let (Some(name), Some(message)) = (self.name, self.message) else {
            return Err(Error::bad_request("Name and message are required"));
        };

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => GuestStatus::default(),
            Some(raw) => raw.parse::<GuestStatus>().map_err(|e| Error::bad_request(e.to_string()))?,
        };

        Ok(GuestCreateDBRequest::new(&name, &message, status, Some(ip))?)
    }
}

/// The public part of a newly created entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RsvpGuest {
    pub id: i64,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

/// Response to a successful RSVP
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RsvpResponse {
    pub success: bool,
    #[schema(example = "RSVP saved successfully!")]
    pub message: String,
    pub guest: RsvpGuest,
}

impl From<GuestEntry> for RsvpResponse {
    fn from(guest: GuestEntry) -> Self {
        Self {
            success: true,
            message: "RSVP saved successfully!".to_string(),
            guest: RsvpGuest {
                id: guest.id,
                name: guest.name,
                timestamp: guest.timestamp,
            },
        }
    }
}

/// Public guestbook summary. Carries counts only, never names or messages.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestSummaryResponse {
    /// Number of guestbook entries
    pub total_guests: i64,
    pub stats: StatsResponse,
    /// Entries submitted within the configured recent window
    pub recent_count: i64,
}

/// Query parameters for the admin views
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminQuery {
    /// Admin password
    pub password: Option<String>,
    /// Send the export as a file attachment (`true` or `false`)
    #[param(value_type = Option<bool>)]
    pub download: Option<String>,
}

impl AdminQuery {
    /// Interpret `download`. Only read once the password has been accepted.
    pub fn wants_download(&self) -> std::result::Result<bool, String> {
        match self.download.as_deref().map(str::trim) {
            None | Some("") | Some("false") | Some("0") => Ok(false),
            Some("true") | Some("1") => Ok(true),
            Some(other) => Err(format!("download must be true or false, got '{other}'")),
        }
    }
}

/// A complete guestbook entry, as shown to admins
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuestResponse {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub status: GuestStatus,
    pub ip: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<GuestEntry> for GuestResponse {
    fn from(guest: GuestEntry) -> Self {
        Self {
            id: guest.id,
            name: guest.name,
            message: guest.message,
            status: guest.status,
            ip: guest.ip,
            timestamp: guest.timestamp,
        }
    }
}

/// Full guestbook dump for admins
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuestbookExport {
    pub guests: Vec<GuestResponse>,
    pub stats: StatsResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_flag() {
        let query = |download: Option<&str>| AdminQuery {
            password: None,
            download: download.map(String::from),
        };
        assert_eq!(query(None).wants_download(), Ok(false));
        assert_eq!(query(Some("false")).wants_download(), Ok(false));
        assert_eq!(query(Some("true")).wants_download(), Ok(true));
        assert_eq!(query(Some("1")).wants_download(), Ok(true));
        assert!(query(Some("yes")).wants_download().is_err());
    }

    fn rsvp(name: Option<&str>, message: Option<&str>, status: Option<&str>) -> RsvpCreate {
        RsvpCreate {
            name: name.map(String::from),
            message: message.map(String::from),
            status: status.map(String::from),
        }
    }

    #[test]
    fn test_status_defaults_to_confirmed() {
        for status in [None, Some(""), Some("  ")] {
            let request = rsvp(Some("An"), Some("Hi"), status).into_db_request("10.0.0.1".into()).unwrap();
            assert_eq!(request.status, GuestStatus::Confirmed);
        }
    }

    #[test]
    fn test_declined_status_is_kept() {
        let request = rsvp(Some("An"), Some("Hi"), Some("declined")).into_db_request("10.0.0.1".into()).unwrap();
        assert_eq!(request.status, GuestStatus::Declined);
        assert_eq!(request.ip.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_missing_fields_are_bad_requests() {
        for request in [rsvp(None, Some("Hi"), None), rsvp(Some("An"), None, None), rsvp(Some(" "), Some("Hi"), None)] {
            let err = request.into_db_request("10.0.0.1".into()).unwrap_err();
            assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_unknown_status_is_a_bad_request() {
        let err = rsvp(Some("An"), Some("Hi"), Some("maybe")).into_db_request("10.0.0.1".into()).unwrap_err();
        assert!(matches!(err, Error::BadRequest { .. }));
        assert!(err.user_message().contains("maybe"));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = GuestSummaryResponse {
            total_guests: 3,
            stats: StatsResponse { confirmed: 2, declined: 1 },
            recent_count: 1,
        };
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            serde_json::json!({"totalGuests": 3, "stats": {"confirmed": 2, "declined": 1}, "recentCount": 1})
        );
    }
}
