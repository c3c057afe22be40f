//! API request/response models for the shared live location.

use crate::db::models::live_location::{LiveLocation, LocationUpdateDBRequest};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Longest accepted contact phone number, in characters
pub const MAX_PHONE_CHARS: usize = 20;

/// Public view of the live location. Missing text fields are returned as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiveLocationResponse {
    pub is_active: bool,
    pub description: String,
    pub map_url: String,
    pub phone: String,
    pub note: String,
    /// When the location was last shared; null if it never was
    pub timestamp: Option<DateTime<Utc>>,
    pub last_updated_by: String,
}

impl From<LiveLocation> for LiveLocationResponse {
    fn from(location: LiveLocation) -> Self {
        Self {
            is_active: location.is_active,
            description: location.description.unwrap_or_default(),
            map_url: location.map_url.unwrap_or_default(),
            phone: location.phone.unwrap_or_default(),
            note: location.note.unwrap_or_default(),
            timestamp: location.timestamp,
            last_updated_by: location.last_updated_by.unwrap_or_default(),
        }
    }
}

/// Request body for sharing (or hiding) the live location.
///
/// Every field is written: omitted text fields clear the stored value.
#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareLocationRequest {
    /// Admin key
    pub admin_key: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[schema(example = "Main hall, building B")]
    pub description: Option<String>,
    #[schema(example = "https://maps.google.com/?q=10.7769,106.7009")]
    pub map_url: Option<String>,
    #[schema(example = "0901234567")]
    pub phone: Option<String>,
    pub note: Option<String>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ShareLocationRequest {
    /// Trim fields, drop empty ones, and check phone and map URL
    pub fn into_db_request(self) -> Result<LocationUpdateDBRequest> {
        let phone = normalize(self.phone);
        if phone.as_ref().is_some_and(|p| p.chars().count() > MAX_PHONE_CHARS) {
            return Err(Error::bad_request(format!("Phone must be at most {MAX_PHONE_CHARS} characters")));
        }

        let map_url = normalize(self.map_url);
        if let Some(raw) = &map_url {
            match url::Url::parse(raw) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                _ => return Err(Error::bad_request("Map URL must be an absolute http or https URL")),
            }
        }

        Ok(LocationUpdateDBRequest {
            is_active: self.is_active,
            description: normalize(self.description),
            map_url,
            phone,
            note: normalize(self.note),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_fills_empty_strings() {
        let response = LiveLocationResponse::from(LiveLocation::default());
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isActive": false,
                "description": "",
                "mapUrl": "",
                "phone": "",
                "note": "",
                "timestamp": null,
                "lastUpdatedBy": ""
            })
        );
    }

    #[test]
    fn test_request_is_camel_case_with_defaults() {
        let request: ShareLocationRequest = serde_json::from_str(r#"{"adminKey": "k", "mapUrl": " https://maps.example.com/x "}"#).unwrap();
        assert_eq!(request.admin_key.as_deref(), Some("k"));
        assert!(!request.is_active);

        let update = request.into_db_request().unwrap();
        assert_eq!(update.map_url.as_deref(), Some("https://maps.example.com/x"));
        assert_eq!(update.description, None);
    }

    #[test]
    fn test_blank_fields_become_none() {
        let update = ShareLocationRequest {
            is_active: true,
            description: Some("   ".into()),
            note: Some("".into()),
            ..Default::default()
        }
        .into_db_request()
        .unwrap();
        assert!(update.is_active);
        assert_eq!(update.description, None);
        assert_eq!(update.note, None);
    }

    #[test]
    fn test_map_url_must_be_http() {
        for bad in ["maps.example.com", "javascript:alert(1)", "ftp://example.com/x", "/relative"] {
            let request = ShareLocationRequest {
                map_url: Some(bad.into()),
                ..Default::default()
            };
            assert!(request.into_db_request().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_phone_length_limit() {
        let ok = ShareLocationRequest {
            phone: Some("+84 90 123 4567".into()),
            ..Default::default()
        };
        assert!(ok.into_db_request().is_ok());

        let too_long = ShareLocationRequest {
            phone: Some("1".repeat(MAX_PHONE_CHARS + 1)),
            ..Default::default()
        };
        assert!(too_long.into_db_request().is_err());
    }
}
