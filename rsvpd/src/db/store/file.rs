//! JSON-document-backed [`Store`].
//!
//! The whole guestbook lives in one file:
//!
//! ```json
//! {
//!   "guests": [{ "id": 1, "name": "An", "message": "...", "status": "confirmed", "ip": "...", "timestamp": "..." }],
//!   "stats": { "confirmed": 1, "declined": 0 },
//!   "liveLocation": { "isActive": false, ... }
//! }
//! ```
//!
//! Every operation holds one async mutex for its read-modify-write cycle, so a single process never
//! interleaves writes. Saves go to a sibling temp file that is then renamed over the original.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use super::Store;
use crate::db::{
    errors::Result,
    models::{
        guests::{GuestCreateDBRequest, GuestEntry, GuestStatus, GuestSummary},
        live_location::{LiveLocation, LocationUpdateDBRequest},
        stats::Stats,
    },
};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Document {
    guests: Vec<GuestEntry>,
    stats: Stats,
    live_location: LiveLocation,
}

impl Document {
    fn next_id(&self) -> i64 {
        self.guests.iter().map(|g| g.id).max().unwrap_or(0) + 1
    }

    fn append(&mut self, request: &GuestCreateDBRequest) -> Result<GuestEntry> {
        request.validate()?;
        let guest = GuestEntry {
            id: self.next_id(),
            name: request.name.clone(),
            message: request.message.clone(),
            status: request.status,
            ip: request.ip.clone(),
            timestamp: Utc::now(),
        };
        self.guests.push(guest.clone());
        Ok(guest)
    }
}

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Document::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, document: &Document) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Run `f` against the document under the lock and persist the result
    async fn update<T: Send>(&self, f: impl FnOnce(&mut Document) -> Result<T> + Send) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let out = f(&mut document)?;
        self.save(&document).await?;
        Ok(out)
    }

    async fn read(&self) -> Result<Document> {
        let _guard = self.lock.lock().await;
        self.load().await
    }
}

#[async_trait]
impl Store for JsonFileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    #[instrument(skip(self), fields(path = %self.path.display()), err)]
    async fn ensure_schema(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Round-trip the document: fails on a corrupt file, fills in missing sections otherwise
        self.update(|_| Ok(())).await?;
        debug!("Guestbook file ready");
        Ok(())
    }

    async fn list_guests(&self) -> Result<Vec<GuestEntry>> {
        let mut guests = self.read().await?.guests;
        guests.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(guests)
    }

    async fn insert_guest(&self, request: &GuestCreateDBRequest) -> Result<GuestEntry> {
        self.update(|doc| doc.append(request)).await
    }

    async fn increment_stat(&self, status: GuestStatus) -> Result<Stats> {
        self.update(|doc| {
            doc.stats.record(status);
            Ok(doc.stats)
        })
        .await
    }

    #[instrument(skip(self, request), fields(status = %request.status), err)]
    async fn record_rsvp(&self, request: &GuestCreateDBRequest) -> Result<GuestEntry> {
        self.update(|doc| {
            let guest = doc.append(request)?;
            doc.stats.record(guest.status);
            Ok(guest)
        })
        .await
    }

    async fn guest_summary(&self, since: DateTime<Utc>) -> Result<GuestSummary> {
        let document = self.read().await?;
        Ok(GuestSummary {
            total: document.guests.len() as i64,
            recent: document.guests.iter().filter(|g| g.timestamp >= since).count() as i64,
        })
    }

    async fn get_stats(&self) -> Result<Stats> {
        Ok(self.read().await?.stats)
    }

    async fn get_location(&self) -> Result<LiveLocation> {
        Ok(self.read().await?.live_location)
    }

    async fn set_location(&self, request: &LocationUpdateDBRequest, updated_by: &str) -> Result<LiveLocation> {
        let request = request.clone();
        let updated_by = updated_by.to_string();
        self.update(move |doc| {
            let now = Utc::now();
            let timestamp = doc.live_location.timestamp.map_or(now, |prev| prev.max(now));
            doc.live_location = LiveLocation {
                is_active: request.is_active,
                description: request.description,
                map_url: request.map_url,
                phone: request.phone,
                note: request.note,
                timestamp: Some(timestamp),
                last_updated_by: Some(updated_by),
            };
            Ok(doc.live_location.clone())
        })
        .await
    }
}
