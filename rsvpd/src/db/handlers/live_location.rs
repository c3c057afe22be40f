//! Database repository for the shared live location.

use crate::db::{
    errors::Result,
    models::live_location::{LiveLocation, LocationUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct LiveLocations<'c> {
    db: &'c mut PgConnection,
}

impl<'c> LiveLocations<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert the inactive location row if it is missing
    #[instrument(skip(self), err)]
    pub async fn seed(&mut self) -> Result<()> {
        sqlx::query("INSERT INTO live_location (id, is_active) VALUES (1, FALSE) ON CONFLICT (id) DO NOTHING")
            .execute(&mut *self.db)
            .await?;
        Ok(())
    }

    /// Current location, inactive and empty if the row has not been seeded
    #[instrument(skip(self), err)]
    pub async fn get(&mut self) -> Result<LiveLocation> {
        let location = sqlx::query_as::<_, LiveLocation>(
            r#"
            SELECT is_active, description, map_url, phone, note, timestamp, last_updated_by
            FROM live_location
            WHERE id = 1
            "#,
        )
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(location.unwrap_or_default())
    }

    /// Replace every mutable field and stamp the update. The timestamp never moves backwards.
    #[instrument(skip(self, request), fields(is_active = request.is_active), err)]
    pub async fn set(&mut self, request: &LocationUpdateDBRequest, updated_by: &str) -> Result<LiveLocation> {
        let location = sqlx::query_as::<_, LiveLocation>(
            r#"
            INSERT INTO live_location (id, is_active, description, map_url, phone, note, timestamp, last_updated_by)
            VALUES (1, $1, $2, $3, $4, $5, NOW(), $6)
            ON CONFLICT (id) DO UPDATE
            SET is_active = EXCLUDED.is_active,
                description = EXCLUDED.description,
                map_url = EXCLUDED.map_url,
                phone = EXCLUDED.phone,
                note = EXCLUDED.note,
                timestamp = GREATEST(EXCLUDED.timestamp, live_location.timestamp),
                last_updated_by = EXCLUDED.last_updated_by
            RETURNING is_active, description, map_url, phone, note, timestamp, last_updated_by
            "#,
        )
        .bind(request.is_active)
        .bind(request.description.as_deref())
        .bind(request.map_url.as_deref())
        .bind(request.phone.as_deref())
        .bind(request.note.as_deref())
        .bind(updated_by)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(location)
    }
}
