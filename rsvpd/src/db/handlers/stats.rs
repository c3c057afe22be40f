//! Database repository for the attendance counters.

use crate::db::{errors::Result, models::guests::GuestStatus, models::stats::Stats as StatsRecord};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Stats<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Stats<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert the zeroed counter row if it is missing
    #[instrument(skip(self), err)]
    pub async fn seed(&mut self) -> Result<()> {
        sqlx::query("INSERT INTO stats (id, confirmed, declined) VALUES (1, 0, 0) ON CONFLICT (id) DO NOTHING")
            .execute(&mut *self.db)
            .await?;
        Ok(())
    }

    /// Current counters, zero if the row has not been seeded
    #[instrument(skip(self), err)]
    pub async fn get(&mut self) -> Result<StatsRecord> {
        let stats = sqlx::query_as::<_, StatsRecord>("SELECT confirmed, declined FROM stats WHERE id = 1")
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(stats.unwrap_or_default())
    }

    /// Add one to the counter matching `status`, creating the row if needed
    #[instrument(skip(self), err)]
    pub async fn increment(&mut self, status: GuestStatus) -> Result<StatsRecord> {
        let delta = StatsRecord::delta(status);
        let stats = sqlx::query_as::<_, StatsRecord>(
            r#"
            INSERT INTO stats (id, confirmed, declined)
            VALUES (1, $1, $2)
            ON CONFLICT (id) DO UPDATE
            SET confirmed = stats.confirmed + EXCLUDED.confirmed,
                declined = stats.declined + EXCLUDED.declined
            RETURNING confirmed, declined
            "#,
        )
        .bind(delta.confirmed)
        .bind(delta.declined)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(stats)
    }
}
