//! Postgres-backed [`Store`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use super::Store;
use crate::db::{
    errors::Result,
    handlers::{Guests, LiveLocations, Stats},
    models::{
        guests::{GuestCreateDBRequest, GuestEntry, GuestStatus, GuestSummary},
        live_location::{LiveLocation, LocationUpdateDBRequest},
        stats::Stats as StatsRecord,
    },
};

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PostgresStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    #[instrument(skip(self), err)]
    async fn ensure_schema(&self) -> Result<()> {
        crate::migrator().run(&self.pool).await?;

        let mut tx = self.pool.begin().await?;
        Stats::new(&mut tx).seed().await?;
        LiveLocations::new(&mut tx).seed().await?;
        tx.commit().await?;

        debug!("Postgres schema ready");
        Ok(())
    }

    async fn list_guests(&self) -> Result<Vec<GuestEntry>> {
        let mut conn = self.pool.acquire().await?;
        Guests::new(&mut conn).list().await
    }

    async fn insert_guest(&self, request: &GuestCreateDBRequest) -> Result<GuestEntry> {
        let mut conn = self.pool.acquire().await?;
        Guests::new(&mut conn).create(request).await
    }

    async fn increment_stat(&self, status: GuestStatus) -> Result<StatsRecord> {
        let mut conn = self.pool.acquire().await?;
        Stats::new(&mut conn).increment(status).await
    }

    #[instrument(skip(self, request), fields(status = %request.status), err)]
    async fn record_rsvp(&self, request: &GuestCreateDBRequest) -> Result<GuestEntry> {
        let mut tx = self.pool.begin().await?;
        let guest = Guests::new(&mut tx).create(request).await?;
        Stats::new(&mut tx).increment(guest.status).await?;
        tx.commit().await?;

        Ok(guest)
    }

    async fn guest_summary(&self, since: DateTime<Utc>) -> Result<GuestSummary> {
        let mut conn = self.pool.acquire().await?;
        Guests::new(&mut conn).summary(since).await
    }

    async fn get_stats(&self) -> Result<StatsRecord> {
        let mut conn = self.pool.acquire().await?;
        Stats::new(&mut conn).get().await
    }

    async fn get_location(&self) -> Result<LiveLocation> {
        let mut conn = self.pool.acquire().await?;
        LiveLocations::new(&mut conn).get().await
    }

    async fn set_location(&self, request: &LocationUpdateDBRequest, updated_by: &str) -> Result<LiveLocation> {
        let mut conn = self.pool.acquire().await?;
        LiveLocations::new(&mut conn).set(request, updated_by).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(all(test, feature = "postgres-tests"))]
mod tests {
    use super::*;

    fn request(name: &str, status: GuestStatus) -> GuestCreateDBRequest {
        GuestCreateDBRequest::new(name, "Congratulations!", status, None).unwrap()
    }

    #[sqlx::test]
    async fn test_ensure_schema_is_repeatable(pool: PgPool) {
        let store = PostgresStore::new(pool);
        store.ensure_schema().await.unwrap();
        store.record_rsvp(&request("An", GuestStatus::Confirmed)).await.unwrap();
        store.ensure_schema().await.unwrap();

        assert_eq!(store.get_stats().await.unwrap(), StatsRecord { confirmed: 1, declined: 0 });
        assert_eq!(store.list_guests().await.unwrap().len(), 1);
    }

    #[sqlx::test]
    async fn test_record_rsvp_updates_counters(pool: PgPool) {
        let store = PostgresStore::new(pool);
        store.ensure_schema().await.unwrap();

        store.record_rsvp(&request("An", GuestStatus::Confirmed)).await.unwrap();
        store.record_rsvp(&request("Binh", GuestStatus::Declined)).await.unwrap();
        store.record_rsvp(&request("Chi", GuestStatus::Confirmed)).await.unwrap();

        assert_eq!(store.get_stats().await.unwrap(), StatsRecord { confirmed: 2, declined: 1 });
        let summary = store.guest_summary(Utc::now() - chrono::Duration::hours(1)).await.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.recent, 3);
    }

    #[sqlx::test]
    async fn test_insert_guest_leaves_counters_alone(pool: PgPool) {
        let store = PostgresStore::new(pool);
        store.ensure_schema().await.unwrap();

        store.insert_guest(&request("An", GuestStatus::Declined)).await.unwrap();
        assert_eq!(store.get_stats().await.unwrap(), StatsRecord::default());

        store.increment_stat(GuestStatus::Declined).await.unwrap();
        assert_eq!(store.get_stats().await.unwrap(), StatsRecord { confirmed: 0, declined: 1 });
    }

    /// Tables as the earlier Node deployment created them
    const LEGACY_SCHEMA: &str = r#"
        CREATE TABLE guestbook (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            message TEXT NOT NULL,
            status VARCHAR(50) DEFAULT 'confirmed',
            ip VARCHAR(45),
            timestamp TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        CREATE TABLE stats (
            id INTEGER PRIMARY KEY DEFAULT 1,
            confirmed INTEGER DEFAULT 0,
            declined INTEGER DEFAULT 0,
            CONSTRAINT single_row CHECK (id = 1)
        );
        INSERT INTO stats (id, confirmed, declined) VALUES (1, 4, 1);
        CREATE TABLE live_location (
            id INTEGER PRIMARY KEY DEFAULT 1,
            is_active BOOLEAN DEFAULT FALSE,
            description TEXT,
            map_url TEXT,
            phone VARCHAR(20),
            note TEXT,
            timestamp TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            last_updated_by VARCHAR(45),
            CONSTRAINT single_location CHECK (id = 1)
        );
        INSERT INTO live_location (id, is_active) VALUES (1, FALSE);
        INSERT INTO guestbook (name, message, status, ip, timestamp)
            VALUES ('Lan', 'Congrats!', 'confirmed', '10.0.0.7', '2025-05-30 08:00:00');
        INSERT INTO guestbook (name, message, status) VALUES ('Minh', 'See you', NULL);
        INSERT INTO guestbook (name, message, status) VALUES ('Hoa', 'Maybe', 'Attending');
    "#;

    #[sqlx::test(migrations = false)]
    async fn test_ensure_schema_upgrades_legacy_tables(pool: PgPool) {
        sqlx::raw_sql(LEGACY_SCHEMA).execute(&pool).await.unwrap();

        let store = PostgresStore::new(pool);
        store.ensure_schema().await.unwrap();

        let guests = store.list_guests().await.unwrap();
        assert_eq!(guests.len(), 3);
        assert!(guests.iter().all(|g| g.status == GuestStatus::Confirmed));
        let lan = guests.iter().find(|g| g.name == "Lan").unwrap();
        assert_eq!(lan.timestamp, "2025-05-30T08:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(lan.ip.as_deref(), Some("10.0.0.7"));

        let guest = store.record_rsvp(&request("An", GuestStatus::Declined)).await.unwrap();
        assert!(guest.id > lan.id);
        assert_eq!(store.get_stats().await.unwrap(), StatsRecord { confirmed: 4, declined: 2 });

        let location = store.get_location().await.unwrap();
        assert!(!location.is_active);

        let updated = store
            .set_location(
                &LocationUpdateDBRequest {
                    is_active: true,
                    description: Some("Main hall".into()),
                    ..Default::default()
                },
                "10.0.0.9",
            )
            .await
            .unwrap();
        assert!(updated.is_active);
        assert_eq!(store.get_location().await.unwrap(), updated);

        // Running again over the upgraded tables changes nothing
        store.ensure_schema().await.unwrap();
        assert_eq!(store.list_guests().await.unwrap().len(), 4);
    }

    #[sqlx::test]
    async fn test_failed_rsvp_rolls_back(pool: PgPool) {
        let store = PostgresStore::new(pool);
        store.ensure_schema().await.unwrap();

        let bad = GuestCreateDBRequest {
            name: String::new(),
            message: "hi".into(),
            status: GuestStatus::Confirmed,
            ip: None,
        };
        assert!(store.record_rsvp(&bad).await.is_err());
        assert_eq!(store.get_stats().await.unwrap(), StatsRecord::default());
        assert!(store.list_guests().await.unwrap().is_empty());
    }
}
