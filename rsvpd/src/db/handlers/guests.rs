//! Database repository for guestbook entries.

use crate::db::{
    errors::Result,
    models::guests::{GuestCreateDBRequest, GuestEntry, GuestSummary},
};
use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Guests<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Guests<'c> {
    /// Create a new Guests repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert a guestbook entry; id and timestamp are assigned by the database
    #[instrument(skip(self, request), fields(status = %request.status), err)]
    pub async fn create(&mut self, request: &GuestCreateDBRequest) -> Result<GuestEntry> {
        request.validate()?;

        let guest = sqlx::query_as::<_, GuestEntry>(
            r#"
            INSERT INTO guestbook (name, message, status, ip)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, message, status, ip, timestamp
            "#,
        )
        .bind(&request.name)
        .bind(&request.message)
        .bind(request.status.as_str())
        .bind(request.ip.as_deref())
        .fetch_one(&mut *self.db)
        .await?;

        Ok(guest)
    }

    /// All entries, newest first
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<GuestEntry>> {
        let guests = sqlx::query_as::<_, GuestEntry>(
            r#"
            SELECT id, name, message, status, ip, timestamp
            FROM guestbook
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(guests)
    }

    /// Total entry count, plus the count of entries at or after `since`
    #[instrument(skip(self), err)]
    pub async fn summary(&mut self, since: DateTime<Utc>) -> Result<GuestSummary> {
        let summary = sqlx::query_as::<_, GuestSummary>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE timestamp >= $1) AS recent
            FROM guestbook
            "#,
        )
        .bind(since)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(summary)
    }
}

#[cfg(all(test, feature = "postgres-tests"))]
mod tests {
    use super::*;
    use crate::db::{errors::DbError, models::guests::GuestStatus};
    use chrono::Duration;
    use sqlx::PgPool;

    fn request(name: &str, status: GuestStatus) -> GuestCreateDBRequest {
        GuestCreateDBRequest::new(name, "See you there", status, Some("10.0.0.1".into())).unwrap()
    }

    #[sqlx::test]
    async fn test_create_assigns_id_and_timestamp(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Guests::new(&mut conn);

        let before = Utc::now() - Duration::seconds(5);
        let first = repo.create(&request("An", GuestStatus::Confirmed)).await.unwrap();
        let second = repo.create(&request("Binh", GuestStatus::Declined)).await.unwrap();

        assert!(second.id > first.id);
        assert!(first.timestamp >= before);
        assert_eq!(first.name, "An");
        assert_eq!(first.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(second.status, GuestStatus::Declined);

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.iter().find(|g| g.id == first.id), Some(&first));
    }

    #[sqlx::test]
    async fn test_list_is_newest_first(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Guests::new(&mut conn);

        for name in ["first", "second", "third"] {
            repo.create(&request(name, GuestStatus::Confirmed)).await.unwrap();
        }

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[sqlx::test]
    async fn test_blank_name_is_rejected_before_insert(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Guests::new(&mut conn);

        let bad = GuestCreateDBRequest {
            name: "   ".into(),
            message: "hi".into(),
            status: GuestStatus::Confirmed,
            ip: None,
        };
        assert!(matches!(repo.create(&bad).await, Err(DbError::Invalid { .. })));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[sqlx::test]
    async fn test_blank_name_violates_check_constraint(pool: PgPool) {
        let err = sqlx::query("INSERT INTO guestbook (name, message) VALUES ('  ', 'hi')")
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(matches!(DbError::from(err), DbError::CheckViolation { .. }));
    }

    #[sqlx::test]
    async fn test_summary_counts_recent_entries(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Guests::new(&mut conn);
        repo.create(&request("recent", GuestStatus::Confirmed)).await.unwrap();
        drop(repo);

        sqlx::query("INSERT INTO guestbook (name, message, timestamp) VALUES ('old', 'hi', NOW() - INTERVAL '3 days')")
            .execute(&pool)
            .await
            .unwrap();

        let mut repo = Guests::new(&mut conn);
        let summary = repo.summary(Utc::now() - Duration::hours(24)).await.unwrap();
        assert_eq!(summary, GuestSummary { total: 2, recent: 1 });
    }
}
