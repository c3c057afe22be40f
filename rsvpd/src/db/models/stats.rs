//! Database model for the attendance counters.

use crate::db::models::guests::GuestStatus;
use serde::{Deserialize, Serialize};

/// Singleton counter row. Incremented on every recorded RSVP, never recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Stats {
    pub confirmed: i32,
    pub declined: i32,
}

impl Stats {
    /// Counter deltas for one RSVP with the given status
    pub fn delta(status: GuestStatus) -> Self {
        match status {
            GuestStatus::Confirmed => Stats { confirmed: 1, declined: 0 },
            GuestStatus::Declined => Stats { confirmed: 0, declined: 1 },
        }
    }

    pub fn record(&mut self, status: GuestStatus) {
        let delta = Self::delta(status);
        self.confirmed = self.confirmed.saturating_add(delta.confirmed);
        self.declined = self.declined.saturating_add(delta.declined);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_increments_matching_counter() {
        let mut stats = Stats::default();
        stats.record(GuestStatus::Confirmed);
        stats.record(GuestStatus::Confirmed);
        stats.record(GuestStatus::Declined);
        assert_eq!(stats, Stats { confirmed: 2, declined: 1 });
    }
}
