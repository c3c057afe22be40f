//! API response model for attendance counters.

use crate::db::models::stats::Stats;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    /// RSVPs with status `confirmed`
    pub confirmed: i32,
    /// RSVPs with status `declined`
    pub declined: i32,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            confirmed: stats.confirmed,
            declined: stats.declined,
        }
    }
}
