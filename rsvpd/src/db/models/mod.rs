//! Database models representing stored records.
//!
//! These types are shared by both store backends: they map onto Postgres rows via
//! [`sqlx::FromRow`] and onto the JSON document via serde.

pub mod guests;
pub mod live_location;
pub mod stats;
