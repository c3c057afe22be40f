//! Postgres repositories for the three guestbook tables.
//!
//! Each repository wraps a borrowed `PgConnection`, so it works the same on a pooled connection
//! or inside a transaction:
//!
//! ```ignore
//! use rsvpd::db::handlers::{Guests, Stats};
//!
//! let mut tx = pool.begin().await?;
//! let guest = Guests::new(&mut tx).create(&request).await?;
//! Stats::new(&mut tx).increment(guest.status).await?;
//! tx.commit().await?;
//! ```
//!
//! - [`Guests`]: append-only guestbook entries
//! - [`Stats`]: attendance counters (single row)
//! - [`LiveLocations`]: the shared live location (single row)

pub mod guests;
pub mod live_location;
pub mod stats;

pub use guests::Guests;
pub use live_location::LiveLocations;
pub use stats::Stats;
