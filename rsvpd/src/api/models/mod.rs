//! API request and response data models.
//!
//! These types define the public JSON contract and are kept separate from the storage records in
//! [`crate::db::models`], so the two can evolve independently. All of them carry `utoipa`
//! annotations for the generated API docs.
//!
//! - [`guests`]: RSVP submission, public summary and admin export
//! - [`stats`]: attendance counters
//! - [`live_location`]: the shared live location and the admin update payload

pub mod guests;
pub mod live_location;
pub mod stats;
