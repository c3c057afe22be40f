//! HTTP request handlers for all API endpoints.
//!
//! Each handler validates its input, checks the admin gate where one applies, and talks to
//! storage only through [`crate::db::store::Store`].
//!
//! # Handler Modules
//!
//! - [`guests`]: public guestbook summary
//! - [`rsvp`]: RSVP submission
//! - [`stats`]: attendance counters
//! - [`admin`]: password-gated HTML page and JSON export
//! - [`live_location`]: public location and the key-gated update
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`], which converts to the matching status code and a
//! `{"error": "..."}` body.

pub mod admin;
pub mod guests;
pub mod live_location;
pub mod rsvp;
pub mod stats;
