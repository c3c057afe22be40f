//! Persistence layer for guestbook entries, attendance counters and the live location.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │    Store    │  (db::store - backend-neutral trait)
//! └──┬───────┬──┘
//!    │       │
//!    ↓       ↓
//! ┌──────┐ ┌──────────────┐
//! │ JSON │ │ Repositories │  (db::handlers - SQL queries)
//! │ file │ └──────┬───────┘
//! └──────┘        ↓
//!           ┌─────────────┐
//!           │  PostgreSQL │
//!           └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`store`]: the [`store::Store`] trait and its two backends
//! - [`handlers`]: Postgres repositories, one per table
//! - [`models`]: records shared by both backends
//! - [`errors`]: storage error type
//!
//! The backend is picked once at startup from [`crate::config::DatabaseConfig`] and shared
//! through `Arc<dyn Store>`; handlers never know which one they are talking to.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;
