//! Admin gate and caller identification.
//!
//! There are no users or sessions. Two operations are protected by a shared secret each:
//!
//! - the guestbook views (`/api/admin/*`) by `admin_password`, passed as a `password` query parameter
//! - location sharing (`/api/share-location`) by `admin_key`, passed as `adminKey` in the JSON body
//!
//! [`admin::require_secret`] performs the comparison. [`client_addr::ClientAddr`] resolves the
//! caller's network address for guest entries and the location's `lastUpdatedBy`.

pub mod admin;
pub mod client_addr;

pub use admin::require_secret;
pub use client_addr::ClientAddr;
