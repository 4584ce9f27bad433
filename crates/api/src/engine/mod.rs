//! List and item orchestration shared by handlers and the background sync.
//!
//! - [`access`] -- loads a list with its grants and resolves the caller's level.
//! - [`sharing`] -- share grant reconciliation, revocation and invitations.
//! - [`enrichment`] -- concurrent marketplace lookups for list entries.
//! - [`history`] -- diffs a fresh snapshot against the last history record.
//! - [`notify`] -- best-effort notification inserts.

pub mod access;
pub mod enrichment;
pub mod history;
pub mod notify;
pub mod sharing;
