//! Domain logic for the shared shopping list backend.
//!
//! Everything in this crate is free of I/O: list and grant rules, the
//! permission resolver, marketplace item snapshots, the history diff used by
//! the sync job, and the notification messages it produces.

pub mod error;
pub mod history;
pub mod item;
pub mod list;
pub mod notification;
pub mod permissions;
pub mod share;
pub mod stock;
pub mod types;
