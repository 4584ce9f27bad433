//! Row structs and DTOs for the tables in `db/migrations`.

pub mod item_history;
pub mod list;
pub mod list_item;
pub mod notification;
pub mod share_grant;
pub mod user;
