//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod favorite_repo;
pub mod item_history_repo;
pub mod list_item_repo;
pub mod list_repo;
pub mod notification_repo;
pub mod pending_grant_repo;
pub mod share_grant_repo;
pub mod user_repo;

pub use favorite_repo::FavoriteRepo;
pub use item_history_repo::ItemHistoryRepo;
pub use list_item_repo::ListItemRepo;
pub use list_repo::ListRepo;
pub use notification_repo::NotificationRepo;
pub use pending_grant_repo::PendingGrantRepo;
pub use share_grant_repo::ShareGrantRepo;
pub use user_repo::UserRepo;
