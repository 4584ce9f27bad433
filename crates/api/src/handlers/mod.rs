pub mod favorites;
pub mod items;
pub mod list_items;
pub mod lists;
pub mod notifications;
pub mod sharing;
pub mod users;
