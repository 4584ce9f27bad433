//! Notification messages and permalinks.
//!
//! Notifications belong to a list and are read by every member of it. They
//! come from two sources: item transitions detected by the sync job, and
//! actions taken by list members (adding, checking, favoriting).

use crate::history::ItemTransition;
use crate::types::DbId;

/// A notification ready to be stored. The timestamp is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub list_id: DbId,
    pub message: String,
    pub permalink: String,
}

/// Client route of a list.
pub fn list_permalink(list_id: DbId) -> String {
    format!("/lists/{list_id}")
}

/// Client route of an item inside a list.
pub fn list_item_permalink(list_id: DbId, item_id: &str) -> String {
    format!("/lists/{list_id}/{item_id}")
}

impl NewNotification {
    /// Notification for an item transition detected by the sync job.
    pub fn for_transition(
        list_id: DbId,
        item_id: &str,
        item_title: &str,
        transition: &ItemTransition,
    ) -> Self {
        let message = match transition {
            ItemTransition::DealActivated => format!("{item_title} is now on a deal!"),
            ItemTransition::DealEnded => format!("{item_title} is no longer on a deal."),
            ItemTransition::PriceChanged {
                old_price,
                new_price,
            } => format!(
                "{item_title} changed its price! It was {old_price:.2}, now it is {new_price:.2}."
            ),
            ItemTransition::OutOfStock => format!("{item_title} is out of stock."),
            ItemTransition::LowStock { remaining } => format!(
                "{item_title} is running out of stock, only {remaining} units left."
            ),
            ItemTransition::NewReviews { .. } => format!("{item_title} has new reviews."),
        };

        Self {
            list_id,
            message,
            permalink: list_item_permalink(list_id, item_id),
        }
    }

    pub fn item_added(list_id: DbId, item_id: &str, actor: &str) -> Self {
        Self {
            list_id,
            message: format!("{actor} added a new item to the list!"),
            permalink: list_item_permalink(list_id, item_id),
        }
    }

    pub fn item_checked(list_id: DbId, item_id: &str, actor: &str) -> Self {
        Self {
            list_id,
            message: format!("{item_id} was bought by {actor}!"),
            permalink: list_item_permalink(list_id, item_id),
        }
    }

    pub fn item_unchecked(list_id: DbId, item_id: &str, actor: &str) -> Self {
        Self {
            list_id,
            message: format!("{actor} marked {item_id} as not bought."),
            permalink: list_item_permalink(list_id, item_id),
        }
    }

    pub fn list_favorited(list_id: DbId, actor: &str) -> Self {
        Self {
            list_id,
            message: format!("{actor} added this list to their favorites!"),
            permalink: list_permalink(list_id),
        }
    }
}
