//! Change detection between two observations of a marketplace item.
//!
//! The sync job compares every freshly fetched snapshot with the last
//! recorded history sample of the same item. [`detect_transitions`] is the
//! pure part of that comparison: given the two samples it returns the state
//! transitions that happened, in a fixed order.

use serde::Serialize;

use crate::item::{ItemSnapshot, ITEM_STATUS_PAUSED};

/// At or below this many units an item is considered nearly out of stock.
pub const LOW_STOCK_THRESHOLD: i32 = 3;

/// The fields of an item that are recorded per sync cycle and compared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySample {
    pub price: f64,
    pub quantity: i32,
    pub status: String,
    pub has_deal: bool,
    pub reviews_quantity: i64,
}

impl From<&ItemSnapshot> for HistorySample {
    fn from(item: &ItemSnapshot) -> Self {
        Self {
            price: item.price,
            quantity: item.available_quantity,
            status: item.status.clone(),
            has_deal: item.has_active_deal(),
            reviews_quantity: item.reviews_quantity,
        }
    }
}

/// A state change worth notifying list members about.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemTransition {
    DealActivated,
    DealEnded,
    PriceChanged { old_price: f64, new_price: f64 },
    OutOfStock,
    LowStock { remaining: i32 },
    NewReviews { previous: i64, current: i64 },
}

/// Compare `current` against `baseline`.
///
/// Every rule is evaluated independently, so several transitions can be
/// reported for one cycle. The order of the result is fixed: deal activated,
/// deal ended, price changed, out of stock, low stock, new reviews.
pub fn detect_transitions(current: &HistorySample, baseline: &HistorySample) -> Vec<ItemTransition> {
    let mut transitions = Vec::new();

    if current.has_deal && !baseline.has_deal {
        transitions.push(ItemTransition::DealActivated);
    }

    if !current.has_deal && baseline.has_deal {
        transitions.push(ItemTransition::DealEnded);
    }

    if current.price != baseline.price {
        transitions.push(ItemTransition::PriceChanged {
            old_price: baseline.price,
            new_price: current.price,
        });
    }

    if current.quantity == 0 && current.status == ITEM_STATUS_PAUSED && baseline.quantity > 0 {
        transitions.push(ItemTransition::OutOfStock);
    }

    if current.quantity <= LOW_STOCK_THRESHOLD && baseline.quantity > LOW_STOCK_THRESHOLD {
        transitions.push(ItemTransition::LowStock {
            remaining: current.quantity,
        });
    }

    if current.reviews_quantity > baseline.reviews_quantity {
        transitions.push(ItemTransition::NewReviews {
            previous: baseline.reviews_quantity,
            current: current.reviews_quantity,
        });
    }

    transitions
}
