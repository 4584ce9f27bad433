//! History diff and notification engine.
//!
//! A fresh snapshot is compared with the item's last history record; each
//! detected transition becomes a notification on the list, and the snapshot
//! is appended as the item's next history record.
//!
//! The steps are exposed separately so that the sync job can diff an item
//! that appears in several lists against one baseline and append its history
//! once per cycle. [`diff_and_record`] runs all three for a single list.

use melist_core::error::CoreError;
use melist_core::history::{detect_transitions, HistorySample};
use melist_core::item::ItemSnapshot;
use melist_core::notification::NewNotification;
use melist_core::types::DbId;
use melist_db::models::item_history::ItemHistory;
use melist_db::Store;

use crate::engine::notify;

/// The item's last recorded sample, or `None` on its first observation.
pub async fn load_baseline(
    store: &dyn Store,
    item_id: &str,
) -> Result<Option<HistorySample>, CoreError> {
    Ok(store
        .latest_history(item_id)
        .await?
        .map(|record| record.sample()))
}

/// Emit one notification per detected transition. Returns how many were
/// stored. Without a baseline nothing is emitted.
pub async fn emit_for_list(
    store: &dyn Store,
    list_id: DbId,
    item: &ItemSnapshot,
    current: &HistorySample,
    baseline: Option<&HistorySample>,
) -> usize {
    let Some(baseline) = baseline else {
        return 0;
    };

    let mut emitted = 0;
    for transition in detect_transitions(current, baseline) {
        tracing::debug!(list_id, item_id = %item.id, ?transition, "Item transition detected");
        let notification = NewNotification::for_transition(list_id, &item.id, &item.title, &transition);
        if notify::publish(store, &notification).await {
            emitted += 1;
        }
    }
    emitted
}

/// Append the current sample as the item's newest history record.
pub async fn append_history(
    store: &dyn Store,
    item_id: &str,
    current: &HistorySample,
) -> Result<ItemHistory, CoreError> {
    Ok(store.append_history(item_id, current).await?)
}

/// Diff `item` against its last record, notify `list_id`, and append the
/// new record. Returns the number of notifications stored.
pub async fn diff_and_record(
    store: &dyn Store,
    list_id: DbId,
    item: &ItemSnapshot,
) -> Result<usize, CoreError> {
    let baseline = load_baseline(store, &item.id).await?;
    let current = HistorySample::from(item);

    let emitted = emit_for_list(store, list_id, item, &current, baseline.as_ref()).await;
    append_history(store, &item.id, &current).await?;

    Ok(emitted)
}
