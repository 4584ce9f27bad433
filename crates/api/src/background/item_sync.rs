//! Periodic re-check of every tracked item.
//!
//! Once per interval the job walks every list, enriches its entries, refreshes
//! each item's review count and real-time stock, and runs the item through
//! the history engine. Failures are contained: a failed list or item is
//! logged and skipped, a failed cycle is logged and retried on the next tick.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use melist_core::error::CoreError;
use melist_core::history::HistorySample;
use melist_core::item::ItemSnapshot;
use melist_core::types::DbId;
use melist_db::models::list::List;
use melist_db::Store;
use melist_marketplace::ItemProvider;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::engine::enrichment::ItemEnricher;
use crate::engine::history;

/// Counters for one sync cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub lists_processed: usize,
    pub lists_skipped: usize,
    pub items_processed: usize,
    pub items_skipped: usize,
    pub notifications_emitted: usize,
}

/// Background job that keeps item history and notifications current.
pub struct ItemSyncJob {
    store: Arc<dyn Store>,
    items: Arc<dyn ItemProvider>,
    enricher: ItemEnricher,
    interval: Duration,
}

impl ItemSyncJob {
    pub fn new(
        store: Arc<dyn Store>,
        items: Arc<dyn ItemProvider>,
        enrich_concurrency: usize,
        interval: Duration,
    ) -> Self {
        let enricher = ItemEnricher::new(Arc::clone(&items), enrich_concurrency);
        Self {
            store,
            items,
            enricher,
            interval,
        }
    }

    /// Run a cycle on every tick until `cancel` is triggered. The first
    /// cycle starts immediately.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Item sync job started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Item sync job stopping");
                    break;
                }
                _ = ticker.tick() => {
                    match self.run_once().await {
                        Ok(report) => tracing::info!(?report, "Item sync cycle finished"),
                        Err(e) => tracing::error!(error = %e, "Item sync cycle failed"),
                    }
                }
            }
        }
    }

    /// One full pass over every list.
    ///
    /// Only a failure to load the lists fails the cycle. An item found in
    /// several lists is diffed against the same baseline for each of them
    /// and its history is appended once.
    pub async fn run_once(&self) -> Result<SyncReport, CoreError> {
        let lists = self.store.all_lists().await?;
        let mut report = SyncReport::default();
        let mut baselines: HashMap<String, Option<HistorySample>> = HashMap::new();

        for list in &lists {
            if self.sync_list(list, &mut baselines, &mut report).await {
                report.lists_processed += 1;
            } else {
                report.lists_skipped += 1;
            }
        }

        Ok(report)
    }

    /// Returns `false` if the list was skipped.
    async fn sync_list(
        &self,
        list: &List,
        baselines: &mut HashMap<String, Option<HistorySample>>,
        report: &mut SyncReport,
    ) -> bool {
        let entries = match self.store.list_items(list.id).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(list_id = list.id, error = %e, "Failed to load list entries");
                return false;
            }
        };

        let enriched = match self.enricher.enrich_entries(entries).await {
            Ok(enriched) => enriched,
            Err(e) => {
                tracing::error!(list_id = list.id, error = %e, "Failed to enrich list, skipping");
                return false;
            }
        };

        for entry in enriched {
            match self.sync_item(list.id, entry.item, baselines).await {
                Some(emitted) => {
                    report.items_processed += 1;
                    report.notifications_emitted += emitted;
                }
                None => report.items_skipped += 1,
            }
        }

        true
    }

    /// Refresh one item and run it through the history engine. Returns the
    /// number of notifications emitted, or `None` if the item was skipped.
    async fn sync_item(
        &self,
        list_id: DbId,
        mut item: ItemSnapshot,
        baselines: &mut HashMap<String, Option<HistorySample>>,
    ) -> Option<usize> {
        match self
            .items
            .fetch_reviews(&item.id, item.catalog_product_id.as_deref())
            .await
        {
            Ok(reviews) => item.reviews_quantity = reviews.total(),
            Err(e) => {
                tracing::warn!(list_id, item_id = %item.id, error = %e, "Failed to fetch reviews, skipping item");
                return None;
            }
        }

        if !item.permalink.is_empty() {
            match self.items.fetch_realtime_stock(&item.permalink).await {
                Ok(Some(quantity)) => item.available_quantity = quantity,
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(item_id = %item.id, error = %e, "Real-time stock lookup failed");
                }
            }
        }

        let current = HistorySample::from(&item);

        let first_in_cycle = !baselines.contains_key(&item.id);
        if first_in_cycle {
            match history::load_baseline(self.store.as_ref(), &item.id).await {
                Ok(baseline) => {
                    baselines.insert(item.id.clone(), baseline);
                }
                Err(e) => {
                    tracing::error!(item_id = %item.id, error = %e, "Failed to load item baseline, skipping item");
                    return None;
                }
            }
        }

        let baseline = baselines.get(&item.id).and_then(Option::as_ref);
        let emitted =
            history::emit_for_list(self.store.as_ref(), list_id, &item, &current, baseline).await;

        if first_in_cycle {
            if let Err(e) = history::append_history(self.store.as_ref(), &item.id, &current).await {
                tracing::error!(item_id = %item.id, error = %e, "Failed to append item history");
            }
        }

        Some(emitted)
    }
}
