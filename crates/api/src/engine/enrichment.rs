//! Concurrent marketplace enrichment of list entries.
//!
//! Each entry becomes one task in a [`JoinSet`], gated by a semaphore so
//! that at most `concurrency` lookups run at once. Results carry their input
//! index and are placed back in input order. The first failing task aborts
//! the rest of the set and its error is returned; no partial result is
//! produced.

use std::sync::Arc;

use melist_core::error::CoreError;
use melist_core::item::{root_category_name, ItemSnapshot, DEFAULT_ROOT_CATEGORY};
use melist_db::models::list_item::ListItem;
use melist_marketplace::{ItemProvider, MarketplaceError};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// A list entry with its current marketplace data.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedListItem {
    #[serde(flatten)]
    pub entry: ListItem,
    pub item: ItemSnapshot,
}

/// Map a marketplace failure into a domain error.
///
/// A missing resource stays `NotFound`; a rejected token is `Unauthorized`;
/// transport, status and decode failures are `Internal`.
pub fn upstream_error(err: MarketplaceError) -> CoreError {
    match err {
        MarketplaceError::NotFound { resource, id } => CoreError::NotFound { entity: resource, id },
        MarketplaceError::Unauthorized(msg) => CoreError::Unauthorized(msg),
        other => CoreError::Internal(format!("marketplace request failed: {other}")),
    }
}

/// Fetch one item with its description and root category.
///
/// The item and its description are requested concurrently. A failed or
/// empty category lookup falls back to [`DEFAULT_ROOT_CATEGORY`].
pub async fn fetch_snapshot(
    provider: &dyn ItemProvider,
    item_id: &str,
) -> Result<ItemSnapshot, CoreError> {
    let (mut item, description) = tokio::try_join!(
        provider.fetch_item(item_id),
        provider.fetch_description(item_id),
    )
    .map_err(upstream_error)?;

    item.description = description;
    item.root_category = if item.category_id.is_empty() {
        DEFAULT_ROOT_CATEGORY.to_string()
    } else {
        match provider.fetch_category(&item.category_id).await {
            Ok(category) => root_category_name(category.path_names()),
            Err(e) => {
                tracing::warn!(
                    item_id,
                    category_id = %item.category_id,
                    error = %e,
                    "Category lookup failed, using default root category",
                );
                DEFAULT_ROOT_CATEGORY.to_string()
            }
        }
    };

    Ok(item)
}

/// Bounded fan-out over an [`ItemProvider`].
#[derive(Clone)]
pub struct ItemEnricher {
    provider: Arc<dyn ItemProvider>,
    concurrency: usize,
}

impl ItemEnricher {
    pub fn new(provider: Arc<dyn ItemProvider>, concurrency: usize) -> Self {
        Self {
            provider,
            concurrency: concurrency.max(1),
        }
    }

    /// Enrich a single item.
    pub async fn enrich_item(&self, item_id: &str) -> Result<ItemSnapshot, CoreError> {
        fetch_snapshot(self.provider.as_ref(), item_id).await
    }

    /// Enrich every entry, preserving input order.
    pub async fn enrich_entries(
        &self,
        entries: Vec<ListItem>,
    ) -> Result<Vec<EnrichedListItem>, CoreError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (index, entry) in entries.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let permits = Arc::clone(&permits);
            let item_id = entry.item_id.clone();

            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|_| CoreError::Internal("enrichment semaphore closed".into()))?;
                let snapshot = fetch_snapshot(provider.as_ref(), &item_id).await?;
                Ok::<_, CoreError>((index, snapshot))
            });
        }

        let mut slots: Vec<Option<ItemSnapshot>> = vec![None; entries.len()];

        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => Err(CoreError::Internal(format!("enrichment task failed: {e}"))),
            };

            match outcome {
                Ok((index, snapshot)) => slots[index] = Some(snapshot),
                Err(e) => {
                    tasks.abort_all();
                    tracing::debug!(error = %e, "Enrichment aborted on first failure");
                    return Err(e);
                }
            }
        }

        entries
            .into_iter()
            .zip(slots)
            .map(|(entry, slot)| {
                slot.map(|item| EnrichedListItem { entry, item }).ok_or_else(|| {
                    CoreError::Internal("enrichment finished without a result".into())
                })
            })
            .collect()
    }
}
