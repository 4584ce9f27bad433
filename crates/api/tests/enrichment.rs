//! Tests for the concurrent item enricher.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use chrono::Utc;
use common::{item, FakeMarketplace};
use melist_api::engine::enrichment::ItemEnricher;
use melist_core::error::CoreError;
use melist_core::item::DEFAULT_ROOT_CATEGORY;
use melist_db::models::list_item::ListItem;

fn entries(item_ids: &[&str]) -> Vec<ListItem> {
    let now = Utc::now();
    item_ids
        .iter()
        .enumerate()
        .map(|(i, item_id)| ListItem {
            id: i as i64 + 1,
            list_id: 1,
            item_id: item_id.to_string(),
            variation_id: None,
            status: "not_checked".to_string(),
            added_by: 1,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

fn enricher(marketplace: &Arc<FakeMarketplace>, concurrency: usize) -> ItemEnricher {
    ItemEnricher::new(marketplace.clone(), concurrency)
}

// ---------------------------------------------------------------------------
// Test: output order follows input order, not completion order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_output_preserves_input_order_under_varied_latency() {
    let marketplace = FakeMarketplace::new();
    let ids = ["MLA1", "MLA2", "MLA3", "MLA4", "MLA5"];
    for (i, id) in ids.iter().enumerate() {
        marketplace.put_item(item(id, 10.0 + i as f64, 5));
        // Earlier entries finish last.
        marketplace.set_latency(id, Duration::from_millis(10 * (ids.len() - i) as u64));
    }

    let enriched = enricher(&marketplace, 8)
        .enrich_entries(entries(&ids))
        .await
        .unwrap();

    let got: Vec<&str> = enriched.iter().map(|e| e.item.id.as_str()).collect();
    assert_eq!(got, ids);
    for e in &enriched {
        assert_eq!(e.entry.item_id, e.item.id);
    }
}

// ---------------------------------------------------------------------------
// Test: concurrency never exceeds the configured bound
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let marketplace = FakeMarketplace::new();
    let ids: Vec<String> = (1..=8).map(|i| format!("MLA{i}")).collect();
    for id in &ids {
        marketplace.put_item(item(id, 1.0, 1));
        marketplace.set_latency(id, Duration::from_millis(20));
    }
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let enriched = enricher(&marketplace, 2)
        .enrich_entries(entries(&id_refs))
        .await
        .unwrap();

    assert_eq!(enriched.len(), 8);
    assert!(marketplace.max_in_flight() <= 2, "max in flight {}", marketplace.max_in_flight());
}

// ---------------------------------------------------------------------------
// Test: the first failure is returned without waiting for slow tasks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_first_failure_aborts_remaining_lookups() {
    let marketplace = FakeMarketplace::new();
    for id in ["MLA1", "MLA2", "MLA3"] {
        marketplace.put_item(item(id, 1.0, 1));
        marketplace.set_latency(id, Duration::from_secs(5));
    }
    marketplace.fail_item("MLA-BAD");

    let started = Instant::now();
    let result = tokio::time::timeout(
        Duration::from_secs(2),
        enricher(&marketplace, 4).enrich_entries(entries(&["MLA1", "MLA-BAD", "MLA2", "MLA3"])),
    )
    .await
    .expect("enrichment should fail fast");

    assert_matches!(result, Err(CoreError::Internal(_)));
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(marketplace.completed(), 0);
}

#[tokio::test]
async fn test_missing_item_fails_with_not_found() {
    let marketplace = FakeMarketplace::new();
    marketplace.put_item(item("MLA1", 1.0, 1));

    let result = enricher(&marketplace, 4)
        .enrich_entries(entries(&["MLA1", "MLA404"]))
        .await;

    assert_matches!(result, Err(CoreError::NotFound { entity: "Item", ref id }) if id == "MLA404");
}

// ---------------------------------------------------------------------------
// Test: description and root category are attached
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_snapshot_carries_description_and_root_category() {
    let marketplace = FakeMarketplace::new();
    marketplace.put_item(item("MLA1", 1.0, 1));

    let snapshot = enricher(&marketplace, 1).enrich_item("MLA1").await.unwrap();

    assert_eq!(snapshot.description, "Description of MLA1");
    assert_eq!(snapshot.root_category, "Home");
}

#[tokio::test]
async fn test_failed_category_lookup_falls_back_to_default() {
    let marketplace = FakeMarketplace::new();
    let mut unknown = item("MLA1", 1.0, 1);
    unknown.category_id = "MLA-UNKNOWN".to_string();
    marketplace.put_item(unknown);
    let mut uncategorized = item("MLA2", 1.0, 1);
    uncategorized.category_id = String::new();
    marketplace.put_item(uncategorized);

    let enriched = enricher(&marketplace, 2)
        .enrich_entries(entries(&["MLA1", "MLA2"]))
        .await
        .unwrap();

    assert_eq!(enriched[0].item.root_category, DEFAULT_ROOT_CATEGORY);
    assert_eq!(enriched[1].item.root_category, DEFAULT_ROOT_CATEGORY);
}

#[tokio::test]
async fn test_empty_input_yields_empty_output() {
    let marketplace = FakeMarketplace::new();
    let enriched = enricher(&marketplace, 4).enrich_entries(Vec::new()).await.unwrap();
    assert!(enriched.is_empty());
}
