//! Shared test harness: in-memory store and marketplace doubles plus request
//! helpers that drive the full router through `tower::ServiceExt`.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use melist_api::config::ServerConfig;
use melist_api::router::build_app_router;
use melist_api::state::AppState;
use melist_core::history::HistorySample;
use melist_core::item::{ItemSnapshot, ListItemStatus};
use melist_core::list::{ListChanges, Privacy};
use melist_core::notification::NewNotification;
use melist_core::share::ShareType;
use melist_core::types::DbId;
use melist_db::models::item_history::ItemHistory;
use melist_db::models::list::List;
use melist_db::models::list_item::{ListItem, NewListItem};
use melist_db::models::notification::Notification;
use melist_db::models::share_grant::{PendingShareGrant, ShareGrant};
use melist_db::models::user::{UpsertUser, User};
use melist_db::{Store, StoreError, StoreResult};
use melist_marketplace::{
    CallerIdentity, Category, CategoryNode, IdentityValidator, ItemProvider, ItemReviews,
    MarketplaceError, Paging, SearchResults, Trend,
};

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: Vec<User>,
    lists: Vec<List>,
    favorites: Vec<(DbId, DbId)>,
    grants: Vec<ShareGrant>,
    pending: Vec<PendingShareGrant>,
    list_items: Vec<ListItem>,
    history: Vec<ItemHistory>,
    notifications: Vec<Notification>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// [`Store`] kept in memory. Grant writes for users in
/// `failing_grant_users` fail, to exercise partial failure.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing_grant_users: Mutex<HashSet<DbId>>,
    failing_list_items: Mutex<HashSet<DbId>>,
    failing_notification_messages: Mutex<Vec<String>>,
    unreachable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_grant_writes_for(&self, user_id: DbId) {
        self.failing_grant_users.lock().unwrap().insert(user_id);
    }

    pub fn fail_list_items_for(&self, list_id: DbId) {
        self.failing_list_items.lock().unwrap().insert(list_id);
    }

    /// Make `health_check` fail.
    pub fn set_unreachable(&self) {
        self.unreachable.store(true, Ordering::SeqCst);
    }

    /// Notification inserts whose message contains `fragment` fail.
    pub fn fail_notifications_containing(&self, fragment: &str) {
        self.failing_notification_messages
            .lock()
            .unwrap()
            .push(fragment.to_string());
    }

    pub fn seed_list(&self, owner_id: DbId, title: &str, privacy: Privacy) -> DbId {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let now = Utc::now();
        t.lists.push(List {
            id,
            owner_id,
            title: title.to_string(),
            description: String::new(),
            privacy: privacy.as_str().to_string(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn seed_grant(&self, list_id: DbId, user_id: DbId, share_type: ShareType) {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let now = Utc::now();
        t.grants.push(ShareGrant {
            id,
            list_id,
            user_id,
            share_type: share_type.as_str().to_string(),
            created_at: now,
            updated_at: now,
        });
    }

    pub fn seed_item(&self, list_id: DbId, item_id: &str, added_by: DbId) {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let now = Utc::now();
        t.list_items.push(ListItem {
            id,
            list_id,
            item_id: item_id.to_string(),
            variation_id: None,
            status: ListItemStatus::NotChecked.as_str().to_string(),
            added_by,
            created_at: now,
            updated_at: now,
        });
    }

    pub fn seed_user(&self, id: DbId, nickname: &str, email: &str) {
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        t.users.push(User {
            id,
            nickname: nickname.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        });
    }

    pub fn seed_history(&self, item_id: &str, sample: HistorySample) {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        t.history.push(ItemHistory {
            id,
            item_id: item_id.to_string(),
            price: sample.price,
            quantity: sample.quantity,
            status: sample.status,
            has_deal: sample.has_deal,
            reviews_quantity: sample.reviews_quantity,
            fetched_at: Utc::now(),
        });
    }

    pub fn grants(&self, list_id: DbId) -> Vec<(DbId, String)> {
        let t = self.tables.lock().unwrap();
        t.grants
            .iter()
            .filter(|g| g.list_id == list_id)
            .map(|g| (g.user_id, g.share_type.clone()))
            .collect()
    }

    pub fn pending(&self) -> Vec<PendingShareGrant> {
        self.tables.lock().unwrap().pending.clone()
    }

    pub fn history_of(&self, item_id: &str) -> Vec<ItemHistory> {
        let t = self.tables.lock().unwrap();
        t.history
            .iter()
            .filter(|h| h.item_id == item_id)
            .cloned()
            .collect()
    }

    pub fn notifications_of(&self, list_id: DbId) -> Vec<Notification> {
        let t = self.tables.lock().unwrap();
        t.notifications
            .iter()
            .filter(|n| n.list_id == list_id)
            .cloned()
            .collect()
    }

    fn check_grant_write(&self, user_id: DbId) -> StoreResult<()> {
        if self.failing_grant_users.lock().unwrap().contains(&user_id) {
            return Err(StoreError::Unavailable(format!("grant write for {user_id} refused")));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store unreachable".into()));
        }
        Ok(())
    }

    async fn upsert_user(&self, input: &UpsertUser) -> StoreResult<User> {
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: input.id,
            nickname: input.nickname.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            created_at: now,
            updated_at: now,
        };
        t.users.retain(|u| u.id != input.id);
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_list(
        &self,
        owner_id: DbId,
        title: &str,
        description: &str,
        privacy: Privacy,
    ) -> StoreResult<List> {
        let id = self.seed_list(owner_id, title, privacy);
        let mut t = self.tables.lock().unwrap();
        let list = t.lists.iter_mut().find(|l| l.id == id).unwrap();
        list.description = description.to_string();
        Ok(list.clone())
    }

    async fn find_list(&self, id: DbId) -> StoreResult<Option<List>> {
        let t = self.tables.lock().unwrap();
        Ok(t.lists.iter().find(|l| l.id == id).cloned())
    }

    async fn update_list(&self, id: DbId, changes: &ListChanges) -> StoreResult<Option<List>> {
        let mut t = self.tables.lock().unwrap();
        let Some(list) = t.lists.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            list.title = title.clone();
        }
        if let Some(description) = &changes.description {
            list.description = description.clone();
        }
        if let Some(privacy) = changes.privacy {
            list.privacy = privacy.as_str().to_string();
        }
        list.updated_at = Utc::now();
        Ok(Some(list.clone()))
    }

    async fn all_lists(&self) -> StoreResult<Vec<List>> {
        Ok(self.tables.lock().unwrap().lists.clone())
    }

    async fn public_lists(&self) -> StoreResult<Vec<List>> {
        let t = self.tables.lock().unwrap();
        Ok(t.lists
            .iter()
            .filter(|l| l.privacy() == Privacy::Public)
            .cloned()
            .collect())
    }

    async fn lists_owned_by(&self, owner_id: DbId) -> StoreResult<Vec<List>> {
        let t = self.tables.lock().unwrap();
        Ok(t.lists
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn lists_shared_with(&self, user_id: DbId) -> StoreResult<Vec<List>> {
        let t = self.tables.lock().unwrap();
        let shared: HashSet<DbId> = t
            .grants
            .iter()
            .filter(|g| g.user_id == user_id)
            .map(|g| g.list_id)
            .collect();
        Ok(t.lists
            .iter()
            .filter(|l| shared.contains(&l.id))
            .cloned()
            .collect())
    }

    async fn favorite_lists(&self, user_id: DbId) -> StoreResult<Vec<List>> {
        let t = self.tables.lock().unwrap();
        Ok(t.lists
            .iter()
            .filter(|l| t.favorites.contains(&(user_id, l.id)))
            .cloned()
            .collect())
    }

    async fn add_favorite(&self, user_id: DbId, list_id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.lock().unwrap();
        if t.favorites.contains(&(user_id, list_id)) {
            return Ok(false);
        }
        t.favorites.push((user_id, list_id));
        Ok(true)
    }

    async fn remove_favorite(&self, user_id: DbId, list_id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.favorites.len();
        t.favorites.retain(|f| *f != (user_id, list_id));
        Ok(t.favorites.len() != before)
    }

    async fn grants_for_list(&self, list_id: DbId) -> StoreResult<Vec<ShareGrant>> {
        let t = self.tables.lock().unwrap();
        Ok(t.grants
            .iter()
            .filter(|g| g.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn insert_grant(
        &self,
        list_id: DbId,
        user_id: DbId,
        share_type: ShareType,
    ) -> StoreResult<ShareGrant> {
        self.check_grant_write(user_id)?;
        let mut t = self.tables.lock().unwrap();
        if t.grants
            .iter()
            .any(|g| g.list_id == list_id && g.user_id == user_id)
        {
            return Err(StoreError::Unavailable("duplicate grant".into()));
        }
        let id = t.next_id();
        let now = Utc::now();
        let grant = ShareGrant {
            id,
            list_id,
            user_id,
            share_type: share_type.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        t.grants.push(grant.clone());
        Ok(grant)
    }

    async fn update_grant(
        &self,
        list_id: DbId,
        user_id: DbId,
        share_type: ShareType,
    ) -> StoreResult<Option<ShareGrant>> {
        self.check_grant_write(user_id)?;
        let mut t = self.tables.lock().unwrap();
        Ok(t
            .grants
            .iter_mut()
            .find(|g| g.list_id == list_id && g.user_id == user_id)
            .map(|g| {
                if g.share_type != share_type.as_str() {
                    g.share_type = share_type.as_str().to_string();
                    g.updated_at = Utc::now();
                }
                g.clone()
            }))
    }

    async fn delete_grant(&self, list_id: DbId, user_id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.grants.len();
        t.grants
            .retain(|g| !(g.list_id == list_id && g.user_id == user_id));
        Ok(t.grants.len() != before)
    }

    async fn upsert_pending_grant(
        &self,
        list_id: DbId,
        email: &str,
        share_type: ShareType,
    ) -> StoreResult<PendingShareGrant> {
        let mut t = self.tables.lock().unwrap();
        if let Some(existing) = t
            .pending
            .iter_mut()
            .find(|p| p.list_id == list_id && p.email == email)
        {
            existing.share_type = share_type.as_str().to_string();
            return Ok(existing.clone());
        }
        let id = t.next_id();
        let pending = PendingShareGrant {
            id,
            list_id,
            email: email.to_string(),
            share_type: share_type.as_str().to_string(),
            created_at: Utc::now(),
        };
        t.pending.push(pending.clone());
        Ok(pending)
    }

    async fn pending_grants_for_email(&self, email: &str) -> StoreResult<Vec<PendingShareGrant>> {
        let t = self.tables.lock().unwrap();
        Ok(t.pending
            .iter()
            .filter(|p| p.email.eq_ignore_ascii_case(email))
            .cloned()
            .collect())
    }

    async fn delete_pending_grant(&self, id: DbId) -> StoreResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.pending.len();
        t.pending.retain(|p| p.id != id);
        Ok(t.pending.len() != before)
    }

    async fn list_items(&self, list_id: DbId) -> StoreResult<Vec<ListItem>> {
        if self.failing_list_items.lock().unwrap().contains(&list_id) {
            return Err(StoreError::Unavailable(format!("entries of list {list_id}")));
        }
        let t = self.tables.lock().unwrap();
        Ok(t.list_items
            .iter()
            .filter(|i| i.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn find_list_item(&self, list_id: DbId, item_id: &str) -> StoreResult<Option<ListItem>> {
        let t = self.tables.lock().unwrap();
        Ok(t.list_items
            .iter()
            .find(|i| i.list_id == list_id && i.item_id == item_id)
            .cloned())
    }

    async fn insert_list_item(&self, input: &NewListItem) -> StoreResult<ListItem> {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let now = Utc::now();
        let entry = ListItem {
            id,
            list_id: input.list_id,
            item_id: input.item_id.clone(),
            variation_id: input.variation_id,
            status: ListItemStatus::NotChecked.as_str().to_string(),
            added_by: input.added_by,
            created_at: now,
            updated_at: now,
        };
        t.list_items.push(entry.clone());
        Ok(entry)
    }

    async fn set_list_item_status(
        &self,
        list_id: DbId,
        item_id: &str,
        status: ListItemStatus,
    ) -> StoreResult<Option<ListItem>> {
        let mut t = self.tables.lock().unwrap();
        Ok(t
            .list_items
            .iter_mut()
            .find(|i| i.list_id == list_id && i.item_id == item_id)
            .map(|i| {
                i.status = status.as_str().to_string();
                i.clone()
            }))
    }

    async fn delete_list_item(&self, list_id: DbId, item_id: &str) -> StoreResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.list_items.len();
        t.list_items
            .retain(|i| !(i.list_id == list_id && i.item_id == item_id));
        Ok(t.list_items.len() != before)
    }

    async fn latest_history(&self, item_id: &str) -> StoreResult<Option<ItemHistory>> {
        let t = self.tables.lock().unwrap();
        Ok(t.history
            .iter()
            .filter(|h| h.item_id == item_id)
            .max_by_key(|h| h.id)
            .cloned())
    }

    async fn item_history(&self, item_id: &str) -> StoreResult<Vec<ItemHistory>> {
        Ok(self.history_of(item_id))
    }

    async fn append_history(
        &self,
        item_id: &str,
        sample: &HistorySample,
    ) -> StoreResult<ItemHistory> {
        self.seed_history(item_id, sample.clone());
        let t = self.tables.lock().unwrap();
        Ok(t.history.last().cloned().unwrap())
    }

    async fn insert_notification(&self, input: &NewNotification) -> StoreResult<Notification> {
        let refused = self
            .failing_notification_messages
            .lock()
            .unwrap()
            .iter()
            .any(|fragment| input.message.contains(fragment.as_str()));
        if refused {
            return Err(StoreError::Unavailable("notification insert refused".into()));
        }
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let notification = Notification {
            id,
            list_id: input.list_id,
            message: input.message.clone(),
            permalink: input.permalink.clone(),
            seen: false,
            created_at: Utc::now(),
        };
        t.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn notifications_for_list(&self, list_id: DbId) -> StoreResult<Vec<Notification>> {
        let mut notifications = self.notifications_of(list_id);
        notifications.reverse();
        Ok(notifications)
    }
}

// ---------------------------------------------------------------------------
// Marketplace double
// ---------------------------------------------------------------------------

/// Item provider and identity validator backed by maps.
#[derive(Default)]
pub struct FakeMarketplace {
    items: Mutex<HashMap<String, ItemSnapshot>>,
    latencies: Mutex<HashMap<String, Duration>>,
    failing_items: Mutex<HashSet<String>>,
    failing_reviews: Mutex<HashSet<String>>,
    reviews: Mutex<HashMap<String, i64>>,
    stock: Mutex<HashMap<String, i32>>,
    failing_stock: Mutex<HashSet<String>>,
    trends: Mutex<HashMap<String, Vec<String>>>,
    tokens: Mutex<HashMap<String, CallerIdentity>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: AtomicUsize,
}

impl FakeMarketplace {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn put_item(&self, item: ItemSnapshot) {
        self.items.lock().unwrap().insert(item.id.clone(), item);
    }

    pub fn update_item(&self, item_id: &str, f: impl FnOnce(&mut ItemSnapshot)) {
        let mut items = self.items.lock().unwrap();
        f(items.get_mut(item_id).expect("item registered"));
    }

    pub fn set_latency(&self, item_id: &str, latency: Duration) {
        self.latencies
            .lock()
            .unwrap()
            .insert(item_id.to_string(), latency);
    }

    pub fn fail_item(&self, item_id: &str) {
        self.failing_items
            .lock()
            .unwrap()
            .insert(item_id.to_string());
    }

    pub fn fail_reviews(&self, item_id: &str) {
        self.failing_reviews
            .lock()
            .unwrap()
            .insert(item_id.to_string());
    }

    pub fn set_reviews(&self, item_id: &str, total: i64) {
        self.reviews
            .lock()
            .unwrap()
            .insert(item_id.to_string(), total);
    }

    pub fn set_stock(&self, permalink: &str, quantity: i32) {
        self.stock
            .lock()
            .unwrap()
            .insert(permalink.to_string(), quantity);
    }

    pub fn fail_stock(&self, permalink: &str) {
        self.failing_stock
            .lock()
            .unwrap()
            .insert(permalink.to_string());
    }

    pub fn set_trends(&self, category_id: &str, keywords: &[&str]) {
        self.trends.lock().unwrap().insert(
            category_id.to_string(),
            keywords.iter().map(|k| k.to_string()).collect(),
        );
    }

    pub fn add_token(&self, token: &str, id: DbId, nickname: &str, email: &str) {
        self.tokens.lock().unwrap().insert(
            token.to_string(),
            CallerIdentity {
                id,
                nickname: nickname.to_string(),
                email: email.to_string(),
                first_name: String::new(),
                last_name: String::new(),
            },
        );
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemProvider for FakeMarketplace {
    async fn search_items(&self, query: &str, offset: u32) -> Result<SearchResults, MarketplaceError> {
        let needle = query.to_lowercase();
        let mut matches: Vec<ItemSnapshot> = self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));

        let total = matches.len() as i64;
        Ok(SearchResults {
            query: query.to_string(),
            paging: Paging {
                total,
                offset: offset as i64,
                limit: 50,
            },
            results: matches.into_iter().skip(offset as usize).collect(),
        })
    }

    async fn fetch_item(&self, item_id: &str) -> Result<ItemSnapshot, MarketplaceError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let latency = self.latencies.lock().unwrap().get(item_id).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_items.lock().unwrap().contains(item_id) {
            return Err(MarketplaceError::Api {
                status: 500,
                body: format!("{item_id} unavailable"),
            });
        }

        let item = self.items.lock().unwrap().get(item_id).cloned();
        self.completed.fetch_add(1, Ordering::SeqCst);
        item.ok_or_else(|| MarketplaceError::NotFound {
            resource: "Item",
            id: item_id.to_string(),
        })
    }

    async fn fetch_description(&self, item_id: &str) -> Result<String, MarketplaceError> {
        Ok(format!("Description of {item_id}"))
    }

    async fn fetch_reviews(
        &self,
        item_id: &str,
        _catalog_product_id: Option<&str>,
    ) -> Result<ItemReviews, MarketplaceError> {
        if self.failing_reviews.lock().unwrap().contains(item_id) {
            return Err(MarketplaceError::Api {
                status: 503,
                body: "reviews down".into(),
            });
        }
        let total = self
            .reviews
            .lock()
            .unwrap()
            .get(item_id)
            .copied()
            .unwrap_or(0);
        let mut reviews = ItemReviews::default();
        reviews.paging.total = total;
        Ok(reviews)
    }

    async fn fetch_category(&self, category_id: &str) -> Result<Category, MarketplaceError> {
        match category_id {
            "MLA-HOME" => Ok(Category {
                id: category_id.to_string(),
                name: "Kitchen".to_string(),
                path_from_root: vec![
                    CategoryNode {
                        id: "MLA-ROOT".to_string(),
                        name: "Home".to_string(),
                    },
                    CategoryNode {
                        id: category_id.to_string(),
                        name: "Kitchen".to_string(),
                    },
                ],
            }),
            _ => Err(MarketplaceError::NotFound {
                resource: "Category",
                id: category_id.to_string(),
            }),
        }
    }

    async fn fetch_category_trends(&self, category_id: &str) -> Result<Vec<Trend>, MarketplaceError> {
        let trends = self.trends.lock().unwrap().get(category_id).cloned();
        trends
            .map(|keywords| {
                keywords
                    .into_iter()
                    .map(|keyword| Trend {
                        url: format!("https://listado.example/{keyword}"),
                        keyword,
                    })
                    .collect()
            })
            .ok_or_else(|| MarketplaceError::NotFound {
                resource: "Category trends",
                id: category_id.to_string(),
            })
    }

    async fn fetch_realtime_stock(&self, permalink: &str) -> Result<Option<i32>, MarketplaceError> {
        if self.failing_stock.lock().unwrap().contains(permalink) {
            return Err(MarketplaceError::Decode(format!("no stock on {permalink}")));
        }
        Ok(self.stock.lock().unwrap().get(permalink).copied())
    }
}

#[async_trait]
impl IdentityValidator for FakeMarketplace {
    async fn validate(&self, access_token: &str) -> Result<CallerIdentity, MarketplaceError> {
        self.tokens
            .lock()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or_else(|| MarketplaceError::Unauthorized("unknown token".into()))
    }
}

/// Snapshot of an active item with the given price and stock.
pub fn item(id: &str, price: f64, quantity: i32) -> ItemSnapshot {
    ItemSnapshot {
        id: id.to_string(),
        title: format!("Item {id}"),
        description: String::new(),
        category_id: "MLA-HOME".to_string(),
        root_category: String::new(),
        price,
        original_price: None,
        available_quantity: quantity,
        status: "active".to_string(),
        permalink: format!("https://articulo.example/{id}"),
        thumbnail: String::new(),
        deal_ids: Vec::new(),
        catalog_product_id: None,
        reviews_quantity: 0,
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

pub const OWNER: DbId = 1;
pub const GUEST: DbId = 2;
pub const STRANGER: DbId = 3;

pub const OWNER_TOKEN: &str = "owner-token";
pub const GUEST_TOKEN: &str = "guest-token";
pub const STRANGER_TOKEN: &str = "stranger-token";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        marketplace_base_url: "http://marketplace.invalid".to_string(),
        sync_interval_secs: 3600,
        sync_enabled: false,
        enrich_concurrency: 4,
    }
}

/// Doubles wired together, with three known callers.
pub struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub marketplace: Arc<FakeMarketplace>,
    pub state: AppState,
}

impl TestEnv {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let marketplace = FakeMarketplace::new();
        marketplace.add_token(OWNER_TOKEN, OWNER, "owner", "owner@example.com");
        marketplace.add_token(GUEST_TOKEN, GUEST, "guest", "guest@example.com");
        marketplace.add_token(STRANGER_TOKEN, STRANGER, "stranger", "stranger@example.com");

        let state = AppState {
            store: store.clone(),
            items: marketplace.clone(),
            identity: marketplace.clone(),
            config: Arc::new(test_config()),
        };

        Self {
            store,
            marketplace,
            state,
        }
    }

    /// The full application router with all middleware layers.
    pub fn app(&self) -> Router {
        build_app_router(self.state.clone())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// GET without credentials.
pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
