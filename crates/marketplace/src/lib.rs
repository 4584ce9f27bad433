//! Client for the marketplace REST API.
//!
//! The service layer depends on the [`ItemProvider`] and
//! [`IdentityValidator`] traits; [`MarketplaceClient`] implements both over
//! HTTP.

pub mod api;
pub mod error;
pub mod provider;
pub mod types;

pub use api::{MarketplaceClient, MarketplaceConfig};
pub use error::MarketplaceError;
pub use provider::{IdentityValidator, ItemProvider};
pub use types::{
    CallerIdentity, Category, CategoryNode, ItemReviews, Paging, Review, SearchResults, Trend,
};
