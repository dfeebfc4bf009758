//! M3 Outfit storefront client
//!
//! Client-side core of the storefront: the catalog grid view model plus
//! the cart, wishlist, checkout, order history, profile and chat services.
//! All persistence is delegated to a hosted document store.

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod checkout;
pub mod config;
pub mod error;
pub mod logger;
pub mod orders;
pub mod profile;
pub mod session;
pub mod store;
pub mod storefront;
pub mod wishlist;

pub use cart::CartService;
pub use catalog::{CatalogConfig, CatalogQuery, CatalogSnapshot, CatalogViewModel, FetchOutcome};
pub use chat::{ChatAssistant, ChatRelay, HttpChatRelay};
pub use checkout::CheckoutService;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, QueryError, StoreError, StoreResult};
pub use orders::OrderService;
pub use profile::ProfileService;
pub use session::{AuthProvider, AuthUser, Session, SessionUser};
pub use store::{DocumentStore, MemoryStore, ProductFilter, ProductStore, RestStore};
pub use storefront::Storefront;
pub use wishlist::WishlistService;

// Re-export shared models for convenience
pub use shared::models;
