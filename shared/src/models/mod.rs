//! Data models
//!
//! Documents stored in the hosted database. Field names are camelCase on
//! the wire; ids live in the document envelope and are injected on decode.
//! Prices are `Decimal`, serialized as JSON numbers.

pub mod cart;
pub mod category;
pub mod chat;
pub mod order;
pub mod product;
pub mod user;
pub mod wishlist;

// Re-exports
pub use cart::*;
pub use category::*;
pub use chat::*;
pub use order::*;
pub use product::*;
pub use user::*;
pub use wishlist::*;
