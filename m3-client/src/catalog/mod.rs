//! Catalog browsing
//!
//! Turns the product collection, the selected category and the window width
//! into a paginated grid.
//!
//! - [`ViewportClassifier`] - width to page size
//! - [`CatalogQuery`] - filtered, newest-first product reads
//! - [`CategoryFilter`] - active category and fetch generations
//! - [`Paginator`] - clamped page navigation
//! - [`CatalogViewModel`] - the composition the grid renders from

mod filter;
mod paginator;
mod query;
mod view_model;
mod viewport;

pub use filter::{CategoryFilter, FetchTicket};
pub use paginator::{Paginator, clamp_page, page, total_pages};
pub use query::{CatalogQuery, sort_newest_first};
pub use view_model::{CatalogSnapshot, CatalogViewModel, FetchOutcome};
pub use viewport::{Density, ViewportClassifier, ViewportSignal, ViewportSubscription};

/// Width below which the grid switches to compact density
pub const COMPACT_BREAKPOINT_PX: u32 = 768;
/// Items per page in compact density
pub const COMPACT_PAGE_SIZE: usize = 10;
/// Items per page in full density
pub const FULL_PAGE_SIZE: usize = 12;

/// Grid settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogConfig {
    pub breakpoint_px: u32,
    pub compact_page_size: usize,
    pub full_page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: COMPACT_BREAKPOINT_PX,
            compact_page_size: COMPACT_PAGE_SIZE,
            full_page_size: FULL_PAGE_SIZE,
        }
    }
}
