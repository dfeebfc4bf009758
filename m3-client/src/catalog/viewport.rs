//! Viewport density
//!
//! Narrow windows get a 10-item grid, everything else 12. Width changes
//! arrive through a [`ViewportSignal`]; holding a [`ViewportSubscription`]
//! keeps the listener registered and dropping it unsubscribes.

use super::CatalogConfig;
use tokio::sync::watch;

/// Grid density derived from viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Compact,
    Full,
}

/// Maps widths to page sizes and remembers the last width seen
#[derive(Debug, Clone)]
pub struct ViewportClassifier {
    config: CatalogConfig,
    last_width: Option<u32>,
}

impl ViewportClassifier {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            last_width: None,
        }
    }

    /// Pure classification, no state touched
    pub fn classify(&self, width_px: u32) -> Density {
        if width_px < self.config.breakpoint_px {
            Density::Compact
        } else {
            Density::Full
        }
    }

    pub fn page_size_for(&self, density: Density) -> usize {
        match density {
            Density::Compact => self.config.compact_page_size,
            Density::Full => self.config.full_page_size,
        }
    }

    /// Page size for a width, no state touched
    pub fn page_size(&self, width_px: u32) -> usize {
        self.page_size_for(self.classify(width_px))
    }

    /// Record a resize notification and return the page size for it
    pub fn observe(&mut self, width_px: u32) -> usize {
        self.last_width = Some(width_px);
        self.page_size(width_px)
    }

    pub fn last_width(&self) -> Option<u32> {
        self.last_width
    }

    /// Page size for the last observed width; full density before any resize
    pub fn current_page_size(&self) -> usize {
        match self.last_width {
            Some(w) => self.page_size(w),
            None => self.config.full_page_size,
        }
    }
}

impl Default for ViewportClassifier {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

/// Source of window width changes
#[derive(Debug)]
pub struct ViewportSignal {
    tx: watch::Sender<u32>,
}

impl ViewportSignal {
    pub fn new(initial_width: u32) -> Self {
        let (tx, _rx) = watch::channel(initial_width);
        Self { tx }
    }

    /// Publish a new width to every live subscription
    pub fn resize(&self, width_px: u32) {
        self.tx.send_replace(width_px);
    }

    pub fn width(&self) -> u32 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> ViewportSubscription {
        ViewportSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Registered resize listener; unsubscribes on drop
#[derive(Debug)]
pub struct ViewportSubscription {
    rx: watch::Receiver<u32>,
}

impl ViewportSubscription {
    /// Width at the time of the last `changed()` (or subscription)
    pub fn width(&self) -> u32 {
        *self.rx.borrow()
    }

    /// Wait for the next width; `None` once the signal is gone
    pub async fn changed(&mut self) -> Option<u32> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
