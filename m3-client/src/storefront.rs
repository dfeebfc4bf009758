//! Storefront wiring
//!
//! Builds every service over one store and one session, the way the app
//! shell mounts its pages.

use crate::catalog::CatalogViewModel;
use crate::error::ClientResult;
use crate::session::{AuthProvider, Session};
use crate::store::{DocumentStore, RestStore};
use crate::{
    CartService, CheckoutService, ClientConfig, OrderService, ProfileService, WishlistService,
};
use std::sync::Arc;

pub struct Storefront {
    pub session: Session,
    pub catalog: CatalogViewModel<dyn DocumentStore>,
    pub cart: CartService,
    pub wishlist: WishlistService,
    pub checkout: CheckoutService,
    pub orders: OrderService,
    pub profile: ProfileService,
}

impl Storefront {
    /// Open against the hosted REST store from `config`
    pub async fn connect(
        config: &ClientConfig,
        auth: Arc<dyn AuthProvider>,
        width_px: u32,
    ) -> ClientResult<Self> {
        let store: Arc<dyn DocumentStore> = Arc::new(RestStore::new(config)?);
        Self::open(store, auth, config, width_px).await
    }

    /// Start the session and load the first catalog page. A failed catalog
    /// load is reported through the catalog's error state, not here.
    pub async fn open(
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthProvider>,
        config: &ClientConfig,
        width_px: u32,
    ) -> ClientResult<Self> {
        let session = Session::init(auth, Arc::clone(&store)).await?;
        let catalog = CatalogViewModel::new(Arc::clone(&store), config.catalog, width_px);
        catalog.mount().await;

        Ok(Self {
            session,
            catalog,
            cart: CartService::new(Arc::clone(&store)),
            wishlist: WishlistService::new(Arc::clone(&store)),
            checkout: CheckoutService::new(Arc::clone(&store)),
            orders: OrderService::new(Arc::clone(&store)),
            profile: ProfileService::new(store),
        })
    }

    /// Release the session
    pub fn close(self) {
        self.session.teardown();
    }
}
