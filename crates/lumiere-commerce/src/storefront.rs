//! Application-level composition of the catalog and the stores.

use std::rc::Rc;

use lumiere_cache::KeyValueStore;

use crate::cart::{BagDrawer, CartPricing, CartStore, LineItem, PricingRules};
use crate::catalog::{Catalog, CategoryFilter};
use crate::config::ShopConfig;
use crate::error::CommerceError;
use crate::events::CartEvent;
use crate::favorites::FavoritesStore;
use crate::ids::LineKey;
use crate::search::{browse, CatalogView, FilterState};

/// One storefront session: catalog, cart, bag drawer and favorites.
///
/// Constructed once at startup. Adding to the cart opens the bag drawer.
/// Checkout fees are charged in the catalog's currency, since that is the
/// currency every line is priced in.
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Catalog,
    config: ShopConfig,
    pricing: PricingRules,
    cart: CartStore,
    drawer: Rc<BagDrawer>,
    favorites: FavoritesStore<S>,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Wire up a session. Favorites are loaded from `favorites_store`.
    pub fn new(catalog: Catalog, config: ShopConfig, favorites_store: S) -> Self {
        let drawer = Rc::new(BagDrawer::default());
        let mut cart = CartStore::new();

        let opener = Rc::clone(&drawer);
        cart.subscribe(move |event| {
            if let CartEvent::ItemAdded { .. } = event {
                opener.open();
            }
        });

        if config.currency() != catalog.currency() {
            tracing::warn!(
                configured = %config.currency(),
                catalog = %catalog.currency(),
                "shop currency differs from catalog currency; pricing in catalog currency"
            );
        }

        Self {
            pricing: config.pricing_rules_in(catalog.currency()),
            favorites: FavoritesStore::load(favorites_store),
            catalog,
            config,
            cart,
            drawer,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Filter state for the configured default category.
    pub fn initial_filter_state(&self) -> FilterState {
        FilterState::new(&self.catalog, self.config.shop.default_category)
    }

    /// Filter state for a category.
    pub fn filter_state_for(&self, category: CategoryFilter) -> FilterState {
        FilterState::new(&self.catalog, category)
    }

    /// Run the listing pipeline for a viewport width.
    pub fn browse(&self, state: &FilterState, viewport_width_px: u32) -> CatalogView<'_> {
        browse(&self.catalog, state, self.config.page_size(viewport_width_px))
    }

    /// Add a catalog product to the cart.
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        color: Option<&str>,
        size: Option<u16>,
        quantity: u32,
    ) -> Result<LineKey, CommerceError> {
        let product = self.catalog.require(product_id)?;
        let item = LineItem::from_product(product, color, size).with_quantity(quantity);
        let key = item.key.clone();
        self.cart.add_item(item);
        Ok(key)
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Price the cart with the configured fees.
    pub fn checkout_summary(&self) -> Result<CartPricing, CommerceError> {
        self.pricing.price(self.cart.items())
    }

    /// Shared handle to the bag drawer.
    pub fn drawer(&self) -> Rc<BagDrawer> {
        Rc::clone(&self.drawer)
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer.is_open()
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore<S> {
        &mut self.favorites
    }
}
