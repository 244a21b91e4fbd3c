//! Cart store and line item types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{Category, Product};
use crate::events::{CartEvent, Observers, SubscriptionId};
use crate::ids::{LineKey, ProductId, DEFAULT_COLOR};
use crate::money::Money;

/// One cart entry, identified by product, color and size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Composite key `product|color|size`.
    pub key: LineKey,
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image shown in the bag.
    pub image: String,
    pub color: String,
    pub size: Option<u16>,
    /// Quantity, at least 1 while the item is in a cart.
    pub quantity: u32,
    pub category: Category,
    /// Free-form service choice (e.g., "shipping-kit"); drives the kit fee.
    pub service_option: Option<String>,
}

impl LineItem {
    /// Create a line item in the default color, one size, quantity 1.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: Category,
    ) -> Self {
        let product_id = product_id.into();
        Self {
            key: LineKey::derive(&product_id, None, None),
            product_id,
            name: name.into(),
            price,
            image: String::new(),
            color: DEFAULT_COLOR.to_string(),
            size: None,
            quantity: 1,
            category,
            service_option: None,
        }
    }

    /// Create a line item for a catalog product in a given color and size.
    ///
    /// The image is the color's main image, or the thumbnail.
    pub fn from_product(product: &Product, color: Option<&str>, size: Option<u16>) -> Self {
        Self::new(
            product.id.clone(),
            product.name.clone(),
            product.price_value,
            product.category,
        )
        .with_image(product.main_image(color))
        .with_variant(color, size)
    }

    /// Set color and size, re-deriving the key.
    pub fn with_variant(mut self, color: Option<&str>, size: Option<u16>) -> Self {
        self.color = color
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLOR)
            .to_string();
        self.size = size;
        self.rekey();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_service_option(mut self, option: impl Into<String>) -> Self {
        self.service_option = Some(option.into());
        self
    }

    fn rekey(&mut self) {
        self.key = LineKey::derive(&self.product_id, Some(&self.color), self.size);
    }
}

/// Fields replaced by [`CartStore::update_variant`]. `None` keeps the
/// current value.
///
/// `size` is nested: `Some(None)` moves the line to one size. In JSON an
/// absent `size` keeps it and `"size": null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantUpdate {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<Option<u16>>,
    #[serde(default)]
    pub image: Option<String>,
}

impl VariantUpdate {
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn size(size: u16) -> Self {
        Self {
            size: Some(Some(size)),
            ..Self::default()
        }
    }

    /// Move the line to one size.
    pub fn no_size() -> Self {
        Self {
            size: Some(None),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

// A field that is present, even as null, is `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Sum of quantities, saturating at `u32::MAX`.
pub(crate) fn total_quantity(items: &[LineItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |total, item| total.saturating_add(item.quantity))
}

/// The shopping cart.
///
/// Every operation is total: unknown keys are no-ops. Observers see a
/// [`CartEvent`] after each effective change.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
    observers: Observers<CartEvent>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart with initial contents, merging duplicate keys.
    pub fn with_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.merge_in(item);
        }
        cart
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&CartEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Add an item, summing quantities with an existing line of the same key.
    ///
    /// Items with an empty key are ignored. Emits [`CartEvent::ItemAdded`],
    /// which is the bag drawer's cue to open.
    pub fn add_item(&mut self, item: LineItem) {
        if item.key.is_empty() {
            tracing::debug!(product = %item.product_id, "ignoring cart item without key");
            return;
        }
        let key = item.key.clone();
        let quantity = self.merge_in(item);
        tracing::debug!(%key, quantity, "cart item added");
        self.observers.notify(&CartEvent::ItemAdded { key, quantity });
    }

    /// Remove a line. No-op if absent.
    pub fn remove_item(&mut self, key: &LineKey) {
        let len_before = self.items.len();
        self.items.retain(|i| &i.key != key);
        if self.items.len() < len_before {
            self.observers
                .notify(&CartEvent::ItemRemoved { key: key.clone() });
        }
    }

    /// Increase a line's quantity by one.
    pub fn inc(&mut self, key: &LineKey) {
        let Some(item) = self.items.iter_mut().find(|i| &i.key == key) else {
            return;
        };
        item.quantity = item.quantity.saturating_add(1).max(1);
        let quantity = item.quantity;
        self.observers.notify(&CartEvent::QuantityChanged {
            key: key.clone(),
            quantity,
        });
    }

    /// Decrease a line's quantity by one. A line never drops to zero; it is
    /// removed instead.
    pub fn dec(&mut self, key: &LineKey) {
        let Some(item) = self.items.iter_mut().find(|i| &i.key == key) else {
            return;
        };
        if item.quantity <= 1 {
            self.remove_item(key);
            return;
        }
        item.quantity -= 1;
        let quantity = item.quantity;
        self.observers.notify(&CartEvent::QuantityChanged {
            key: key.clone(),
            quantity,
        });
    }

    /// Change a line's color, size or image.
    ///
    /// If the new key belongs to another line, the two collapse into that
    /// line with summed quantities and the update's fields.
    pub fn update_variant(&mut self, old_key: &LineKey, update: VariantUpdate) {
        let Some(index) = self.items.iter().position(|i| &i.key == old_key) else {
            return;
        };

        let current = &self.items[index];
        let color = update.color.unwrap_or_else(|| current.color.clone());
        let size = update.size.unwrap_or(current.size);
        let image = update.image.unwrap_or_else(|| current.image.clone());
        let new_key = LineKey::derive(&current.product_id, Some(&color), size);

        let collision = self
            .items
            .iter()
            .position(|i| i.key == new_key)
            .filter(|&other| other != index);

        match collision {
            Some(target) => {
                let moved = self.items[index].quantity.max(1);
                let existing = &mut self.items[target];
                existing.quantity = existing.quantity.max(1).saturating_add(moved);
                existing.color = color;
                existing.size = size;
                existing.image = image;
                self.items.remove(index);
                tracing::debug!(from = %old_key, to = %new_key, "cart lines collapsed");
            }
            None => {
                let item = &mut self.items[index];
                item.color = color;
                item.size = size;
                item.image = image;
                item.key = new_key.clone();
            }
        }

        self.observers.notify(&CartEvent::VariantChanged {
            from: old_key.clone(),
            to: new_key,
        });
    }

    /// Set or clear a line's service option.
    pub fn update_service_option(&mut self, key: &LineKey, option: Option<String>) {
        let Some(item) = self.items.iter_mut().find(|i| &i.key == key) else {
            return;
        };
        item.service_option = option.clone();
        self.observers.notify(&CartEvent::ServiceOptionChanged {
            key: key.clone(),
            option,
        });
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        self.observers.notify(&CartEvent::Cleared);
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.key == key)
    }

    /// Sum of quantities, saturating at `u32::MAX`.
    pub fn item_count(&self) -> u32 {
        total_quantity(&self.items)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Merge or append without notifying. Returns the line's new quantity.
    fn merge_in(&mut self, item: LineItem) -> u32 {
        if let Some(existing) = self.items.iter_mut().find(|i| i.key == item.key) {
            existing.quantity = existing.quantity.max(1).saturating_add(item.quantity.max(1));
            existing.quantity
        } else {
            let mut item = item;
            item.quantity = item.quantity.max(1);
            let quantity = item.quantity;
            self.items.push(item);
            quantity
        }
    }
}
