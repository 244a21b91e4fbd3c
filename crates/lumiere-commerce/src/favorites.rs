//! Persisted favorites list.

use lumiere_cache::{cache_key, Cache, KeyValueStore};

use crate::error::CommerceError;
use crate::events::{FavoritesEvent, Observers, SubscriptionId};
use crate::ids::ProductId;

/// Storage slot holding the favorites list.
pub fn favorites_key() -> String {
    cache_key!("favorites", "ids")
}

/// Ordered, duplicate-free list of favorite product IDs.
///
/// The list is written back to its slot after every change. Write failures
/// are logged and otherwise ignored; the in-memory list stays authoritative.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    ids: Vec<ProductId>,
    cache: Cache<S>,
    key: String,
    observers: Observers<FavoritesEvent>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Read the list from the store.
    ///
    /// A missing, unreadable or corrupt slot yields an empty list.
    pub fn load(store: S) -> Self {
        let cache = Cache::new(store);
        let key = favorites_key();

        let ids = match cache.get::<Vec<ProductId>>(&key) {
            Ok(Some(ids)) => dedup(ids),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "discarding unreadable favorites");
                Vec::new()
            }
        };
        tracing::debug!(count = ids.len(), "favorites loaded");

        Self {
            ids,
            cache,
            key,
            observers: Observers::new(),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&FavoritesEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Add a product. Returns false if it was already a favorite.
    pub fn add(&mut self, id: impl Into<ProductId>) -> bool {
        let id = id.into();
        if id.is_empty() || self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id.clone());
        self.persist();
        self.observers.notify(&FavoritesEvent::Added { id });
        true
    }

    /// Remove a product. Returns false if it was not a favorite.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let Some(pos) = self.ids.iter().position(|f| f == id) else {
            return false;
        };
        let id = self.ids.remove(pos);
        self.persist();
        self.observers.notify(&FavoritesEvent::Removed { id });
        true
    }

    /// Flip membership. Returns true if the product is now a favorite.
    pub fn toggle(&mut self, id: impl Into<ProductId>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            self.remove(&id);
            false
        } else {
            self.add(id)
        }
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
        self.observers.notify(&FavoritesEvent::Cleared);
    }

    /// Favorites in the order they were added.
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Write the list, reporting failure.
    pub fn flush(&self) -> Result<(), CommerceError> {
        self.cache.set(&self.key, &self.ids)?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, key = %self.key, "failed to persist favorites");
        }
    }
}

fn dedup(ids: Vec<ProductId>) -> Vec<ProductId> {
    let mut out: Vec<ProductId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !id.is_empty() && !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
