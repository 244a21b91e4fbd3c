//! Bag drawer visibility.

use std::cell::{Cell, RefCell};

use crate::events::{DrawerEvent, Observers, SubscriptionId};

/// Open/closed flag for the slide-out bag.
///
/// Shared behind an `Rc` between the cart's observer and the UI, so every
/// method takes `&self`. The flag is updated before observers run, and
/// observers may read it through any shared handle.
#[derive(Debug, Default)]
pub struct BagDrawer {
    open: Cell<bool>,
    observers: RefCell<Observers<DrawerEvent>>,
}

impl BagDrawer {
    pub fn new(open: bool) -> Self {
        Self {
            open: Cell::new(open),
            observers: RefCell::new(Observers::new()),
        }
    }

    pub fn subscribe(&self, callback: impl FnMut(&DrawerEvent) + 'static) -> SubscriptionId {
        self.observers.borrow_mut().subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.borrow_mut().unsubscribe(id)
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn open(&self) {
        self.set(true);
    }

    pub fn close(&self) {
        self.set(false);
    }

    pub fn toggle(&self) {
        self.set(!self.open.get());
    }

    // Observers only hear about actual transitions.
    fn set(&self, open: bool) {
        if self.open.replace(open) == open {
            return;
        }
        let event = if open {
            DrawerEvent::Opened
        } else {
            DrawerEvent::Closed
        };
        tracing::debug!(?event, "bag drawer");
        self.observers.borrow_mut().notify(&event);
    }
}
