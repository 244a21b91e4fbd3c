//! Shopping cart module.
//!
//! Contains the cart store, line items, checkout pricing and the bag drawer.

mod cart;
mod drawer;
mod pricing;

pub use cart::{CartStore, LineItem, VariantUpdate};
pub use drawer::BagDrawer;
pub use pricing::{is_shipping_kit, CartPricing, LinePricing, PricingRules, KIT_OPTION_TOKENS};
