//! Storefront configuration.

use serde::{Deserialize, Serialize};

use crate::cart::PricingRules;
use crate::catalog::CategoryFilter;
use crate::money::{Currency, Money};
use crate::search::{PageSize, DESKTOP_PAGE_SIZE, MOBILE_BREAKPOINT_PX, MOBILE_PAGE_SIZE};

/// Storefront settings, usually read from the `[shop]`, `[layout]` and
/// `[cart]` tables of `lumiere.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub shop: ShopSettings,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub cart: CartConfig,
}

impl ShopConfig {
    pub fn currency(&self) -> Currency {
        self.shop.currency
    }

    /// Checkout surcharges in the shop currency.
    pub fn pricing_rules(&self) -> PricingRules {
        self.pricing_rules_in(self.shop.currency)
    }

    /// Checkout surcharges in `currency`. Fees must share the currency of
    /// the prices they are added to.
    pub fn pricing_rules_in(&self, currency: Currency) -> PricingRules {
        PricingRules::new(Money::from_decimal(self.cart.shipping_kit_fee, currency))
    }

    pub fn page_size(&self, viewport_width_px: u32) -> PageSize {
        self.layout.page_size(viewport_width_px)
    }
}

/// General shop settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopSettings {
    /// Currency every price is expressed in.
    #[serde(default)]
    pub currency: Currency,

    /// Category shown when none is requested.
    #[serde(default)]
    pub default_category: CategoryFilter,
}

/// Responsive grid sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Viewports narrower than this use the mobile page size.
    #[serde(default = "default_breakpoint")]
    pub mobile_breakpoint_px: u32,

    #[serde(default = "default_mobile_page_size")]
    pub mobile_page_size: usize,

    #[serde(default = "default_desktop_page_size")]
    pub desktop_page_size: usize,
}

fn default_breakpoint() -> u32 {
    MOBILE_BREAKPOINT_PX
}

fn default_mobile_page_size() -> usize {
    MOBILE_PAGE_SIZE
}

fn default_desktop_page_size() -> usize {
    DESKTOP_PAGE_SIZE
}

impl LayoutConfig {
    pub fn page_size(&self, viewport_width_px: u32) -> PageSize {
        PageSize::for_viewport_with(
            viewport_width_px,
            self.mobile_breakpoint_px,
            self.mobile_page_size,
            self.desktop_page_size,
        )
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: default_breakpoint(),
            mobile_page_size: default_mobile_page_size(),
            desktop_page_size: default_desktop_page_size(),
        }
    }
}

/// Checkout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Per-unit shipping kit fee, in major currency units.
    #[serde(default = "default_shipping_kit_fee")]
    pub shipping_kit_fee: f64,
}

fn default_shipping_kit_fee() -> f64 {
    15.0
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            shipping_kit_fee: default_shipping_kit_fee(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn test_defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.currency(), Currency::EUR);
        assert_eq!(config.shop.default_category, CategoryFilter::Category(Category::Rings));
        assert_eq!(config.pricing_rules(), PricingRules::default());
        assert_eq!(config.page_size(500).get(), 8);
        assert_eq!(config.page_size(1024).get(), 12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ShopConfig = serde_json::from_str(
            r#"{"shop": {"default_category": "new-collection"}, "layout": {"desktop_page_size": 16}}"#,
        )
        .unwrap();

        assert_eq!(config.shop.default_category, CategoryFilter::NewCollection);
        assert_eq!(config.layout.desktop_page_size, 16);
        assert_eq!(config.layout.mobile_page_size, 8);
        assert_eq!(config.cart.shipping_kit_fee, 15.0);
    }

    #[test]
    fn test_pricing_rules_in_other_currency() {
        let mut config = ShopConfig::default();
        config.shop.currency = Currency::USD;

        assert_eq!(config.pricing_rules().currency(), Currency::USD);
        let rules = config.pricing_rules_in(Currency::EUR);
        assert_eq!(rules.currency(), Currency::EUR);
        assert_eq!(rules, PricingRules::default());
    }
}
