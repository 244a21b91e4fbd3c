//! Cart pricing calculations.

use serde::{Deserialize, Serialize};

use crate::cart::cart::total_quantity;
use crate::cart::LineItem;
use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::LineKey;
use crate::money::{Currency, Money};

/// Literal service options that select the shipping kit without saying
/// "shipping".
pub const KIT_OPTION_TOKENS: [&str; 2] = ["fingerprint-kit", "impression-kit"];

/// Per-unit surcharges applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Added to each unit of a personal item that ships with a kit.
    pub shipping_kit_fee: Money,
}

impl PricingRules {
    pub fn new(shipping_kit_fee: Money) -> Self {
        Self { shipping_kit_fee }
    }

    pub fn currency(&self) -> Currency {
        self.shipping_kit_fee.currency
    }

    /// Fee added to each unit of a line.
    pub fn unit_fee(&self, item: &LineItem) -> Money {
        let applies = item.category == Category::Personal
            && item.service_option.as_deref().is_some_and(is_shipping_kit);
        if applies {
            self.shipping_kit_fee
        } else {
            Money::zero(self.currency())
        }
    }

    /// Price every line and the subtotal.
    ///
    /// Fails only on overflow or on a line priced in another currency.
    pub fn price(&self, items: &[LineItem]) -> Result<CartPricing, CommerceError> {
        let currency = self.currency();
        let mut lines = Vec::with_capacity(items.len());

        for item in items {
            if item.price.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: item.price.currency.code().to_string(),
                });
            }
            let fee = self.unit_fee(item);
            let unit_total = item.price.try_add(&fee).ok_or(CommerceError::Overflow)?;
            let total = unit_total
                .try_multiply(i64::from(item.quantity))
                .ok_or(CommerceError::Overflow)?;
            lines.push(LinePricing {
                key: item.key.clone(),
                unit_price: item.price,
                unit_fee: fee,
                quantity: item.quantity,
                total,
            });
        }

        let subtotal = Money::try_sum(lines.iter().map(|l| &l.total), currency)
            .ok_or(CommerceError::Overflow)?;
        let fee_total = lines
            .iter()
            .try_fold(Money::zero(currency), |acc, l| {
                l.unit_fee
                    .try_multiply(i64::from(l.quantity))
                    .and_then(|f| acc.try_add(&f))
            })
            .ok_or(CommerceError::Overflow)?;

        Ok(CartPricing {
            subtotal,
            fee_total,
            item_count: total_quantity(items),
            lines,
        })
    }
}

impl Default for PricingRules {
    fn default() -> Self {
        Self::new(Money::new(1500, Currency::EUR))
    }
}

/// Check whether a service option asks for the shipping kit.
///
/// Matches "shipping" anywhere (any case) or one of [`KIT_OPTION_TOKENS`]
/// exactly.
pub fn is_shipping_kit(option: &str) -> bool {
    option.to_lowercase().contains("shipping") || KIT_OPTION_TOKENS.contains(&option)
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals, fees included.
    pub subtotal: Money,
    /// Portion of the subtotal that is kit fees.
    pub fee_total: Money,
    /// Sum of quantities.
    pub item_count: u32,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
}

impl CartPricing {
    pub fn has_fees(&self) -> bool {
        !self.fee_total.is_zero()
    }
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub key: LineKey,
    pub unit_price: Money,
    pub unit_fee: Money,
    pub quantity: u32,
    /// `(unit_price + unit_fee) * quantity`.
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, cents: i64, quantity: u32, category: Category) -> LineItem {
        LineItem::new(id, id, Money::new(cents, Currency::EUR), category).with_quantity(quantity)
    }

    #[test]
    fn test_shipping_kit_detection() {
        assert!(is_shipping_kit("shipping-kit"));
        assert!(is_shipping_kit("Free SHIPPING please"));
        assert!(is_shipping_kit("fingerprint-kit"));
        assert!(is_shipping_kit("impression-kit"));
        assert!(!is_shipping_kit("Impression-Kit"));
        assert!(!is_shipping_kit("gift-wrap"));
    }

    #[test]
    fn test_fee_only_for_personal() {
        let rules = PricingRules::default();
        let ring = item("ring-aurora", 5800, 1, Category::Rings).with_service_option("shipping-kit");
        let pendant = item("personal-initial-pendant", 7000, 1, Category::Personal)
            .with_service_option("shipping-kit");
        let plain = item("personal-initial-pendant", 7000, 1, Category::Personal);

        assert!(rules.unit_fee(&ring).is_zero());
        assert_eq!(rules.unit_fee(&pendant).amount_cents, 1500);
        assert!(rules.unit_fee(&plain).is_zero());
    }

    #[test]
    fn test_fee_is_per_unit() {
        let rules = PricingRules::default();
        let pendant = item("personal-engraved-bar", 6200, 3, Category::Personal)
            .with_service_option("impression-kit");
        let pricing = rules.price(&[pendant]).unwrap();

        assert_eq!(pricing.subtotal.amount_cents, (6200 + 1500) * 3);
        assert_eq!(pricing.fee_total.amount_cents, 1500 * 3);
        assert!(pricing.has_fees());
        assert_eq!(pricing.item_count, 3);
    }

    #[test]
    fn test_currency_mismatch() {
        let rules = PricingRules::default();
        let foreign = LineItem::new("ring-x", "Ring X", Money::new(100, Currency::USD), Category::Rings);
        assert!(matches!(
            rules.price(&[foreign]),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_item_count_saturates() {
        let lines = [
            item("ring-aurora", 1, u32::MAX, Category::Rings),
            item("ring-pebble", 1, u32::MAX, Category::Rings),
        ];
        let pricing = PricingRules::default().price(&lines).unwrap();

        assert_eq!(pricing.item_count, u32::MAX);
        assert_eq!(pricing.subtotal.amount_cents, 2 * i64::from(u32::MAX));
    }

    #[test]
    fn test_empty_cart() {
        let pricing = PricingRules::default().price(&[]).unwrap();
        assert!(pricing.subtotal.is_zero());
        assert!(pricing.lines.is_empty());
    }
}
