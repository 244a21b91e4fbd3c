//! CLI configuration.

use anyhow::{Context, Result};
use lumiere_commerce::config::{CartConfig, LayoutConfig, ShopConfig, ShopSettings};
use lumiere_executor::DEFAULT_PRELOAD_CONCURRENCY;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["lumiere.toml", ".lumiere.toml", "lumiere.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Currency and default category.
    #[serde(default)]
    pub shop: ShopSettings,

    /// Grid sizing.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Checkout fees.
    #[serde(default)]
    pub cart: CartConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Favorites storage.
    #[serde(default)]
    pub favorites: FavoritesConfig,

    /// Image preloading.
    #[serde(default)]
    pub preload: PreloadConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// The storefront part of the configuration.
    pub fn shop_config(&self) -> ShopConfig {
        ShopConfig {
            shop: self.shop.clone(),
            layout: self.layout.clone(),
            cart: self.cart.clone(),
        }
    }
}

/// Where product data comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file of product definitions. The built-in catalog when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Favorites storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Directory holding the favorites slot.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    ".lumiere/data".to_string()
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Image preloading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreloadConfig {
    /// Maximum concurrent loads.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Directory image references are resolved against.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

fn default_concurrency() -> usize {
    DEFAULT_PRELOAD_CONCURRENCY
}

fn default_assets_dir() -> String {
    "public".to_string()
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            assets_dir: default_assets_dir(),
        }
    }
}

/// Generate a default lumiere.toml config file.
pub fn generate_default_config() -> String {
    r#"# Lumiere storefront configuration

[shop]
currency = "EUR"
default_category = "rings"

[layout]
mobile_breakpoint_px = 768
mobile_page_size = 8
desktop_page_size = 12

[cart]
# Per-unit fee for personal pieces shipped with a kit
shipping_kit_fee = 15.0

[catalog]
# path = "catalog.json"

[favorites]
data_dir = ".lumiere/data"

[preload]
concurrency = 3
assets_dir = "public"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumiere_commerce::catalog::CategoryFilter;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.shop_config(), ShopConfig::default());
        assert_eq!(config.preload.concurrency, 3);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.layout.desktop_page_size, 12);
        assert_eq!(config.favorites.data_dir, ".lumiere/data");
    }

    #[test]
    fn test_overrides() {
        let config: CliConfig = toml::from_str(
            r#"
            [shop]
            default_category = "best-sellers"

            [cart]
            shipping_kit_fee = 20.0
            "#,
        )
        .unwrap();
        assert_eq!(config.shop.default_category, CategoryFilter::BestSellers);
        assert_eq!(config.shop_config().pricing_rules().shipping_kit_fee.amount_cents, 2000);
    }
}
