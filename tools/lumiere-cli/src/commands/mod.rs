//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod preload;
pub mod product;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Category slug (rings, earrings, necklaces, bracelets, personal, new-collection, best-sellers).
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Lowest price to show.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price to show.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Color key (e.g. silver, gold).
    #[arg(short, long)]
    pub material: Option<String>,

    /// Appearance predicate; repeatable (with_gem, without_gem, rough, smooth).
    #[arg(short, long)]
    pub appearance: Vec<String>,

    /// Gem identifier; repeatable.
    #[arg(short, long)]
    pub gem: Vec<String>,

    /// Ring size.
    #[arg(short, long)]
    pub size: Option<u16>,

    /// Sort option (price_asc, price_desc, best_selling, date_asc, date_desc).
    #[arg(long)]
    pub sort: Option<String>,

    /// Page to show (1-indexed).
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Viewport width in pixels, for page sizing.
    #[arg(long, default_value_t = 1280)]
    pub viewport: u32,

    /// Print facet counts.
    #[arg(short, long)]
    pub facets: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the favorites command.
#[derive(Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: Option<FavoritesCommand>,
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// List saved favorites.
    List,
    /// Save a product.
    Add {
        /// Product ID.
        id: String,
    },
    /// Forget a product.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Save a product, or forget it if already saved.
    Toggle {
        /// Product ID.
        id: String,
    },
    /// Forget every product.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Replay a JSON list of cart operations and print the checkout summary.
    Price {
        /// Operations file.
        file: String,

        /// Print the cart event log.
        #[arg(long)]
        events: bool,
    },
}

/// Arguments for the preload command.
#[derive(Args)]
pub struct PreloadArgs {
    /// Assets directory (overrides config).
    #[arg(short, long)]
    pub assets: Option<String>,

    /// Maximum concurrent loads (overrides config).
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
