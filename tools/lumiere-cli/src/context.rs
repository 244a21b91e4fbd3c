//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use lumiere_cache::FileStore;
use lumiere_commerce::catalog::Catalog;
use lumiere_commerce::storefront::Storefront;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some(config),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Load the configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        let currency = self.config.shop_config().currency();
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
                Catalog::from_json(&content, currency)
                    .with_context(|| format!("Invalid catalog: {}", path.display()))
            }
            None => Catalog::builtin().context("Built-in catalog is invalid"),
        }
    }

    /// Favorites storage under the configured data directory.
    pub fn favorites_store(&self) -> Result<FileStore> {
        let dir = self.resolve_path(&self.config.favorites.data_dir);
        FileStore::open(&dir)
            .with_context(|| format!("Failed to open data directory: {}", dir.display()))
    }

    /// A storefront session over the configured catalog and favorites.
    pub fn storefront(&self) -> Result<Storefront<FileStore>> {
        let catalog = self.catalog()?;
        self.output.debug(&format!("Loaded {} products", catalog.len()));
        Ok(Storefront::new(
            catalog,
            self.config.shop_config(),
            self.favorites_store()?,
        ))
    }
}
