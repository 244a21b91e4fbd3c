//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let config = &ctx.config;
    ctx.output.header("Current Configuration");

    ctx.output.info("");
    ctx.output.info("[shop]");
    ctx.output.kv("currency", config.shop.currency.code());
    ctx.output.kv("default_category", config.shop.default_category.as_str());

    ctx.output.info("");
    ctx.output.info("[layout]");
    ctx.output.kv("mobile_breakpoint_px", &config.layout.mobile_breakpoint_px.to_string());
    ctx.output.kv("mobile_page_size", &config.layout.mobile_page_size.to_string());
    ctx.output.kv("desktop_page_size", &config.layout.desktop_page_size.to_string());

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("shipping_kit_fee", &config.cart.shipping_kit_fee.to_string());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("path", config.catalog.path.as_deref().unwrap_or("(built-in)"));

    ctx.output.info("");
    ctx.output.info("[favorites]");
    ctx.output.kv("data_dir", &config.favorites.data_dir);

    ctx.output.info("");
    ctx.output.info("[preload]");
    ctx.output.kv("concurrency", &config.preload.concurrency.to_string());
    ctx.output.kv("assets_dir", &config.preload.assets_dir);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("lumiere.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
