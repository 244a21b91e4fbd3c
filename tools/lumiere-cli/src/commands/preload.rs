//! Image preload command.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Result};
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use lumiere_commerce::catalog::Catalog;
use lumiere_executor::{ImageLoader, PreloadError, PreloadHandle, PreloadOutcome, PreloadQueue};

use super::PreloadArgs;
use crate::context::Context;

/// Resolves image references against an assets directory.
///
/// `/images/a.webp` maps to `<root>/images/a.webp`. A load succeeds when the
/// file exists and is non-empty.
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, image: &str) -> PathBuf {
        self.root.join(image.trim_start_matches('/'))
    }
}

#[async_trait]
impl ImageLoader for AssetLoader {
    async fn load(&self, image: &str) -> Result<(), PreloadError> {
        let path = self.path_for(image);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
            Ok(_) => Err(PreloadError::LoadFailed {
                image: image.to_string(),
                reason: "empty or not a file".to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PreloadError::NotFound(image.to_string()))
            }
            Err(e) => Err(PreloadError::LoadFailed {
                image: image.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Every distinct image in the catalog, in catalog order.
fn catalog_images(catalog: &Catalog) -> Vec<String> {
    let mut seen = HashSet::new();
    catalog
        .products()
        .iter()
        .flat_map(|p| p.all_images())
        .filter(|image| seen.insert(*image))
        .map(str::to_string)
        .collect()
}

/// Run the preload command.
pub async fn run(args: PreloadArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let assets = ctx.resolve_path(args.assets.as_deref().unwrap_or(&ctx.config.preload.assets_dir));
    let concurrency = args.concurrency.unwrap_or(ctx.config.preload.concurrency);

    if !assets.is_dir() {
        bail!("Assets directory not found: {}", assets.display());
    }

    let images = catalog_images(&catalog);
    ctx.output.header(&format!("Preloading {} images", images.len()));
    ctx.output.kv("Assets", &assets.display().to_string());
    ctx.output.kv("Concurrency", &concurrency.to_string());

    let start = Instant::now();
    let outcomes = preload(&assets, images, concurrency, ctx).await;
    let failed: Vec<&PreloadOutcome> = outcomes.iter().filter(|o| !o.is_loaded()).collect();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "total": outcomes.len(),
            "loaded": outcomes.len() - failed.len(),
            "failed": failed
                .iter()
                .map(|o| serde_json::json!({
                    "image": o.image,
                    "error": o.result.as_ref().err().map(ToString::to_string),
                }))
                .collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    for outcome in &failed {
        if let Err(e) = &outcome.result {
            ctx.output.warn(&e.to_string());
        }
    }

    let summary = format!(
        "Loaded {}/{} images in {:.1}s",
        outcomes.len() - failed.len(),
        outcomes.len(),
        start.elapsed().as_secs_f64()
    );
    if failed.is_empty() {
        ctx.output.success(&summary);
    } else {
        ctx.output.warn(&summary);
    }

    Ok(())
}

/// Push every image through the bounded queue, ticking a progress bar as
/// jobs finish. Outcomes are returned in completion order.
async fn preload(
    root: &Path,
    images: Vec<String>,
    concurrency: usize,
    ctx: &Context,
) -> Vec<PreloadOutcome> {
    let queue = PreloadQueue::with_concurrency(AssetLoader::new(root), concurrency);
    let pb = ctx.output.progress(images.len() as u64, "preloading");

    let mut pending: FuturesUnordered<_> = images
        .into_iter()
        .map(|image| queue.enqueue(image))
        .map(PreloadHandle::wait)
        .collect();

    let mut outcomes = Vec::with_capacity(pending.len());
    while let Some(outcome) = pending.next().await {
        ctx.output.debug(&format!("{} in {:?}", outcome.image, outcome.elapsed));
        pb.inc(1);
        outcomes.push(outcome);
    }
    pb.finish_and_clear();

    outcomes
}
