use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tilescale::cli::Cli;
use tilescale::config::RunConfig;
use tilescale::{ImageEnhancer, RemoteUpscaler, ResampleUpscaler, Upscaler};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunConfig::from_path(path)?,
        None => RunConfig::default(),
    };
    if let Some(patch_size) = cli.patch_size {
        config.patch_size = patch_size;
    }
    if let Some(scale) = cli.scale {
        config.scaling_factor = scale;
    }
    if cli.endpoint.is_some() {
        config.endpoint = cli.endpoint.clone();
    }

    let mut enhancer = ImageEnhancer::with_patch_size(config.scaling_factor, config.patch_size);
    enhancer
        .load_path(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    match &config.endpoint {
        Some(endpoint) => {
            let mut model = RemoteUpscaler::open(endpoint, config.scaling_factor)?;
            let result = enhancer.enhance(&model).await;
            model.close();
            result.with_context(|| format!("enhancement via {} failed", endpoint))?;
        }
        None => {
            info!("no endpoint configured, falling back to CPU resampling");
            let mut model = ResampleUpscaler::new(config.scaling_factor);
            let result = enhancer.enhance(&model).await;
            model.close();
            result.context("CPU resampling failed")?;
        }
    }

    enhancer
        .surface()
        .save(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!("wrote {}", cli.output.display());

    if cli.originals_only {
        let path = originals_path(&cli.output);
        enhancer.toggle_enhanced_visibility();
        enhancer
            .surface()
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        enhancer.toggle_enhanced_visibility();
        info!("wrote {}", path.display());
    }

    Ok(())
}

/// Sibling path for the originals-only rendition: `out.png` -> `out-original.png`.
fn originals_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("enhanced");
    let extension = output
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");
    output.with_file_name(format!("{stem}-original.{extension}"))
}
