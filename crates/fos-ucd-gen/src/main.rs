//! fOS UCD Gen - Main Entry Point
//!
//! ```text
//! fos-ucd-gen [config.json] [out_dir]
//! ```
//!
//! Builds every table from the configured data directory and writes the
//! generated sources into `out_dir` (default `.`). Nothing is written
//! unless every table built.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fos_ucd::codegen::{render_category_table, render_matchers, render_pictographic};
use fos_ucd::{CompilerConfig, DirSource};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => CompilerConfig::load(Path::new(&path))
            .with_context(|| format!("loading configuration from {path}"))?,
        None => CompilerConfig::default(),
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    tracing::info!(
        "Building shaping tables from {} (Unicode {})",
        config.data_dir.display(),
        config.unicode_version
    );
    let source = DirSource::new(&config.data_dir, &config.unicode_version);

    let table = fos_ucd::build_classifier(&source, &config).context("building the category table")?;
    let matchers = fos_ucd::build_matchers(&source).context("building the vowel constraint matchers")?;
    let pictographic = fos_ucd::build_pictographic(&source).context("building the pictographic set")?;

    let outputs = [
        ("universal_table.rs", render_category_table(&table)),
        ("vowel_constraints.rs", render_matchers(&matchers)),
        ("emoji_pictographic.rs", render_pictographic(&pictographic)),
    ];

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    for (name, text) in &outputs {
        let path = out_dir.join(name);
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Wrote {} ({} bytes)", path.display(), text.len());
    }

    Ok(())
}
