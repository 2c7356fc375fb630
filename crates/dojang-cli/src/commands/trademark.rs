//! Trademark command implementation

use std::path::PathBuf;

use crate::cli::TrademarkArgs;
use crate::commands::{load_fonts, read_config, write_output};
use dojang_core::{error::Result, render::render_trademark, TrademarkConfig};
use dojang_export::trademark_exporter;
use dojang_render_skia::SkiaBackend;

pub fn run(args: &TrademarkArgs) -> Result<()> {
    let config = build_config(args)?.clamped();
    let fonts = load_fonts(&args.font_dir)?;
    let backend = SkiaBackend::new(fonts);

    let surface = render_trademark(&backend, &config)?;
    let data = trademark_exporter().export(surface.as_ref())?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.file_name()));
    write_output(&path, &data)
}

fn build_config(args: &TrademarkArgs) -> Result<TrademarkConfig> {
    let mut config: TrademarkConfig = match &args.config {
        Some(path) => read_config(path)?,
        None => TrademarkConfig::default(),
    };
    if let Some(text) = &args.text {
        config.text = text.replace("\\n", "\n");
    }
    if let Some(dpi) = args.dpi {
        config.dpi = dpi;
    }
    if let Some(size) = args.font_size {
        config.font_size = Some(size);
    }
    Ok(config)
}
