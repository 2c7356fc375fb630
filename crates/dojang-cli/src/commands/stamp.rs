//! Stamp command implementation

use std::path::PathBuf;

use crate::cli::StampArgs;
use crate::commands::{load_fonts, read_config, write_output};
use dojang_core::{
    error::{DojangError, Result},
    noise::InkRng,
    render::render_stamp,
    StampConfig,
};
use dojang_export::stamp_exporter;
use dojang_render_skia::SkiaBackend;

pub fn run(args: &StampArgs) -> Result<()> {
    let config = build_config(args)?.clamped();
    if config.glyphs.is_empty() {
        return Err(DojangError::InvalidConfiguration(
            "no name to engrave".into(),
        ));
    }

    let fonts = load_fonts(&args.font_dir)?;
    let backend = SkiaBackend::new(fonts);
    let mut rng = match args.seed {
        Some(seed) => InkRng::seeded(seed),
        None => InkRng::from_entropy(),
    };

    let surface = render_stamp(&backend, &config, &mut rng)?;
    let data = stamp_exporter(config.format).export(surface.as_ref())?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.file_name()));
    write_output(&path, &data)
}

/// Defaults, then the config file, then flags
fn build_config(args: &StampArgs) -> Result<StampConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None if args.classic => StampConfig::classic(&StampConfig::default().name()),
        None => StampConfig::default(),
    };

    if let Some(name) = &args.name {
        config.glyphs = name.chars().filter(|c| !c.is_whitespace()).collect();
    }
    if let Some(shape) = args.shape {
        config.shape = shape.into();
    }
    if let Some(style) = args.border_style {
        config.border_style = style.into();
    }
    if let Some(inset) = args.border_inset {
        config.border_inset = inset;
    }
    if let Some(width) = args.border_width {
        config.border_width = width;
    }
    if let Some(width) = args.width_cm {
        config.width_cm = width;
    }
    if let Some(height) = args.height_cm {
        config.height_cm = height;
    }
    if let Some(font) = args.font {
        config.font = font.into();
    }
    if let Some(layout) = args.layout {
        config.layout = layout.into();
    }
    if let Some(weight) = args.weight {
        config.font_weight = weight;
    }
    if let Some(ratio) = args.ratio {
        config.font_size_ratio = ratio;
    }
    if let Some(x) = args.offset_x {
        config.text_offset.0 = x;
    }
    if let Some(y) = args.offset_y {
        config.text_offset.1 = y;
    }
    if let Some(ink) = args.ink {
        config.ink.fill = ink;
    }
    if let Some(color) = args.border_color {
        config.ink.stroke = color;
    }
    if let Some(fill) = args.fill {
        config.shape_fill = Some(fill);
    }
    if let Some(format) = args.format {
        config.format = format.into();
    }
    Ok(config)
}
