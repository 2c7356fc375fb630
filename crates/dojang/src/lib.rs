//! Dojang - seal impressions and trademark specimens
//!
//! Dojang turns a name into the image of a carved seal, and a brand name
//! into a trademark specimen sized for filing:
//! 1. Physical sizes become pixels
//! 2. The seal boundary is stroked, smooth or hand-carved
//! 3. Glyphs are placed by the engraving conventions
//! 4. Specimen text is auto-fitted to 7 cm
//! 5. Ink noise roughens textured seals
//! 6. The surface is encoded as JPEG or PNG
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dojang::prelude::*;
//!
//! let fonts = pollster::block_on(FontLibrary::load_in_background("fonts").wait())?;
//! let backend = SkiaBackend::new(Arc::new(fonts));
//! let config = StampConfig::with_name("홍길동");
//! let jpeg = dojang::stamp_bytes(&backend, &config, &mut InkRng::from_entropy())?;
//! ```
//!
//! # Feature Flags
//!
//! - `export`: JPEG and PNG encoders
//! - `fontdb`: font discovery and the background loader
//! - `render-skia`: tiny-skia raster surface
//! - `render-json`: display-list surface for inspection and tests
//! - `full`: All features enabled

pub use dojang_core::{
    autofit, config, error, gate, layout, noise, preview, render, shape, texture, traits, types,
    units, Color, InkColor, StampConfig, TrademarkConfig,
};

#[cfg(feature = "export")]
pub use dojang_export as export;

#[cfg(feature = "fontdb")]
pub use dojang_fontdb as fontdb;

#[cfg(feature = "render-json")]
pub use dojang_render_json as render_json;

#[cfg(feature = "render-skia")]
pub use dojang_render_skia as render_skia;

#[cfg(feature = "export")]
use dojang_core::{error::Result, noise::InkRng, traits::SurfaceProvider};

/// Render a seal and encode it in its configured format
#[cfg(feature = "export")]
pub fn stamp_bytes(
    provider: &dyn SurfaceProvider,
    config: &StampConfig,
    rng: &mut InkRng,
) -> Result<Vec<u8>> {
    let surface = render::render_stamp(provider, config, rng)?;
    let exporter = dojang_export::stamp_exporter(config.format);
    log::debug!(
        "exporting {} as {}",
        config.name(),
        exporter.mime_type()
    );
    exporter.export(surface.as_ref())
}

/// Render a trademark specimen and encode it as JPEG
#[cfg(feature = "export")]
pub fn trademark_bytes(provider: &dyn SurfaceProvider, config: &TrademarkConfig) -> Result<Vec<u8>> {
    let surface = render::render_trademark(provider, config)?;
    dojang_export::trademark_exporter().export(surface.as_ref())
}

/// Common imports for typical usage
pub mod prelude {
    pub use dojang_core::{
        error::{DojangError, Result},
        noise::InkRng,
        render::{render_stamp, render_trademark},
        traits::{DrawSurface, Exporter, FontRef, FontResolver, SurfaceProvider, TextMeasure},
        types::{BorderStyle, FontFamily, LayoutPolicy, OutputFormat, SealShape},
        Color, InkColor, StampConfig, TrademarkConfig,
    };

    #[cfg(feature = "fontdb")]
    pub use dojang_fontdb::{Font, FontLibrary};

    #[cfg(feature = "render-skia")]
    pub use dojang_render_skia::SkiaBackend;

    #[cfg(feature = "render-json")]
    pub use dojang_render_json::JsonBackend;
}
