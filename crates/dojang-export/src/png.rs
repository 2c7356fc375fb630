//! PNG export format
//!
//! Transparency is preserved, so a PNG seal can be laid over a document.

use image::{ExtendedColorType, ImageEncoder};

use dojang_core::{
    error::{ExportError, Result},
    traits::{DrawSurface, Exporter},
};

use crate::{demultiply, surface_pixels};

/// Encode straight RGBA8 to PNG
pub fn encode_rgba_to_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );
    encoder
        .write_image(rgba, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {e}")))?;
    Ok(png_data)
}

/// PNG exporter for rendered surfaces
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, surface: &dyn DrawSurface) -> Result<Vec<u8>> {
        let rgba = demultiply(surface_pixels(surface)?);
        encode_rgba_to_png(&rgba, surface.width(), surface.height())
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}
