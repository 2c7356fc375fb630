//! JPEG export format
//!
//! JPEG has no alpha, so the surface is composited over white before
//! encoding. Seals go out at quality 95, specimens at 100.

use image::{ExtendedColorType, ImageEncoder};

use dojang_core::{
    error::{ExportError, Result},
    traits::{DrawSurface, Exporter},
};

use crate::{over_white, surface_pixels};

/// Encode RGB8 to baseline JPEG
pub fn encode_rgb_to_jpeg(rgb: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>> {
    let mut jpeg_data = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg_data, quality);
    encoder
        .write_image(rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| ExportError::EncodingFailed(format!("JPEG encoding failed: {e}")))?;
    Ok(jpeg_data)
}

/// JPEG exporter for rendered surfaces
pub struct JpegExporter {
    quality: u8,
}

impl JpegExporter {
    /// Quality is clamped to 1..=100
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Exporter for JpegExporter {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn export(&self, surface: &dyn DrawSurface) -> Result<Vec<u8>> {
        let rgb = over_white(surface_pixels(surface)?);
        log::debug!(
            "jpeg: {}x{} at quality {}",
            surface.width(),
            surface.height(),
            self.quality
        );
        encode_rgb_to_jpeg(&rgb, surface.width(), surface.height(), self.quality)
    }

    fn extension(&self) -> &'static str {
        "jpg"
    }

    fn mime_type(&self) -> &'static str {
        "image/jpeg"
    }
}
