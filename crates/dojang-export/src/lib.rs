//! Export module for Dojang
//!
//! Surfaces hold premultiplied RGBA; encoders want straight color. PNG
//! keeps the alpha channel, JPEG composites everything over white first.

use dojang_core::{
    error::{ExportError, Result},
    traits::{DrawSurface, Exporter},
    types::OutputFormat,
};

pub mod jpeg;
pub mod png;

pub use jpeg::JpegExporter;
pub use png::PngExporter;

/// JPEG quality for seals
pub const STAMP_JPEG_QUALITY: u8 = 95;
/// JPEG quality for trademark specimens
pub const TRADEMARK_JPEG_QUALITY: u8 = 100;

/// The encoder for a seal's output format
pub fn stamp_exporter(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Jpeg => Box::new(JpegExporter::new(STAMP_JPEG_QUALITY)),
        OutputFormat::Png => Box::new(PngExporter::new()),
    }
}

/// The encoder for trademark specimens, which are always JPEG
pub fn trademark_exporter() -> Box<dyn Exporter> {
    Box::new(JpegExporter::new(TRADEMARK_JPEG_QUALITY))
}

/// The surface's pixels, checked against its dimensions
fn surface_pixels(surface: &dyn DrawSurface) -> Result<&[u8]> {
    let expected = surface.width() as usize * surface.height() as usize * 4;
    let pixels = surface.pixels();
    if pixels.len() < expected {
        return Err(ExportError::BufferSize {
            expected,
            actual: pixels.len(),
        }
        .into());
    }
    Ok(&pixels[..expected])
}

/// Premultiplied RGBA to straight RGBA
pub fn demultiply(premultiplied: &[u8]) -> Vec<u8> {
    let mut output = premultiplied.to_vec();
    for px in output.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for channel in &mut px[..3] {
            *channel = ((*channel as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
    output
}

/// Premultiplied RGBA composited over opaque white, as RGB
pub fn over_white(premultiplied: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(premultiplied.len() / 4 * 3);
    for px in premultiplied.chunks_exact(4) {
        let inv_a = 255 - px[3] as u32;
        for &channel in &px[..3] {
            // src + white * (1 - a)
            output.push((channel as u32 + inv_a).min(255) as u8);
        }
    }
    output
}
