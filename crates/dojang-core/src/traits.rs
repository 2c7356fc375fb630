//! The contracts between the layout engine and the backends
//!
//! - [`FontRef`] - Raw font data plus the few metrics layout needs
//! - [`FontResolver`] - Turns a [`FontFamily`] into a loaded face
//! - [`TextMeasure`] - How wide a run of text will draw
//! - [`DrawSurface`] - The pixel buffer a render paints into
//! - [`SurfaceProvider`] - Hands out fresh surfaces, one per render
//! - [`Exporter`] - Where pixels become files

use std::sync::Arc;

use crate::{
    error::Result,
    shape::Outline,
    types::{FontFamily, FontSpec, Point},
    Color,
};

/// Your window into font data and metrics
///
/// ```ignore
/// struct MyFont {
///     data: Vec<u8>,
/// }
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] {
///         &self.data
///     }
///
///     fn units_per_em(&self) -> u16 {
///         1000
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<u32> {
///         Some(42)
///     }
///
///     fn advance_width(&self, glyph_id: u32) -> f32 {
///         1000.0
///     }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    fn data(&self) -> &[u8];

    /// Which face of `data` this is; non-zero only inside a collection
    fn face_index(&self) -> u32 {
        0
    }

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    fn glyph_id(&self, ch: char) -> Option<u32>;

    /// How wide this glyph stands in font units
    fn advance_width(&self, glyph_id: u32) -> f32;

    /// Distance from baseline to the top of the em box, in font units
    fn ascent(&self) -> f32 {
        self.units_per_em() as f32 * 0.8
    }

    /// Distance from baseline to the bottom of the em box, in font units
    /// (negative below the baseline)
    fn descent(&self) -> f32 {
        self.units_per_em() as f32 * -0.2
    }
}

/// Width of `text` at `size` pixels using plain advance widths
///
/// Unmapped characters fall back to glyph 0, as a canvas would draw `.notdef`.
pub fn text_advance(font: &dyn FontRef, text: &str, size: f32) -> f32 {
    let upem = font.units_per_em().max(1) as f32;
    let units: f32 = text
        .chars()
        .map(|ch| font.advance_width(font.glyph_id(ch).unwrap_or(0)))
        .sum();
    units * size / upem
}

/// Offset from a line's vertical middle to its baseline, in pixels
///
/// Matches a canvas `textBaseline = "middle"`: the middle of the em box
/// sits on the requested y.
pub fn middle_to_baseline(font: &dyn FontRef, size: f32) -> f32 {
    let upem = font.units_per_em().max(1) as f32;
    (font.ascent() + font.descent()) / 2.0 * size / upem
}

/// Where families become faces
pub trait FontResolver: Send + Sync {
    fn resolve(&self, family: FontFamily) -> Result<Arc<dyn FontRef>>;
}

/// How wide a run of text draws in a given face
pub trait TextMeasure {
    fn measure_text(&self, text: &str, font: &FontSpec) -> Result<f32>;
}

/// A mutable pixel buffer of fixed size
///
/// Pixels are premultiplied RGBA8, row-major, top-left origin.
pub trait DrawSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reset every pixel to transparent
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    fn fill_outline(&mut self, outline: &Outline, color: Color) -> Result<()>;

    /// One smooth stroke along the exact outline
    fn stroke_outline(&mut self, outline: &Outline, color: Color, width: f32) -> Result<()>;

    /// Stroke a closed polyline through `points`
    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f32) -> Result<()>;

    /// Draw `text` with its horizontal center and em-box middle on `(x, y)`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &FontSpec, color: Color)
        -> Result<()>;

    fn pixels(&self) -> &[u8];

    fn pixels_mut(&mut self) -> &mut [u8];
}

/// Hands out a fresh surface for every render
pub trait SurfaceProvider: TextMeasure + Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Acquire a cleared surface, or fail with `SurfaceUnavailable`
    fn acquire(&self, width: u32, height: u32) -> Result<Box<dyn DrawSurface>>;
}

/// The final step: pixels become files
pub trait Exporter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Encode the surface as bytes
    fn export(&self, surface: &dyn DrawSurface) -> Result<Vec<u8>>;

    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;
}
