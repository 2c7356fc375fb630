//! JSON surface - when you need to see what the renderer asked for
//!
//! Instead of pixels, this surface records every draw call as a display
//! list that serializes to JSON. Text commands carry the measured width
//! of what was drawn, so layout and auto-fit can be checked without a
//! rasterizer or a real font.
//!
//! The pixel buffer exists (ink noise and encoders need one) but stays
//! transparent.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use dojang_core::{
    error::{RenderError, Result, SurfaceError},
    shape::Outline,
    traits::{text_advance, DrawSurface, FontResolver, SurfaceProvider, TextMeasure},
    types::{FontFamily, FontSpec, Point},
    Color,
};

/// Schema version for the display list format
pub const JSON_SCHEMA_VERSION: &str = "1.0";

/// The shape half of an outline command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OutlineRecord {
    Ellipse { cx: f32, cy: f32, rx: f32, ry: f32 },
    Rect { cx: f32, cy: f32, width: f32, height: f32 },
}

impl From<&Outline> for OutlineRecord {
    fn from(outline: &Outline) -> Self {
        match *outline {
            Outline::Ellipse { center, rx, ry } => Self::Ellipse {
                cx: center.x,
                cy: center.y,
                rx,
                ry,
            },
            Outline::Rect {
                center,
                width,
                height,
            } => Self::Rect {
                cx: center.x,
                cy: center.y,
                width,
                height,
            },
        }
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum DrawCommand {
    Clear,
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    FillOutline {
        outline: OutlineRecord,
        color: Color,
    },
    StrokeOutline {
        outline: OutlineRecord,
        color: Color,
        width: f32,
    },
    StrokePolyline {
        points: Vec<Point>,
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        family: FontFamily,
        weight: u16,
        size: f32,
        color: Color,
        /// Measured advance of `text` at `size`
        advance: f32,
    },
}

/// Everything drawn onto one surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub schema_version: String,
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    fn new(width: u32, height: u32) -> Self {
        Self {
            schema_version: JSON_SCHEMA_VERSION.to_string(),
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Text commands in draw order
    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RenderError::BackendError(e.to_string()).into())
    }
}

/// Hands out recording surfaces and measures with plain advance widths
///
/// The backend keeps the display list of the surface it handed out last,
/// so callers holding only a `Box<dyn DrawSurface>` can still read it.
pub struct JsonBackend {
    fonts: Arc<dyn FontResolver>,
    last: Mutex<Option<Arc<Mutex<DisplayList>>>>,
}

impl JsonBackend {
    pub fn new(fonts: Arc<dyn FontResolver>) -> Self {
        Self {
            fonts,
            last: Mutex::new(None),
        }
    }

    /// Snapshot of the most recently acquired surface's display list
    pub fn last_display_list(&self) -> Option<DisplayList> {
        self.last.lock().as_ref().map(|list| list.lock().clone())
    }
}

impl TextMeasure for JsonBackend {
    fn measure_text(&self, text: &str, font: &FontSpec) -> Result<f32> {
        let face = self.fonts.resolve(font.family)?;
        Ok(text_advance(face.as_ref(), text, font.size))
    }
}

impl SurfaceProvider for JsonBackend {
    fn name(&self) -> &'static str {
        "json"
    }

    fn acquire(&self, width: u32, height: u32) -> Result<Box<dyn DrawSurface>> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height }.into());
        }
        let list = Arc::new(Mutex::new(DisplayList::new(width, height)));
        *self.last.lock() = Some(Arc::clone(&list));
        Ok(Box::new(JsonSurface {
            list,
            fonts: Arc::clone(&self.fonts),
            pixels: vec![0; width as usize * height as usize * 4],
        }))
    }
}

/// A surface that records instead of painting
pub struct JsonSurface {
    list: Arc<Mutex<DisplayList>>,
    fonts: Arc<dyn FontResolver>,
    pixels: Vec<u8>,
}

impl JsonSurface {
    pub fn display_list(&self) -> DisplayList {
        self.list.lock().clone()
    }

    fn record(&self, command: DrawCommand) {
        log::trace!("json: {command:?}");
        self.list.lock().commands.push(command);
    }
}

impl DrawSurface for JsonSurface {
    fn width(&self) -> u32 {
        self.list.lock().width
    }

    fn height(&self) -> u32 {
        self.list.lock().height
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
        self.record(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.record(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_outline(&mut self, outline: &Outline, color: Color) -> Result<()> {
        self.record(DrawCommand::FillOutline {
            outline: outline.into(),
            color,
        });
        Ok(())
    }

    fn stroke_outline(&mut self, outline: &Outline, color: Color, width: f32) -> Result<()> {
        self.record(DrawCommand::StrokeOutline {
            outline: outline.into(),
            color,
            width,
        });
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f32) -> Result<()> {
        if points.len() < 2 {
            return Err(RenderError::PathBuildingFailed.into());
        }
        self.record(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            color,
            width,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        color: Color,
    ) -> Result<()> {
        let face = self.fonts.resolve(font.family)?;
        self.record(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            family: font.family,
            weight: font.weight,
            size: font.size,
            color,
            advance: text_advance(face.as_ref(), text, font.size),
        });
        Ok(())
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}
