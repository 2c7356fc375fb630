//! Skia surface - seals and specimens rasterized by tiny-skia
//!
//! Boundaries become tiny-skia paths, glyph outlines come from skrifa and
//! travel through a kurbo path into the same pixmap. Everything is drawn
//! anti-aliased into premultiplied RGBA.
//!
//! Variable fonts are instanced at the requested `wght`. Static fonts
//! asked for a bold weight get a synthetic bold: the outline is stroked
//! as well as filled.

use std::sync::Arc;

use kurbo::{BezPath, PathEl};
use read_fonts::types::Tag;
use skrifa::{
    instance::{Location, Size},
    outline::{DrawSettings, OutlineGlyphCollection},
    GlyphId, MetadataProvider,
};
use tiny_skia::{FillRule, LineJoin, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

use dojang_core::{
    error::{FontLoadError, RenderError, Result, SurfaceError},
    shape::Outline,
    traits::{
        middle_to_baseline, text_advance, DrawSurface, FontRef, FontResolver, SurfaceProvider,
        TextMeasure,
    },
    types::{FontSpec, Point},
    Color,
};

/// Largest edge a surface may have
pub const DEFAULT_MAX_SIZE: u32 = 65535;

/// Static fonts at or above this weight are emboldened
pub const SYNTHETIC_BOLD_WEIGHT: u16 = 600;

/// Stroke width of the synthetic bold, as a fraction of the font size
pub const SYNTHETIC_BOLD_STROKE: f32 = 1.0 / 24.0;

/// Hands out tiny-skia surfaces and measures text with skrifa metrics
pub struct SkiaBackend {
    fonts: Arc<dyn FontResolver>,
    max_size: u32,
}

impl SkiaBackend {
    pub fn new(fonts: Arc<dyn FontResolver>) -> Self {
        Self {
            fonts,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }
}

impl TextMeasure for SkiaBackend {
    fn measure_text(&self, text: &str, font: &FontSpec) -> Result<f32> {
        let face = self.fonts.resolve(font.family)?;
        Ok(measure_face(face.as_ref(), text, font))
    }
}

impl SurfaceProvider for SkiaBackend {
    fn name(&self) -> &'static str {
        "skia"
    }

    fn acquire(&self, width: u32, height: u32) -> Result<Box<dyn DrawSurface>> {
        if width > self.max_size || height > self.max_size {
            return Err(SurfaceError::TooLarge {
                width,
                height,
                max: self.max_size,
            }
            .into());
        }
        Ok(Box::new(SkiaSurface::new(
            width,
            height,
            Arc::clone(&self.fonts),
        )?))
    }
}

/// Width of `text` in `face`, honouring variable weight when the face
/// can be parsed and falling back to plain advances otherwise
fn measure_face(face: &dyn FontRef, text: &str, spec: &FontSpec) -> f32 {
    let Some(font) = parse_face(face) else {
        return text_advance(face, text, spec.size);
    };
    let location = weight_location(&font, spec.weight);
    let metrics = font.glyph_metrics(Size::new(spec.size), location.coords());
    let charmap = font.charmap();
    text.chars()
        .map(|ch| {
            let gid = charmap.map(ch).unwrap_or(GlyphId::new(0));
            metrics.advance_width(gid).unwrap_or(0.0)
        })
        .sum()
}

/// The face `face` names inside its data, collections included
fn parse_face(face: &dyn FontRef) -> Option<skrifa::FontRef<'_>> {
    skrifa::FontRef::from_index(face.data(), face.face_index()).ok()
}

fn weight_location(font: &skrifa::FontRef, weight: u16) -> Location {
    font.axes().location([("wght", weight as f32)])
}

fn has_weight_axis(font: &skrifa::FontRef) -> bool {
    let wght = Tag::new(b"wght");
    font.axes().iter().any(|axis| axis.tag() == wght)
}

/// A tiny-skia pixmap plus the fonts text is drawn with
pub struct SkiaSurface {
    pixmap: Pixmap,
    fonts: Arc<dyn FontResolver>,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32, fonts: Arc<dyn FontResolver>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height }.into());
        }
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::AllocationFailed)?;
        Ok(Self { pixmap, fonts })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn outline_path(outline: &Outline) -> Result<Path> {
    let (origin, width, height) = outline.bounds();
    let rect =
        Rect::from_xywh(origin.x, origin.y, width, height).ok_or(RenderError::PathBuildingFailed)?;
    let path = match outline {
        Outline::Ellipse { .. } => PathBuilder::from_oval(rect),
        Outline::Rect { .. } => Some(PathBuilder::from_rect(rect)),
    };
    path.ok_or_else(|| RenderError::PathBuildingFailed.into())
}

/// Trace one glyph at `size`, y-up, origin on the baseline
///
/// `Ok(None)` means the glyph exists but draws nothing (a space).
fn glyph_path(
    outlines: &OutlineGlyphCollection,
    ch: char,
    gid: GlyphId,
    size: Size,
    location: &Location,
) -> Result<Option<Path>> {
    let glyph = outlines
        .get(gid)
        .ok_or(RenderError::OutlineExtractionFailed(ch))?;

    let mut path = BezPath::new();
    let mut pen = PathPen { path: &mut path };
    glyph
        .draw(DrawSettings::unhinted(size, location.coords()), &mut pen)
        .map_err(|_| RenderError::OutlineExtractionFailed(ch))?;

    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    Ok(builder.finish())
}

impl DrawSurface for SkiaSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            log::debug!("skia: ignoring empty rect {width}x{height}");
            return;
        };
        self.pixmap
            .fill_rect(rect, &paint_for(color), Transform::identity(), None);
    }

    fn fill_outline(&mut self, outline: &Outline, color: Color) -> Result<()> {
        let path = outline_path(outline)?;
        self.pixmap.fill_path(
            &path,
            &paint_for(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn stroke_outline(&mut self, outline: &Outline, color: Color, width: f32) -> Result<()> {
        let path = outline_path(outline)?;
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint_for(color),
            &stroke,
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f32) -> Result<()> {
        let (first, rest) = points
            .split_first()
            .ok_or(RenderError::PathBuildingFailed)?;
        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for point in rest {
            builder.line_to(point.x, point.y);
        }
        builder.close();
        let path = builder.finish().ok_or(RenderError::PathBuildingFailed)?;

        let stroke = Stroke {
            width,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint_for(color),
            &stroke,
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        spec: &FontSpec,
        color: Color,
    ) -> Result<()> {
        let face = self.fonts.resolve(spec.family)?;
        let font = parse_face(face.as_ref()).ok_or(FontLoadError::InvalidData)?;
        let location = weight_location(&font, spec.weight);
        let size = Size::new(spec.size);
        let metrics = font.glyph_metrics(size, location.coords());
        let charmap = font.charmap();
        let outlines = font.outline_glyphs();
        let embolden = spec.weight >= SYNTHETIC_BOLD_WEIGHT && !has_weight_axis(&font);

        let glyphs: Vec<(char, GlyphId, f32)> = text
            .chars()
            .map(|ch| {
                let gid = charmap.map(ch).unwrap_or(GlyphId::new(0));
                (ch, gid, metrics.advance_width(gid).unwrap_or(0.0))
            })
            .collect();
        let width: f32 = glyphs.iter().map(|(_, _, advance)| advance).sum();
        let baseline = y + middle_to_baseline(face.as_ref(), spec.size);
        let mut pen_x = x - width / 2.0;

        let paint = paint_for(color);
        let bold = Stroke {
            width: spec.size * SYNTHETIC_BOLD_STROKE,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        for (ch, gid, advance) in glyphs {
            match glyph_path(&outlines, ch, gid, size, &location) {
                Ok(Some(path)) => {
                    // Outlines are y-up; flip onto the baseline
                    let transform = Transform::from_scale(1.0, -1.0).post_translate(pen_x, baseline);
                    self.pixmap
                        .fill_path(&path, &paint, FillRule::Winding, transform, None);
                    if embolden {
                        self.pixmap.stroke_path(&path, &paint, &bold, transform, None);
                    }
                },
                Ok(None) => {},
                Err(err) => log::warn!("skia: skipping glyph {ch:?}: {err}"),
            }
            pen_x += advance;
        }
        Ok(())
    }

    fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_mut()
    }
}

/// Collects skrifa's outline commands into a kurbo path
struct PathPen<'a> {
    path: &'a mut BezPath,
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path
            .quad_to((cx0 as f64, cy0 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
