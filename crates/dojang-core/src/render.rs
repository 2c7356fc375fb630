//! Render orchestration: every stage, in order, against one fresh surface
//!
//! ```text
//! Seal:       size → background → fill → boundary → glyphs → ink noise
//! Trademark:  size → white → auto-fit → centered lines
//! ```
//!
//! A failed render returns before handing anything back, so earlier
//! surfaces and files are never touched.

use crate::{
    autofit::{fit_trademark, FontSizeController},
    config::{StampConfig, TrademarkConfig},
    error::{DojangError, Result},
    layout::layout,
    noise::InkRng,
    shape::{draw_boundary, Outline},
    texture::apply_ink_noise,
    traits::{DrawSurface, SurfaceProvider},
    types::Point,
    units::{cm_to_pixels, cm_to_pixels_with_dpi},
    Color,
};

/// Where a seal's pieces land on its canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampGeometry {
    pub width: u32,
    pub height: u32,
    pub center: Point,
    /// `min(width, height) - border_inset`
    pub shape_size: f32,
    pub outline: Outline,
    pub font_size: f32,
}

impl StampGeometry {
    pub fn for_config(config: &StampConfig) -> Result<Self> {
        let width = cm_to_pixels(config.width_cm);
        let height = cm_to_pixels(config.height_cm);
        let shape_size = width.min(height) as f32 - config.border_inset;
        if shape_size <= 0.0 {
            return Err(DojangError::InvalidConfiguration(format!(
                "border inset {} leaves no room on a {width}x{height} canvas",
                config.border_inset
            )));
        }
        let center = Point::new(width as f32 / 2.0, height as f32 / 2.0);
        Ok(Self {
            width,
            height,
            center,
            shape_size,
            outline: Outline::for_shape(config.shape, center, shape_size),
            font_size: shape_size * config.font_size_ratio,
        })
    }

    /// Where the glyph block is centered
    pub fn text_center(&self, config: &StampConfig) -> Point {
        self.center.offset(config.text_offset.0, config.text_offset.1)
    }
}

/// Render a seal
///
/// `rng` drives the rough border and the ink noise; a flat border never
/// draws from it.
pub fn render_stamp(
    provider: &dyn SurfaceProvider,
    config: &StampConfig,
    rng: &mut InkRng,
) -> Result<Box<dyn DrawSurface>> {
    if config.glyphs.is_empty() {
        return Err(DojangError::InvalidConfiguration(
            "a seal needs at least one glyph".into(),
        ));
    }

    let geometry = StampGeometry::for_config(config)?;
    let mut surface = provider.acquire(geometry.width, geometry.height)?;
    log::debug!(
        "stamp: {} on {} {}x{}, shape size {}, font size {}",
        config.name(),
        provider.name(),
        geometry.width,
        geometry.height,
        geometry.shape_size,
        geometry.font_size
    );

    if config.format.is_opaque() {
        surface.fill_rect(
            0.0,
            0.0,
            geometry.width as f32,
            geometry.height as f32,
            Color::white(),
        );
    } else {
        surface.clear();
    }

    if let Some(fill) = config.shape_fill {
        surface.fill_outline(&geometry.outline, fill)?;
    }
    draw_boundary(
        surface.as_mut(),
        &geometry.outline,
        config.border_style,
        config.ink.stroke,
        config.border_width,
        rng,
    )?;

    let text_center = geometry.text_center(config);
    let font = config.font_spec(geometry.font_size);
    for placement in layout(
        &config.glyphs,
        config.layout,
        geometry.font_size,
        text_center.x,
        text_center.y,
    ) {
        let mut buf = [0u8; 4];
        surface.draw_text(
            placement.glyph.encode_utf8(&mut buf),
            placement.x,
            placement.y,
            &font,
            config.ink.fill,
        )?;
    }

    if config.border_style.is_textured() {
        apply_ink_noise(surface.as_mut(), rng);
    }
    Ok(surface)
}

/// Render a trademark specimen
///
/// Blank text yields the blank white canvas.
pub fn render_trademark(
    provider: &dyn SurfaceProvider,
    config: &TrademarkConfig,
) -> Result<Box<dyn DrawSurface>> {
    let size = cm_to_pixels_with_dpi(TrademarkConfig::SIZE_CM, config.dpi);
    let mut surface = provider.acquire(size, size)?;
    surface.fill_rect(0.0, 0.0, size as f32, size as f32, Color::white());

    let lines: Vec<&str> = config.text.split('\n').map(str::trim).collect();
    if lines.iter().all(|line| line.is_empty()) {
        log::debug!("trademark: blank text, {size}x{size} blank canvas");
        return Ok(surface);
    }

    let base_size = match config.font_size {
        Some(size) => size,
        None => fit_trademark(provider, config)?.unwrap_or(FontSizeController::DEFAULT_SIZE),
    };
    let font_size = base_size * (config.dpi as f32 / TrademarkConfig::REFERENCE_DPI as f32);
    let line_height = font_size * TrademarkConfig::LINE_HEIGHT;
    let block_height = line_height * lines.len() as f32;
    let center = size as f32 / 2.0;
    let first_line_y = center - block_height / 2.0 + line_height / 2.0;
    log::debug!(
        "trademark: {} lines at {font_size}px on {size}x{size} ({} DPI)",
        lines.len(),
        config.dpi
    );

    let font = TrademarkConfig::font_spec(font_size);
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = first_line_y + i as f32 * line_height;
        surface.draw_text(line, center, y, &font, Color::black())?;
    }
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::SurfaceError,
        traits::TextMeasure,
        types::{BorderStyle, FontSpec, OutputFormat},
    };
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        FillRect(Color),
        FillOutline(Color),
        StrokeOutline(Color),
        StrokePolyline(usize),
        Text(String, f32, f32, f32),
    }

    type OpLog = Arc<Mutex<Vec<Op>>>;

    struct Recorder {
        width: u32,
        height: u32,
        ops: OpLog,
        pixels: Vec<u8>,
    }

    impl Recorder {
        fn push(&self, op: Op) {
            self.ops.lock().push(op);
        }
    }

    impl DrawSurface for Recorder {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn clear(&mut self) {
            self.push(Op::Clear);
        }

        fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, color: Color) {
            self.push(Op::FillRect(color));
        }

        fn fill_outline(&mut self, _outline: &Outline, color: Color) -> Result<()> {
            self.push(Op::FillOutline(color));
            Ok(())
        }

        fn stroke_outline(&mut self, _outline: &Outline, color: Color, _w: f32) -> Result<()> {
            self.push(Op::StrokeOutline(color));
            Ok(())
        }

        fn stroke_polyline(&mut self, points: &[Point], _c: Color, _w: f32) -> Result<()> {
            self.push(Op::StrokePolyline(points.len()));
            Ok(())
        }

        fn draw_text(
            &mut self,
            text: &str,
            x: f32,
            y: f32,
            font: &FontSpec,
            _c: Color,
        ) -> Result<()> {
            self.push(Op::Text(text.to_string(), x, y, font.size));
            Ok(())
        }

        fn pixels(&self) -> &[u8] {
            &self.pixels
        }

        fn pixels_mut(&mut self) -> &mut [u8] {
            &mut self.pixels
        }
    }

    /// Hands out recorders that all write to one log; every character is
    /// one em wide
    #[derive(Default)]
    struct RecordingProvider {
        ops: OpLog,
    }

    impl RecordingProvider {
        fn ops(&self) -> Vec<Op> {
            self.ops.lock().clone()
        }
    }

    impl TextMeasure for RecordingProvider {
        fn measure_text(&self, text: &str, font: &FontSpec) -> Result<f32> {
            Ok(text.chars().count() as f32 * font.size)
        }
    }

    impl SurfaceProvider for RecordingProvider {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn acquire(&self, width: u32, height: u32) -> Result<Box<dyn DrawSurface>> {
            if width == 0 || height == 0 {
                return Err(SurfaceError::InvalidDimensions { width, height }.into());
            }
            Ok(Box::new(Recorder {
                width,
                height,
                ops: Arc::clone(&self.ops),
                pixels: Vec::new(),
            }))
        }
    }

    #[test]
    fn default_seal_geometry() {
        let geometry = StampGeometry::for_config(&StampConfig::default()).unwrap();
        assert_eq!((geometry.width, geometry.height), (151, 151));
        assert_eq!(geometry.center, Point::new(75.5, 75.5));
        assert_eq!(geometry.shape_size, 131.0);
        assert!((geometry.font_size - 36.68).abs() < 1e-3);
    }

    #[test]
    fn inset_larger_than_canvas_is_rejected() {
        let config = StampConfig {
            border_inset: 200.0,
            ..StampConfig::default()
        };
        assert!(matches!(
            StampGeometry::for_config(&config),
            Err(DojangError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn seal_draws_in_stage_order() {
        let config = StampConfig::classic("홍길동");
        let provider = RecordingProvider::default();
        render_stamp(&provider, &config, &mut InkRng::seeded(1)).unwrap();
        let ops = provider.ops();
        assert_eq!(ops[0], Op::FillRect(Color::white()));
        assert_eq!(ops[1], Op::FillOutline(Color::vermilion()));
        assert_eq!(ops[2], Op::StrokeOutline(Color::maroon()));
        let glyphs: Vec<_> = ops[3..]
            .iter()
            .map(|op| match op {
                Op::Text(text, ..) => text.as_str(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(glyphs, ["홍", "길", "동"]);
    }

    #[test]
    fn png_seal_starts_transparent_and_rough_uses_polyline() {
        let config = StampConfig {
            format: OutputFormat::Png,
            border_style: BorderStyle::Rough,
            ..StampConfig::default()
        };
        let provider = RecordingProvider::default();
        render_stamp(&provider, &config, &mut InkRng::seeded(1)).unwrap();
        let ops = provider.ops();
        assert_eq!(ops[0], Op::Clear);
        assert_eq!(ops[1], Op::StrokePolyline(63));
    }

    #[test]
    fn text_offset_moves_the_block() {
        let config = StampConfig {
            glyphs: vec!['印'],
            text_offset: (10.0, -5.0),
            ..StampConfig::default()
        };
        let provider = RecordingProvider::default();
        render_stamp(&provider, &config, &mut InkRng::seeded(1)).unwrap();
        match provider.ops().last() {
            Some(Op::Text(_, x, y, _)) => {
                assert_eq!(*x, 85.5);
                assert_eq!(*y, 70.5);
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_seal_is_rejected() {
        let config = StampConfig {
            glyphs: Vec::new(),
            ..StampConfig::default()
        };
        assert!(matches!(
            render_stamp(&RecordingProvider::default(), &config, &mut InkRng::seeded(1)),
            Err(DojangError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn blank_trademark_is_a_blank_canvas() {
        let config = TrademarkConfig::new(" \n ", 300);
        let provider = RecordingProvider::default();
        let surface = render_trademark(&provider, &config).unwrap();
        assert_eq!(surface.width(), 945);
        assert_eq!(provider.ops(), vec![Op::FillRect(Color::white())]);
    }

    #[test]
    fn trademark_lines_are_centered_as_a_block() {
        let config = TrademarkConfig {
            text: "첫줄\n\n셋째".into(),
            dpi: 300,
            font_size: Some(100.0),
        };
        let provider = RecordingProvider::default();
        render_trademark(&provider, &config).unwrap();
        let texts: Vec<_> = provider
            .ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Text(text, x, y, size) => Some((text, x, y, size)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 2);
        // Three lines of 120px centered on 472.5
        assert_eq!(texts[0], ("첫줄".to_string(), 472.5, 352.5, 100.0));
        assert_eq!(texts[1], ("셋째".to_string(), 472.5, 592.5, 100.0));
    }

    #[test]
    fn manual_trademark_size_scales_with_dpi() {
        let config = TrademarkConfig {
            text: "상표".into(),
            dpi: 150,
            font_size: Some(100.0),
        };
        let provider = RecordingProvider::default();
        render_trademark(&provider, &config).unwrap();
        assert!(provider
            .ops()
            .iter()
            .any(|op| matches!(op, Op::Text(_, _, _, size) if *size == 50.0)));
    }
}
