//! Render requests: one immutable record per image
//!
//! Both records deserialize from JSON with every field optional, so a
//! config file only needs to name what differs from the defaults. Numeric
//! bounds are enforced by [`StampConfig::clamped`] and
//! [`TrademarkConfig::clamped`], which callers apply before rendering.

use serde::{Deserialize, Serialize};

use crate::{
    types::{BorderStyle, FontFamily, FontSpec, LayoutPolicy, OutputFormat, SealShape},
    Color, InkColor,
};

/// Most glyphs a seal can carry
pub const MAX_GLYPHS: usize = 8;

/// Everything needed to render one seal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StampConfig {
    pub glyphs: Vec<char>,
    pub shape: SealShape,
    pub font: FontFamily,
    pub layout: LayoutPolicy,
    pub ink: InkColor,
    /// Paint for the shape interior; `None` leaves it unpainted
    pub shape_fill: Option<Color>,
    pub border_style: BorderStyle,
    /// Pixels taken off `min(width, height)` before sizing the shape
    pub border_inset: f32,
    pub border_width: f32,
    pub font_weight: u16,
    /// Font size as a fraction of the shape size
    pub font_size_ratio: f32,
    /// Displacement of the glyph block from the geometric center
    pub text_offset: (f32, f32),
    pub width_cm: f32,
    pub height_cm: f32,
    pub format: OutputFormat,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            glyphs: vec!['홍', '길', '동'],
            shape: SealShape::Circle,
            font: FontFamily::MuseumClassic,
            layout: LayoutPolicy::Vertical,
            ink: InkColor::default(),
            shape_fill: None,
            border_style: BorderStyle::Flat,
            border_inset: 20.0,
            border_width: 3.0,
            font_weight: 700,
            font_size_ratio: 0.28,
            text_offset: (0.0, 0.0),
            width_cm: 4.0,
            height_cm: 4.0,
            format: OutputFormat::Jpeg,
        }
    }
}

impl StampConfig {
    pub const CM_RANGE: (f32, f32) = (1.0, 20.0);
    pub const RATIO_RANGE: (f32, f32) = (0.15, 0.80);
    pub const WEIGHT_RANGE: (u16, u16) = (100, 900);
    pub const OFFSET_LIMIT: f32 = 100.0;
    pub const INSET_RANGE: (f32, f32) = (0.0, 100.0);
    pub const BORDER_WIDTH_RANGE: (f32, f32) = (0.5, 20.0);

    /// Defaults with the glyphs of `name`
    pub fn with_name(name: &str) -> Self {
        Self {
            glyphs: glyphs_of(name),
            ..Self::default()
        }
    }

    /// The first-generation seal: a solid red disc with white glyphs
    ///
    /// Glyphs use the `centered` layout, which stacks them 1.1 em apart
    /// like the first generation did, except for two glyphs: those keep
    /// the 1.2 em pair spacing.
    pub fn classic(name: &str) -> Self {
        Self {
            glyphs: glyphs_of(name),
            layout: LayoutPolicy::Centered,
            ink: InkColor {
                fill: Color::white(),
                stroke: Color::maroon(),
            },
            shape_fill: Some(Color::vermilion()),
            font_size_ratio: 0.4,
            ..Self::default()
        }
    }

    /// The glyphs as a string, for file names and logs
    pub fn name(&self) -> String {
        self.glyphs.iter().collect()
    }

    /// Pull every numeric field into its documented range and drop
    /// glyphs past [`MAX_GLYPHS`]
    pub fn clamped(mut self) -> Self {
        self.glyphs.retain(|c| !c.is_whitespace());
        self.glyphs.truncate(MAX_GLYPHS);
        self.width_cm = clamp_range(self.width_cm, Self::CM_RANGE);
        self.height_cm = clamp_range(self.height_cm, Self::CM_RANGE);
        self.font_size_ratio = clamp_range(self.font_size_ratio, Self::RATIO_RANGE);
        self.font_weight = self
            .font_weight
            .clamp(Self::WEIGHT_RANGE.0, Self::WEIGHT_RANGE.1);
        self.border_inset = clamp_range(self.border_inset, Self::INSET_RANGE);
        self.border_width = clamp_range(self.border_width, Self::BORDER_WIDTH_RANGE);
        let limit = Self::OFFSET_LIMIT;
        self.text_offset = (
            self.text_offset.0.clamp(-limit, limit),
            self.text_offset.1.clamp(-limit, limit),
        );
        self
    }

    pub fn font_spec(&self, size: f32) -> FontSpec {
        FontSpec {
            family: self.font,
            weight: self.font_weight,
            size,
        }
    }

    /// `stamp_{name}_{shape}_{font}_{layout}.{ext}`
    pub fn file_name(&self) -> String {
        format!(
            "stamp_{}_{}_{}_{}.{}",
            self.name(),
            self.shape.as_str(),
            self.font.as_str(),
            self.layout.as_str(),
            self.format.extension()
        )
    }
}

/// Everything needed to render one trademark specimen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TrademarkConfig {
    /// One or more lines separated by `\n`
    pub text: String,
    pub dpi: u32,
    /// Manual font size at 300 DPI; `None` auto-fits
    pub font_size: Option<f32>,
}

impl Default for TrademarkConfig {
    fn default() -> Self {
        Self {
            text: "상표명".to_string(),
            dpi: 300,
            font_size: None,
        }
    }
}

impl TrademarkConfig {
    /// Canvas edge length
    pub const SIZE_CM: f32 = 8.0;
    /// Width the longest line is fitted to
    pub const TARGET_WIDTH_CM: f32 = 7.0;
    pub const FONT: FontFamily = FontFamily::MalgunGothic;
    pub const FONT_WEIGHT: u16 = 400;
    /// DPI the font size is expressed at
    pub const REFERENCE_DPI: u32 = 300;
    pub const DPI_RANGE: (u32, u32) = (100, 500);
    pub const FONT_SIZE_RANGE: (f32, f32) = (30.0, 300.0);
    /// Spacing between consecutive lines, as a multiple of the font size
    pub const LINE_HEIGHT: f32 = 1.2;

    pub fn new(text: impl Into<String>, dpi: u32) -> Self {
        Self {
            text: text.into(),
            dpi,
            font_size: None,
        }
    }

    pub fn clamp_dpi(dpi: u32) -> u32 {
        dpi.clamp(Self::DPI_RANGE.0, Self::DPI_RANGE.1)
    }

    pub fn clamped(mut self) -> Self {
        self.dpi = Self::clamp_dpi(self.dpi);
        self.font_size = self
            .font_size
            .map(|size| clamp_range(size, Self::FONT_SIZE_RANGE));
        self
    }

    pub fn font_spec(size: f32) -> FontSpec {
        FontSpec {
            family: Self::FONT,
            weight: Self::FONT_WEIGHT,
            size,
        }
    }

    /// `trademark_{text}_{dpi}dpi.jpg`, line breaks become underscores
    pub fn file_name(&self) -> String {
        format!(
            "trademark_{}_{}dpi.jpg",
            self.text.replace('\n', "_"),
            self.dpi
        )
    }
}

fn glyphs_of(name: &str) -> Vec<char> {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

fn clamp_range(value: f32, (low, high): (f32, f32)) -> f32 {
    if value.is_nan() {
        low
    } else {
        value.clamp(low, high)
    }
}
