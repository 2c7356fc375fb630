//! Dojang Core: from a name to an inked seal
//!
//! This crate holds everything that decides *where* ink lands on a seal or
//! a trademark specimen. Pixels themselves are produced by a backend that
//! implements [`DrawSurface`]; encoders live in `dojang-export`.
//!
//! ## The Stages
//!
//! 1. **Units** - physical centimetres become pixels ([`units`])
//! 2. **Boundary** - the seal outline, smooth or hand-carved ([`shape`])
//! 3. **Layout** - glyphs find their engraving positions ([`layout`])
//! 4. **Auto-fit** - trademark text is sized to a physical width ([`autofit`])
//! 5. **Texture** - ink noise roughens the finished impression ([`texture`])
//!
//! [`render`] composes the stages against a [`SurfaceProvider`].
//!
//! ```rust,no_run
//! use dojang_core::{render::render_stamp, noise::InkRng, StampConfig, SurfaceProvider};
//!
//! # fn provider() -> Box<dyn SurfaceProvider> { unimplemented!() }
//! let provider = provider();
//! let config = StampConfig::with_name("홍길동");
//! let surface = render_stamp(provider.as_ref(), &config, &mut InkRng::seeded(7))?;
//! assert_eq!(surface.width(), 151);
//! # Ok::<(), dojang_core::DojangError>(())
//! ```

pub mod autofit;
pub mod config;
pub mod error;
pub mod gate;
pub mod layout;
pub mod noise;
pub mod preview;
pub mod render;
pub mod shape;
pub mod texture;
pub mod traits;
pub mod units;

pub use config::{StampConfig, TrademarkConfig};
pub use error::{DojangError, Result};
pub use traits::{DrawSurface, Exporter, FontRef, FontResolver, SurfaceProvider, TextMeasure};

/// The value types shared by every stage
pub mod types {
    use serde::{Deserialize, Serialize};

    /// The outer boundary of a seal
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum SealShape {
        #[default]
        Circle,
        Oval,
        Square,
        Rectangle,
    }

    impl SealShape {
        pub fn as_str(&self) -> &'static str {
            match self {
                Self::Circle => "circle",
                Self::Oval => "oval",
                Self::Square => "square",
                Self::Rectangle => "rectangle",
            }
        }
    }

    /// The named font families a seal or specimen can be cut in
    ///
    /// Families are opaque to the layout engine; `dojang-fontdb` maps each
    /// one onto a font file.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum FontFamily {
        #[default]
        MuseumClassic,
        Gungseo,
        Batang,
        Dotum,
        Myeongjo,
        MalgunGothic,
    }

    impl FontFamily {
        pub const ALL: [FontFamily; 6] = [
            Self::MuseumClassic,
            Self::Gungseo,
            Self::Batang,
            Self::Dotum,
            Self::Myeongjo,
            Self::MalgunGothic,
        ];

        pub fn as_str(&self) -> &'static str {
            match self {
                Self::MuseumClassic => "museum-classic",
                Self::Gungseo => "gungseo",
                Self::Batang => "batang",
                Self::Dotum => "dotum",
                Self::Myeongjo => "myeongjo",
                Self::MalgunGothic => "malgun-gothic",
            }
        }

        /// File stems and family names that identify this family on disk,
        /// most specific first.
        pub fn candidate_names(&self) -> &'static [&'static str] {
            match self {
                Self::MuseumClassic => &["국립박물관문화재단클래식B", "MuseumClassicB"],
                Self::Gungseo => &["ChosunCentennial_otf", "Gungsuh", "Gungseo", "궁서"],
                Self::Batang => &["KoPubWorld Batang_Pro Medium", "Batang", "바탕"],
                Self::Dotum => &["KoPubWorld Dotum_Pro Medium", "Dotum", "돋움"],
                Self::Myeongjo => &["NanumMyeongjo", "Myeongjo", "명조"],
                Self::MalgunGothic => &["malgun", "Malgun Gothic", "맑은 고딕"],
            }
        }
    }

    /// How glyphs are arranged around the seal center
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum LayoutPolicy {
        #[default]
        Vertical,
        Horizontal,
        Centered,
        VerticalRight,
        VerticalLeft,
    }

    impl LayoutPolicy {
        pub fn as_str(&self) -> &'static str {
            match self {
                Self::Vertical => "vertical",
                Self::Horizontal => "horizontal",
                Self::Centered => "centered",
                Self::VerticalRight => "vertical-right",
                Self::VerticalLeft => "vertical-left",
            }
        }
    }

    /// How the seal boundary is stroked
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum BorderStyle {
        #[default]
        Flat,
        Textured,
        Rough,
    }

    impl BorderStyle {
        /// Maximum displacement in pixels applied to each outline sample
        pub fn jitter(&self) -> f32 {
            match self {
                Self::Rough => 1.5,
                Self::Flat | Self::Textured => 0.0,
            }
        }

        /// Whether the outline goes through the resampled polyline path
        /// and the finished image receives ink noise
        pub fn is_textured(&self) -> bool {
            !matches!(self, Self::Flat)
        }

        pub fn as_str(&self) -> &'static str {
            match self {
                Self::Flat => "flat",
                Self::Textured => "textured",
                Self::Rough => "rough",
            }
        }
    }

    /// Encoded output format
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum OutputFormat {
        #[default]
        Jpeg,
        Png,
    }

    impl OutputFormat {
        pub fn extension(&self) -> &'static str {
            match self {
                Self::Jpeg => "jpg",
                Self::Png => "png",
            }
        }

        /// JPEG has no alpha channel, so the canvas starts opaque white
        pub fn is_opaque(&self) -> bool {
            matches!(self, Self::Jpeg)
        }
    }

    /// A position in pixel space, origin top-left
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct Point {
        pub x: f32,
        pub y: f32,
    }

    impl Point {
        pub const fn new(x: f32, y: f32) -> Self {
            Self { x, y }
        }

        pub fn offset(self, dx: f32, dy: f32) -> Self {
            Self::new(self.x + dx, self.y + dy)
        }
    }

    /// A glyph pinned to the point its center is drawn at
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct GlyphPlacement {
        pub glyph: char,
        pub x: f32,
        pub y: f32,
    }

    /// Everything a backend needs to pick and scale a face
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct FontSpec {
        pub family: FontFamily,
        pub weight: u16,
        pub size: f32,
    }

    impl FontSpec {
        pub fn with_size(self, size: f32) -> Self {
            Self { size, ..self }
        }
    }
}

/// Simple RGBA color that works everywhere
///
/// Serialized as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Seal ink red
    pub const fn vermilion() -> Self {
        Self::rgb(0xd3, 0x2f, 0x2f)
    }

    /// Darker red used for seal borders
    pub const fn maroon() -> Self {
        Self::rgb(0xb7, 0x1c, 0x1c)
    }

    /// Parse `RRGGBB` or `RRGGBBAA`, with or without a leading `#`
    pub fn from_hex(value: &str) -> std::result::Result<Self, String> {
        let hex = value.trim().trim_start_matches('#');
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(format!(
                "color must be in RRGGBB or RRGGBBAA format, got {value:?}"
            ));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("invalid color channel in {value:?}"))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// The two colors a seal is inked with
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InkColor {
    /// Glyph ink
    pub fill: Color,
    /// Boundary ink
    pub stroke: Color,
}

impl Default for InkColor {
    fn default() -> Self {
        Self {
            fill: Color::vermilion(),
            stroke: Color::maroon(),
        }
    }
}
