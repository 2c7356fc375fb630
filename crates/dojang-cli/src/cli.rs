//! CLI argument definitions using Clap v4
//!
//! Every flag is optional. A stamp or trademark starts from its defaults,
//! then from `--config` when given, and the flags present on the command
//! line are applied last.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use dojang_core::{
    types::{BorderStyle, FontFamily, LayoutPolicy, OutputFormat, SealShape},
    Color,
};

/// Dojang - seal impressions and trademark specimens from the command line
#[derive(Parser, Debug)]
#[command(name = "dojang")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a seal impression
    #[command(alias = "s")]
    Stamp(Box<StampArgs>),

    /// Render a trademark specimen
    #[command(alias = "t")]
    Trademark(TrademarkArgs),

    /// Display information about fonts, styles and formats
    #[command(alias = "i")]
    Info(InfoArgs),
}

/// Arguments for the stamp command
#[derive(Parser, Debug)]
pub struct StampArgs {
    /// Name to engrave, up to eight glyphs
    pub name: Option<String>,

    /// JSON stamp config to start from
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Directory searched for font files
    #[arg(long = "font-dir", default_value = "fonts")]
    pub font_dir: PathBuf,

    /// Start from the solid red disc with white glyphs
    #[arg(long, conflicts_with = "config")]
    pub classic: bool,

    // Shape Options
    #[arg(short = 's', long)]
    pub shape: Option<ShapeArg>,

    #[arg(short = 'b', long = "border-style")]
    pub border_style: Option<BorderArg>,

    /// Pixels taken off the shorter canvas side before sizing the shape
    #[arg(long = "border-inset")]
    pub border_inset: Option<f32>,

    #[arg(long = "border-width")]
    pub border_width: Option<f32>,

    /// Seal width in centimetres
    #[arg(long = "width-cm")]
    pub width_cm: Option<f32>,

    /// Seal height in centimetres
    #[arg(long = "height-cm")]
    pub height_cm: Option<f32>,

    // Text Options
    #[arg(short = 'f', long)]
    pub font: Option<FontArg>,

    #[arg(short = 'l', long)]
    pub layout: Option<LayoutArg>,

    /// Font weight, 100 to 900
    #[arg(short = 'w', long = "weight")]
    pub weight: Option<u16>,

    /// Font size as a fraction of the shape size
    #[arg(short = 'r', long = "ratio")]
    pub ratio: Option<f32>,

    /// Horizontal text offset in pixels
    #[arg(long = "offset-x", allow_hyphen_values = true)]
    pub offset_x: Option<f32>,

    /// Vertical text offset in pixels
    #[arg(long = "offset-y", allow_hyphen_values = true)]
    pub offset_y: Option<f32>,

    // Color Options
    /// Glyph ink (RRGGBB or RRGGBBAA)
    #[arg(long = "ink", value_parser = parse_color)]
    pub ink: Option<Color>,

    /// Border ink (RRGGBB or RRGGBBAA)
    #[arg(long = "border-color", value_parser = parse_color)]
    pub border_color: Option<Color>,

    /// Paint the inside of the shape (RRGGBB or RRGGBBAA)
    #[arg(long = "fill", value_parser = parse_color)]
    pub fill: Option<Color>,

    // Output Options
    #[arg(short = 'O', long = "format")]
    pub format: Option<FormatArg>,

    /// Seed for the rough border and ink noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (named after the seal if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Arguments for the trademark command
#[derive(Parser, Debug)]
pub struct TrademarkArgs {
    /// Specimen text; a literal `\n` starts a new line
    pub text: Option<String>,

    /// JSON trademark config to start from
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Directory searched for font files
    #[arg(long = "font-dir", default_value = "fonts")]
    pub font_dir: PathBuf,

    /// Output resolution, 100 to 500
    #[arg(short = 'd', long)]
    pub dpi: Option<u32>,

    /// Font size at 300 DPI; auto-fits to 7 cm when omitted
    #[arg(short = 's', long = "font-size")]
    pub font_size: Option<f32>,

    /// Output file path (named after the text if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Report which families are found under this directory
    #[arg(long = "font-dir")]
    pub font_dir: Option<PathBuf>,

    /// List font families
    #[arg(long)]
    pub fonts: bool,

    /// List shapes, layouts and border styles
    #[arg(long)]
    pub styles: bool,

    /// List output formats
    #[arg(long)]
    pub formats: bool,
}

fn parse_color(value: &str) -> Result<Color, String> {
    Color::from_hex(value)
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ShapeArg {
    Circle,
    Oval,
    Square,
    Rectangle,
}

impl From<ShapeArg> for SealShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Circle => Self::Circle,
            ShapeArg::Oval => Self::Oval,
            ShapeArg::Square => Self::Square,
            ShapeArg::Rectangle => Self::Rectangle,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum FontArg {
    MuseumClassic,
    Gungseo,
    Batang,
    Dotum,
    Myeongjo,
    MalgunGothic,
}

impl From<FontArg> for FontFamily {
    fn from(arg: FontArg) -> Self {
        match arg {
            FontArg::MuseumClassic => Self::MuseumClassic,
            FontArg::Gungseo => Self::Gungseo,
            FontArg::Batang => Self::Batang,
            FontArg::Dotum => Self::Dotum,
            FontArg::Myeongjo => Self::Myeongjo,
            FontArg::MalgunGothic => Self::MalgunGothic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum LayoutArg {
    /// One column, top to bottom
    Vertical,
    /// One row, left to right
    Horizontal,
    /// Stacked around the center
    Centered,
    /// Two columns, right column read first
    VerticalRight,
    /// Two columns, left column read first
    VerticalLeft,
}

impl From<LayoutArg> for LayoutPolicy {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Vertical => Self::Vertical,
            LayoutArg::Horizontal => Self::Horizontal,
            LayoutArg::Centered => Self::Centered,
            LayoutArg::VerticalRight => Self::VerticalRight,
            LayoutArg::VerticalLeft => Self::VerticalLeft,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum BorderArg {
    /// Clean vector outline
    Flat,
    /// Resampled outline with ink noise
    Textured,
    /// Jittered outline with ink noise
    Rough,
}

impl From<BorderArg> for BorderStyle {
    fn from(arg: BorderArg) -> Self {
        match arg {
            BorderArg::Flat => Self::Flat,
            BorderArg::Textured => Self::Textured,
            BorderArg::Rough => Self::Rough,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Opaque, composited over white
    #[value(alias = "jpeg")]
    Jpg,
    /// Transparent background
    Png,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jpg => Self::Jpeg,
            FormatArg::Png => Self::Png,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_a_full_stamp_command() {
        let cli = Cli::try_parse_from([
            "dojang", "-v", "stamp", "홍길동", "--shape", "oval", "--layout", "vertical-right",
            "--ink", "#112233", "--offset-y", "-12", "-O", "png", "--seed", "7",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Commands::Stamp(args) = cli.command else {
            panic!("expected stamp");
        };
        assert_eq!(args.name.as_deref(), Some("홍길동"));
        assert!(matches!(args.shape, Some(ShapeArg::Oval)));
        assert!(matches!(args.layout, Some(LayoutArg::VerticalRight)));
        assert_eq!(args.ink, Some(Color::rgb(0x11, 0x22, 0x33)));
        assert_eq!(args.offset_y, Some(-12.0));
        assert!(matches!(args.format, Some(FormatArg::Png)));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.font_dir, PathBuf::from("fonts"));
    }

    #[test]
    fn rejects_bad_colors() {
        assert!(Cli::try_parse_from(["dojang", "stamp", "김", "--ink", "red"]).is_err());
    }

    #[test]
    fn jpeg_is_an_alias() {
        let cli = Cli::try_parse_from(["dojang", "stamp", "김", "-O", "jpeg"]).unwrap();
        let Commands::Stamp(args) = cli.command else {
            panic!("expected stamp");
        };
        assert!(matches!(args.format, Some(FormatArg::Jpg)));
    }
}
