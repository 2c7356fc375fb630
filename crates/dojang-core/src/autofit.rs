//! Auto-fit: sizing trademark text to a physical width
//!
//! Font metrics are not continuous in pixel size, so the search settles
//! for "within a pixel" and otherwise returns wherever twenty halvings
//! leave it.

use crate::{
    config::TrademarkConfig,
    error::Result,
    traits::TextMeasure,
    types::FontSpec,
    units::cm_to_pixels_with_dpi,
};

/// Smallest size the search considers, in pixels
pub const MIN_SEARCH_SIZE: f32 = 10.0;
/// Largest size the search considers, in pixels
pub const MAX_SEARCH_SIZE: f32 = 500.0;
/// Iteration cap for the bisection
pub const MAX_ITERATIONS: usize = 20;
/// Accepted distance from the target width, in pixels
pub const WIDTH_TOLERANCE: f32 = 1.0;

/// Binary-search the font size at which `longest_line` measures
/// `target_width_px` wide
pub fn find_font_size<M: TextMeasure + ?Sized>(
    measure: &M,
    longest_line: &str,
    target_width_px: f32,
    font: &FontSpec,
) -> Result<f32> {
    let mut min = MIN_SEARCH_SIZE;
    let mut max = MAX_SEARCH_SIZE;
    let mut size = (min + max) / 2.0;

    for iteration in 0..MAX_ITERATIONS {
        size = (min + max) / 2.0;
        let width = measure.measure_text(longest_line, &font.with_size(size))?;

        if (width - target_width_px).abs() < WIDTH_TOLERANCE {
            log::debug!(
                "autofit: converged at {size}px after {} iterations (width {width})",
                iteration + 1
            );
            return Ok(size);
        }

        if width > target_width_px {
            max = size;
        } else {
            min = size;
        }
    }

    log::debug!("autofit: settled at {size}px without converging");
    Ok(size)
}

/// The line auto-fit sizes against: most characters wins, later lines win
/// ties, blank lines never count
pub fn longest_line(text: &str) -> Option<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .fold(None, |longest: Option<&str>, line| match longest {
            Some(current) if current.chars().count() > line.chars().count() => Some(current),
            _ => Some(line),
        })
}

/// Auto-fit size for a trademark's text at its DPI, or `None` for blank text
pub fn fit_trademark<M: TextMeasure + ?Sized>(
    measure: &M,
    config: &TrademarkConfig,
) -> Result<Option<f32>> {
    let Some(line) = longest_line(&config.text) else {
        return Ok(None);
    };
    let target = cm_to_pixels_with_dpi(TrademarkConfig::TARGET_WIDTH_CM, config.dpi) as f32;
    find_font_size(measure, line, target, &TrademarkConfig::font_spec(0.0)).map(Some)
}

/// Keeps a trademark's font size in step with its text and DPI
///
/// Changing the text or the DPI re-runs auto-fit. A manual size sticks
/// until one of those changes again.
#[derive(Debug, Clone)]
pub struct FontSizeController {
    text: String,
    dpi: u32,
    size: f32,
    manual: bool,
}

impl FontSizeController {
    /// Size shown before any text has been fitted
    pub const DEFAULT_SIZE: f32 = 120.0;
    /// Bounds for a manually entered size
    pub const MANUAL_RANGE: (f32, f32) = (30.0, 300.0);

    /// Start from the default text and DPI, fitted
    pub fn new<M: TextMeasure + ?Sized>(measure: &M) -> Result<Self> {
        let defaults = TrademarkConfig::default();
        let mut controller = Self {
            text: defaults.text,
            dpi: defaults.dpi,
            size: Self::DEFAULT_SIZE,
            manual: false,
        };
        controller.refit(measure)?;
        Ok(controller)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    /// Replace the text; clears any manual size when the text changed
    pub fn set_text<M: TextMeasure + ?Sized>(&mut self, measure: &M, text: &str) -> Result<()> {
        if self.text == text {
            return Ok(());
        }
        self.text = text.to_string();
        self.refit(measure)
    }

    /// Replace the DPI (clamped to 100–500); clears any manual size when it changed
    pub fn set_dpi<M: TextMeasure + ?Sized>(&mut self, measure: &M, dpi: u32) -> Result<()> {
        let dpi = TrademarkConfig::clamp_dpi(dpi);
        if self.dpi == dpi {
            return Ok(());
        }
        self.dpi = dpi;
        self.refit(measure)
    }

    /// Pin the size by hand until the text or DPI changes
    pub fn set_manual_size(&mut self, size: f32) {
        let (low, high) = Self::MANUAL_RANGE;
        self.size = size.clamp(low, high);
        self.manual = true;
    }

    /// Back to the default text and DPI, auto-fitted
    pub fn reset<M: TextMeasure + ?Sized>(&mut self, measure: &M) -> Result<()> {
        let defaults = TrademarkConfig::default();
        self.text = defaults.text;
        self.dpi = defaults.dpi;
        self.refit(measure)
    }

    /// Snapshot for rendering, with the current size pinned
    pub fn to_config(&self) -> TrademarkConfig {
        TrademarkConfig {
            text: self.text.clone(),
            dpi: self.dpi,
            font_size: Some(self.size),
        }
    }

    fn refit<M: TextMeasure + ?Sized>(&mut self, measure: &M) -> Result<()> {
        self.manual = false;
        if let Some(size) = fit_trademark(measure, &self.to_config())? {
            self.size = size;
        }
        Ok(())
    }
}
