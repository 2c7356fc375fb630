//! Error types for Dojang

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DojangError>;

/// Main error type for Dojang
#[derive(Debug, Error)]
pub enum DojangError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Draw surface unavailable: {0}")]
    SurfaceUnavailable(#[from] SurfaceError),

    #[error("Font measurement unavailable: {0}")]
    FontMeasurementUnavailable(String),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Rendering failed: {0}")]
    Rendering(#[from] RenderError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a draw surface could not be acquired
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Surface {width}x{height} exceeds the {max}px limit")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("Pixel buffer allocation failed")]
    AllocationFailed,
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("No font registered for family: {0}")]
    FamilyNotRegistered(String),
}

/// Drawing errors raised after a surface exists
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Path building failed")]
    PathBuildingFailed,

    #[error("Outline extraction failed for {0:?}")]
    OutlineExtractionFailed(char),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Format not supported: {0}")]
    FormatNotSupported(String),

    #[error("Buffer too small: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
