//! Physical size to pixel conversion
//!
//! Seals and trademark specimens use two different unit systems and the
//! two must stay apart: a seal is measured on a fixed 96 DPI screen grid,
//! a specimen at whatever resolution the filing office asks for.

/// Pixels per centimetre on the seal grid (96 DPI)
pub const SEAL_PX_PER_CM: f32 = 37.8;

/// Centimetres per inch
pub const CM_PER_INCH: f32 = 2.54;

/// Seal path: `round(cm * 37.8)`
pub fn cm_to_pixels(cm: f32) -> u32 {
    (cm * SEAL_PX_PER_CM).round().max(0.0) as u32
}

/// Trademark path: `round((cm / 2.54) * dpi)`
pub fn cm_to_pixels_with_dpi(cm: f32, dpi: u32) -> u32 {
    ((cm / CM_PER_INCH) * dpi as f32).round().max(0.0) as u32
}
