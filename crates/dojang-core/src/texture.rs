//! Ink noise: the mottled look of a real impression
//!
//! Runs once over the finished surface. Only pixels whose color is in the
//! ink band (reddish: R > 100, G < 100, B < 100) are touched; each gets a
//! single random delta added to all three color channels. The band and
//! the delta apply to straight color, so anti-aliased edges on a
//! transparent seal are textured like the solid strokes.

use crate::{noise::InkRng, traits::DrawSurface};

/// Largest brightness shift applied to an ink pixel
pub const INK_NOISE_AMPLITUDE: f32 = 15.0;

/// Whether a pixel reads as seal ink
pub fn is_ink(r: u8, g: u8, b: u8) -> bool {
    r > 100 && g < 100 && b < 100
}

/// Add ink noise to every ink-band pixel of `surface`
pub fn apply_ink_noise(surface: &mut dyn DrawSurface, rng: &mut InkRng) {
    let touched = apply_ink_noise_to_pixels(surface.pixels_mut(), rng);
    log::debug!("texture: perturbed {touched} ink pixels");
}

/// Add ink noise to a premultiplied RGBA8 buffer, returning how many
/// pixels were changed
///
/// Each pixel is un-premultiplied, tested and shifted, then premultiplied
/// again, so channels never exceed alpha. Fully transparent pixels carry
/// no color and are skipped.
pub fn apply_ink_noise_to_pixels(pixels: &mut [u8], rng: &mut InkRng) -> usize {
    let mut touched = 0;
    for px in pixels.chunks_exact_mut(4) {
        let alpha = px[3];
        if alpha == 0 {
            continue;
        }
        let coverage = alpha as f32 / 255.0;
        let straight = [0, 1, 2].map(|i| (px[i] as f32 / coverage).min(255.0));
        let [r, g, b] = straight.map(|c| c.round() as u8);
        if !is_ink(r, g, b) {
            continue;
        }
        let delta = rng.uniform(-INK_NOISE_AMPLITUDE, INK_NOISE_AMPLITUDE);
        for (channel, color) in px[..3].iter_mut().zip(straight) {
            let shifted = (color + delta).clamp(0.0, 255.0) * coverage;
            *channel = shifted.round().min(alpha as f32) as u8;
        }
        touched += 1;
    }
    touched
}
