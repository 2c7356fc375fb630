//! Seal boundaries: the four outline primitives and how they are stroked
//!
//! A flat border is one smooth stroke. Textured and rough borders are
//! resampled into a closed polyline whose points are nudged by random
//! noise, which reads as a hand-carved edge. Rough and textured share the
//! polyline code path; textured simply uses zero displacement.

use std::f32::consts::TAU;

use crate::{
    error::Result,
    noise::InkRng,
    traits::DrawSurface,
    types::{BorderStyle, Point, SealShape},
    Color,
};

/// Angular step between samples on an ellipse, in radians
pub const ELLIPSE_SAMPLE_STEP: f32 = 0.1;

/// The exact geometric outline of a seal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline {
    Ellipse { center: Point, rx: f32, ry: f32 },
    Rect { center: Point, width: f32, height: f32 },
}

impl Outline {
    /// Outline for `shape` centered on `center`, where `size` is the
    /// drawable extent (`min(width, height) - border_inset`)
    pub fn for_shape(shape: SealShape, center: Point, size: f32) -> Self {
        match shape {
            SealShape::Circle => Self::Ellipse {
                center,
                rx: size / 2.0,
                ry: size / 2.0,
            },
            SealShape::Oval => Self::Ellipse {
                center,
                rx: size * 0.6,
                ry: size * 0.5,
            },
            SealShape::Square => Self::Rect {
                center,
                width: size,
                height: size,
            },
            SealShape::Rectangle => Self::Rect {
                center,
                width: size,
                height: size * 0.7,
            },
        }
    }

    pub fn center(&self) -> Point {
        match *self {
            Self::Ellipse { center, .. } | Self::Rect { center, .. } => center,
        }
    }

    /// Top-left corner and size of the bounding box
    pub fn bounds(&self) -> (Point, f32, f32) {
        match *self {
            Self::Ellipse { center, rx, ry } => {
                (center.offset(-rx, -ry), rx * 2.0, ry * 2.0)
            },
            Self::Rect {
                center,
                width,
                height,
            } => (center.offset(-width / 2.0, -height / 2.0), width, height),
        }
    }

    /// Resample the outline as polyline vertices
    ///
    /// Ellipses are sampled every [`ELLIPSE_SAMPLE_STEP`] radians starting
    /// at angle zero; rectangles yield their four corners clockwise from
    /// the top-left.
    pub fn sample(&self) -> Vec<Point> {
        match *self {
            Self::Ellipse { center, rx, ry } => {
                let steps = (TAU / ELLIPSE_SAMPLE_STEP).ceil() as usize;
                (0..steps)
                    .map(|i| i as f32 * ELLIPSE_SAMPLE_STEP)
                    .take_while(|angle| *angle < TAU)
                    .map(|angle| center.offset(rx * angle.cos(), ry * angle.sin()))
                    .collect()
            },
            Self::Rect { .. } => {
                let (origin, width, height) = self.bounds();
                vec![
                    origin,
                    origin.offset(width, 0.0),
                    origin.offset(width, height),
                    origin.offset(0.0, height),
                ]
            },
        }
    }
}

/// Displace each point by independent uniform noise in `[-amount, amount)`
pub fn perturb(points: &mut [Point], amount: f32, rng: &mut InkRng) {
    for point in points {
        point.x += rng.jitter(amount);
        point.y += rng.jitter(amount);
    }
}

/// Stroke the seal boundary in the requested style
pub fn draw_boundary(
    surface: &mut dyn DrawSurface,
    outline: &Outline,
    style: BorderStyle,
    color: Color,
    stroke_width: f32,
    rng: &mut InkRng,
) -> Result<()> {
    if !style.is_textured() {
        return surface.stroke_outline(outline, color, stroke_width);
    }

    let mut points = outline.sample();
    perturb(&mut points, style.jitter(), rng);
    log::debug!(
        "boundary: {} style, {} samples, jitter {}",
        style.as_str(),
        points.len(),
        style.jitter()
    );
    surface.stroke_polyline(&points, color, stroke_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point::new(100.0, 100.0);

    #[test]
    fn shapes_scale_from_size() {
        assert_eq!(
            Outline::for_shape(SealShape::Circle, CENTER, 130.0),
            Outline::Ellipse {
                center: CENTER,
                rx: 65.0,
                ry: 65.0
            }
        );
        match Outline::for_shape(SealShape::Oval, CENTER, 100.0) {
            Outline::Ellipse { center, rx, ry } => {
                assert_eq!(center, CENTER);
                assert!((rx - 60.0).abs() < 1e-4);
                assert!((ry - 50.0).abs() < 1e-4);
            },
            other => panic!("expected ellipse, got {other:?}"),
        }
        assert_eq!(
            Outline::for_shape(SealShape::Square, CENTER, 80.0),
            Outline::Rect {
                center: CENTER,
                width: 80.0,
                height: 80.0
            }
        );
        match Outline::for_shape(SealShape::Rectangle, CENTER, 100.0) {
            Outline::Rect { width, height, .. } => {
                assert_eq!(width, 100.0);
                assert!((height - 70.0).abs() < 1e-4);
            },
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn ellipse_samples_every_tenth_radian() {
        let outline = Outline::for_shape(SealShape::Circle, CENTER, 100.0);
        let points = outline.sample();
        assert_eq!(points.len(), 63);
        for p in &points {
            let r = ((p.x - CENTER.x).powi(2) + (p.y - CENTER.y).powi(2)).sqrt();
            assert!((r - 50.0).abs() < 1e-3);
        }
        assert!((points[0].x - 150.0).abs() < 1e-4);
    }

    #[test]
    fn rect_samples_four_corners() {
        let outline = Outline::for_shape(SealShape::Square, CENTER, 40.0);
        assert_eq!(
            outline.sample(),
            vec![
                Point::new(80.0, 80.0),
                Point::new(120.0, 80.0),
                Point::new(120.0, 120.0),
                Point::new(80.0, 120.0),
            ]
        );
    }

    #[test]
    fn perturbation_is_bounded() {
        let outline = Outline::for_shape(SealShape::Oval, CENTER, 100.0);
        let exact = outline.sample();
        let mut rough = exact.clone();
        perturb(&mut rough, 1.5, &mut InkRng::seeded(3));
        assert_ne!(exact, rough);
        for (a, b) in exact.iter().zip(&rough) {
            assert!((a.x - b.x).abs() <= 1.5);
            assert!((a.y - b.y).abs() <= 1.5);
        }
    }

    #[test]
    fn zero_perturbation_keeps_geometry() {
        let outline = Outline::for_shape(SealShape::Rectangle, CENTER, 100.0);
        let mut points = outline.sample();
        perturb(&mut points, 0.0, &mut InkRng::seeded(3));
        assert_eq!(points, outline.sample());
    }
}
