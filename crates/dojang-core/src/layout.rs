//! Glyph layout: where each character of a seal is engraved
//!
//! Seal engraving follows fixed conventions keyed on how many characters
//! the name has and which way it reads. Every case is spelled out below;
//! the grid assignments for four characters in particular are domain
//! rules, not something a general formula reproduces.
//!
//! | glyphs | policy | arrangement |
//! |---|---|---|
//! | 1 | any | at center |
//! | 2 | horizontal | side by side, 0.9 em apart |
//! | 2 | other | stacked, 1.2 em apart |
//! | 3 | centered | stacked, 1.1 em apart |
//! | 3 | other | stacked, 1.0 em apart |
//! | 4 | horizontal, vertical-right, vertical-left | 2×2 grid, 0.9 em × 1.1 em |
//! | anything else | any | vertical stack, 1.1 em line height |

use crate::types::{GlyphPlacement, LayoutPolicy};

/// Horizontal distance between neighbouring glyph centers
pub const HORIZONTAL_SPACING: f32 = 0.9;
/// Vertical distance between the two glyphs of a stacked pair
pub const PAIR_SPACING: f32 = 1.2;
/// Vertical distance between three engraved glyphs
pub const TRIPLE_SPACING: f32 = 1.0;
/// Line height of the plain vertical stack
pub const STACK_LINE_HEIGHT: f32 = 1.1;

/// Which rule placed the glyphs, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    Single,
    SideBySide,
    StackedPair,
    EngravedTriple,
    SimpleTriple,
    Grid(GridOrder),
    Stack,
}

/// Which input glyph lands in which cell of the 2×2 grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOrder {
    /// 0 1 / 2 3
    RowMajor,
    /// Right column reads first: 2 0 / 3 1
    RightColumnFirst,
    /// Left column reads first: 0 2 / 1 3
    LeftColumnFirst,
}

impl GridOrder {
    /// `(column, row)` for each glyph index, column 0 = left, row 0 = top
    fn cells(self) -> [(u8, u8); 4] {
        match self {
            Self::RowMajor => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Self::RightColumnFirst => [(1, 0), (1, 1), (0, 0), (0, 1)],
            Self::LeftColumnFirst => [(0, 0), (0, 1), (1, 0), (1, 1)],
        }
    }
}

/// Pick the rule for a glyph count and policy
pub fn variant_for(count: usize, policy: LayoutPolicy) -> LayoutVariant {
    match (count, policy) {
        (1, _) => LayoutVariant::Single,
        (2, LayoutPolicy::Horizontal) => LayoutVariant::SideBySide,
        (2, _) => LayoutVariant::StackedPair,
        (3, LayoutPolicy::Centered) => LayoutVariant::SimpleTriple,
        (3, _) => LayoutVariant::EngravedTriple,
        (4, LayoutPolicy::Horizontal) => LayoutVariant::Grid(GridOrder::RowMajor),
        (4, LayoutPolicy::VerticalRight) => LayoutVariant::Grid(GridOrder::RightColumnFirst),
        (4, LayoutPolicy::VerticalLeft) => LayoutVariant::Grid(GridOrder::LeftColumnFirst),
        _ => LayoutVariant::Stack,
    }
}

/// Compute the draw position of every glyph around `(center_x, center_y)`
///
/// Positions are glyph centers. The result has exactly one placement per
/// input glyph, in input order.
pub fn layout(
    glyphs: &[char],
    policy: LayoutPolicy,
    font_size: f32,
    center_x: f32,
    center_y: f32,
) -> Vec<GlyphPlacement> {
    let variant = variant_for(glyphs.len(), policy);
    log::debug!(
        "layout: {} glyphs, policy={}, variant={:?}, size={}",
        glyphs.len(),
        policy.as_str(),
        variant,
        font_size
    );

    let at = |glyph: char, x: f32, y: f32| GlyphPlacement { glyph, x, y };

    match variant {
        LayoutVariant::Single => vec![at(glyphs[0], center_x, center_y)],
        LayoutVariant::SideBySide => {
            let half = HORIZONTAL_SPACING * font_size / 2.0;
            vec![
                at(glyphs[0], center_x - half, center_y),
                at(glyphs[1], center_x + half, center_y),
            ]
        },
        LayoutVariant::StackedPair => {
            let half = PAIR_SPACING * font_size / 2.0;
            vec![
                at(glyphs[0], center_x, center_y - half),
                at(glyphs[1], center_x, center_y + half),
            ]
        },
        LayoutVariant::EngravedTriple | LayoutVariant::SimpleTriple => {
            let spacing = if variant == LayoutVariant::SimpleTriple {
                STACK_LINE_HEIGHT
            } else {
                TRIPLE_SPACING
            } * font_size;
            vec![
                at(glyphs[0], center_x, center_y - spacing),
                at(glyphs[1], center_x, center_y),
                at(glyphs[2], center_x, center_y + spacing),
            ]
        },
        LayoutVariant::Grid(order) => {
            let half_x = HORIZONTAL_SPACING * font_size / 2.0;
            let half_y = STACK_LINE_HEIGHT * font_size / 2.0;
            glyphs
                .iter()
                .zip(order.cells())
                .map(|(&glyph, (column, row))| {
                    let x = if column == 0 {
                        center_x - half_x
                    } else {
                        center_x + half_x
                    };
                    let y = if row == 0 {
                        center_y - half_y
                    } else {
                        center_y + half_y
                    };
                    at(glyph, x, y)
                })
                .collect()
        },
        LayoutVariant::Stack => {
            let line_height = STACK_LINE_HEIGHT * font_size;
            let total = glyphs.len() as f32 * line_height;
            let start_y = center_y - total / 2.0 + line_height / 2.0;
            glyphs
                .iter()
                .enumerate()
                .map(|(i, &glyph)| at(glyph, center_x, start_y + i as f32 * line_height))
                .collect()
        },
    }
}
