//! End-to-end checks through the display-list surface
//!
//! Every family resolves to a mock face whose glyphs are exactly one em
//! wide, so measured widths are `chars * size`.

use std::sync::Arc;

use dojang::prelude::*;
use dojang::{stamp_bytes, trademark_bytes};
use dojang_render_json::{DisplayList, DrawCommand, JsonBackend, OutlineRecord};

struct EmFont;

impl FontRef for EmFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, _ch: char) -> Option<u32> {
        Some(1)
    }

    fn advance_width(&self, _glyph_id: u32) -> f32 {
        1000.0
    }
}

struct EmResolver;

impl FontResolver for EmResolver {
    fn resolve(&self, _family: FontFamily) -> Result<Arc<dyn FontRef>> {
        Ok(Arc::new(EmFont))
    }
}

fn backend() -> JsonBackend {
    JsonBackend::new(Arc::new(EmResolver))
}

/// `(text, x, y, size, advance)` of every text command
fn texts(list: &DisplayList) -> Vec<(String, f32, f32, f32, f32)> {
    list.texts()
        .filter_map(|command| match command {
            DrawCommand::Text {
                text,
                x,
                y,
                size,
                advance,
                ..
            } => Some((text.clone(), *x, *y, *size, *advance)),
            _ => None,
        })
        .collect()
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn default_seal_end_to_end() {
    let backend = backend();
    let config = StampConfig::with_name("홍길동").clamped();
    render_stamp(&backend, &config, &mut InkRng::seeded(0)).unwrap();
    let list = backend.last_display_list().unwrap();

    assert_eq!((list.width, list.height), (151, 151));
    assert!(matches!(
        list.commands[0],
        DrawCommand::FillRect { color, .. } if color == Color::white()
    ));

    let boundary = list
        .commands
        .iter()
        .find_map(|command| match command {
            DrawCommand::StrokeOutline { outline, width, .. } => Some((outline.clone(), *width)),
            _ => None,
        })
        .unwrap();
    match boundary {
        (OutlineRecord::Ellipse { cx, cy, rx, ry }, width) => {
            assert!(close(cx, 75.5) && close(cy, 75.5));
            assert!(close(rx, 65.5) && close(ry, 65.5));
            assert_eq!(width, 3.0);
        },
        other => panic!("expected an ellipse, got {other:?}"),
    }

    let font_size = 131.0 * 0.28;
    let texts = texts(&list);
    assert_eq!(texts.len(), 3);
    let expected = [
        ("홍", 75.5 - font_size),
        ("길", 75.5),
        ("동", 75.5 + font_size),
    ];
    for ((text, x, y, size, _), (glyph, want_y)) in texts.iter().zip(expected) {
        assert_eq!(text, glyph);
        assert!(close(*x, 75.5));
        assert!(close(*y, want_y), "{glyph} at {y}, want {want_y}");
        assert!(close(*size, font_size));
    }
}

#[test]
fn four_glyph_seal_reads_right_column_first() {
    let backend = backend();
    let config = StampConfig {
        layout: LayoutPolicy::VerticalRight,
        ..StampConfig::with_name("남궁민수")
    };
    render_stamp(&backend, &config, &mut InkRng::seeded(0)).unwrap();
    let texts = texts(&backend.last_display_list().unwrap());

    assert_eq!(texts.len(), 4);
    // First two glyphs share the right column, top then bottom
    assert!(texts[0].1 > 75.5 && texts[1].1 > 75.5);
    assert!(texts[0].2 < texts[1].2);
    assert!(texts[2].1 < 75.5 && texts[3].1 < 75.5);
}

#[test]
fn rough_png_seal_strokes_a_polyline() {
    let backend = backend();
    let config = StampConfig {
        border_style: BorderStyle::Rough,
        format: OutputFormat::Png,
        ..StampConfig::with_name("이")
    };
    render_stamp(&backend, &config, &mut InkRng::seeded(5)).unwrap();
    let list = backend.last_display_list().unwrap();

    assert!(matches!(list.commands[0], DrawCommand::Clear));
    assert!(list
        .commands
        .iter()
        .any(|c| matches!(c, DrawCommand::StrokePolyline { points, .. } if points.len() > 50)));
    assert!(!list
        .commands
        .iter()
        .any(|c| matches!(c, DrawCommand::StrokeOutline { .. })));
}

#[test]
fn trademark_end_to_end() {
    let backend = backend();
    let config = TrademarkConfig::default();
    render_trademark(&backend, &config).unwrap();
    let list = backend.last_display_list().unwrap();

    assert_eq!((list.width, list.height), (945, 945));
    let texts = texts(&list);
    assert_eq!(texts.len(), 1);
    let (text, x, y, _, advance) = &texts[0];
    assert_eq!(text, "상표명");
    assert!(close(*x, 472.5) && close(*y, 472.5));
    assert!((advance - 827.0).abs() < 1.0, "advance {advance}");
}

#[test]
fn two_line_trademark_stacks_around_the_center() {
    let backend = backend();
    let config = TrademarkConfig::new("도장\n공방", 300);
    render_trademark(&backend, &config).unwrap();
    let texts = texts(&backend.last_display_list().unwrap());

    assert_eq!(texts.len(), 2);
    let line_height = texts[1].2 - texts[0].2;
    assert!(close(line_height, texts[0].3 * 1.2));
    assert!(close((texts[0].2 + texts[1].2) / 2.0, 472.5));
}

#[test]
fn blank_trademark_is_just_paper() {
    let backend = backend();
    render_trademark(&backend, &TrademarkConfig::new("  \n ", 300)).unwrap();
    let list = backend.last_display_list().unwrap();
    assert_eq!(list.commands.len(), 1);
    assert_eq!(list.texts().count(), 0);
}

#[test]
fn empty_seal_is_rejected() {
    let config = StampConfig::with_name("");
    assert!(matches!(
        render_stamp(&backend(), &config, &mut InkRng::seeded(0)),
        Err(DojangError::InvalidConfiguration(_))
    ));
}

#[test]
fn encoded_outputs_decode_at_size() {
    let backend = backend();

    let png = stamp_bytes(
        &backend,
        &StampConfig {
            format: OutputFormat::Png,
            ..StampConfig::default()
        },
        &mut InkRng::seeded(1),
    )
    .unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (151, 151));

    let jpeg = trademark_bytes(&backend, &TrademarkConfig::new("Dojang", 150)).unwrap();
    assert_eq!(&jpeg[..2], &[0xff, 0xd8]);
    let decoded = image::load_from_memory(&jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (472, 472));
}
