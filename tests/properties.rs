//! Property-based tests for the buffer/diff/encode algebra.

use proptest::prelude::*;
use termgrid::{
    BufferPool, Cell, CellAttrs, CellBuffer, Color, NamedColor, Rect, Rgb, parse_keypress,
    parse_mouse_event,
};

fn arb_color() -> impl Strategy<Value = Option<Color>> {
    prop_oneof![
        Just(None),
        Just(Some(Color::Named(NamedColor::Red))),
        Just(Some(Color::Named(NamedColor::BrightBlue))),
        any::<u8>().prop_map(|n| Some(Color::Indexed(n))),
        any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Some(Color::Rgb(Rgb::new(r, g, b)))),
    ]
}

fn arb_cell() -> impl Strategy<Value = Cell> {
    (prop::char::range('!', '~'), arb_color(), arb_color(), any::<u8>()).prop_map(
        |(c, fg, bg, bits)| {
            let mut cell = Cell::new(c);
            cell.set_fg(fg)
                .set_bg(bg)
                .set_attrs(CellAttrs::from_bits_truncate(bits));
            cell
        },
    )
}

fn arb_buffer(width: u16, height: u16) -> impl Strategy<Value = CellBuffer> {
    prop::collection::vec((0..width, 0..height, arb_cell()), 0..64).prop_map(move |writes| {
        let mut buffer = CellBuffer::new(width, height);
        for (x, y, cell) in writes {
            buffer.set(x, y, cell);
        }
        buffer
    })
}

proptest! {
    #[test]
    fn diff_against_self_is_empty(buffer in arb_buffer(16, 8)) {
        prop_assert!(buffer.diff(&buffer).is_empty());
    }

    #[test]
    fn diff_patches_are_sufficient(a in arb_buffer(16, 8), b in arb_buffer(16, 8)) {
        let patches = a.diff(&b);
        let mut restored = a.clone();
        restored.apply_patches(&patches);
        for y in 0..8 {
            for x in 0..16 {
                prop_assert_eq!(restored.get(x, y), b.get(x, y));
            }
        }
    }

    #[test]
    fn diff_mismatched_sizes_covers_overlap(a in arb_buffer(16, 8), b in arb_buffer(10, 12)) {
        let patches = a.diff(&b);
        let mut restored = a.clone();
        restored.apply_patches(&patches);
        // Overlap is 10x8
        for y in 0..8 {
            for x in 0..10 {
                prop_assert_eq!(restored.get(x, y), b.get(x, y));
            }
        }
    }

    #[test]
    fn consolidation_is_minimal_bounding_box(
        rects in prop::collection::vec((0u16..50, 0u16..25, 1u16..10, 1u16..10), 1..16),
    ) {
        let mut buffer = CellBuffer::new(50, 25);
        let bounds = buffer.bounds();
        let mut expected = Rect::ZERO;
        for &(x, y, w, h) in &rects {
            let clamped = Rect::new(x, y, w, h).intersection(&bounds);
            buffer.add_damage(Rect::new(x, y, w, h));
            expected = expected.union(&clamped);
        }

        let consolidated = buffer.consolidate_damage().to_vec();
        prop_assert_eq!(consolidated.len(), 1);
        // Exactly the bounding box: superset of every input, no larger
        prop_assert_eq!(consolidated[0], expected);
        for &(x, y, w, h) in &rects {
            let clamped = Rect::new(x, y, w, h).intersection(&bounds);
            prop_assert_eq!(consolidated[0].union(&clamped), consolidated[0]);
        }
    }

    #[test]
    fn write_str_reads_back(s in "[ -~]{0,20}") {
        let mut buffer = CellBuffer::new(32, 2);
        let consumed = buffer.write_str(0, 0, &s, None, None, CellAttrs::empty());
        prop_assert_eq!(consumed as usize, s.len());
        let read: String = (0..consumed)
            .map(|x| buffer.get(x, 0).unwrap().glyph().to_owned())
            .collect();
        prop_assert_eq!(read, s);
    }

    #[test]
    fn pool_returns_clean_buffers(
        writes in prop::collection::vec((0u16..10, 0u16..5, arb_cell()), 1..16),
    ) {
        let mut pool = BufferPool::default();
        let mut buffer = pool.acquire(10, 5);
        for (x, y, cell) in writes {
            buffer.set(x, y, cell);
        }
        pool.release(buffer);

        let clean = pool.acquire(10, 5);
        prop_assert!(!clean.has_damage());
        for y in 0..5 {
            for x in 0..10 {
                prop_assert_eq!(clean.get(x, y), Some(&Cell::EMPTY));
            }
        }
    }

    #[test]
    fn key_decoder_is_total(bytes in prop::collection::vec(any::<u8>(), 0..12)) {
        // Never panics; unmatched multi-byte chunks come back verbatim
        let press = parse_keypress(&bytes);
        if press.code.is_none() {
            prop_assert!(press.modifiers.is_empty());
        }
    }

    #[test]
    fn mouse_decoder_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..16)) {
        let _ = parse_mouse_event(&bytes);
    }

    #[test]
    fn mouse_decoder_consumes_prefix_only(
        cb in 0u16..128, cx in 1u16..500, cy in 1u16..500,
        trailing in prop::collection::vec(any::<u8>(), 0..8),
    ) {
        let mut report = format!("\x1b[<{cb};{cx};{cy}M").into_bytes();
        let report_len = report.len();
        report.extend_from_slice(&trailing);

        let (event, len) = parse_mouse_event(&report).unwrap();
        prop_assert_eq!(len, report_len);
        prop_assert_eq!(event.x, cx - 1);
        prop_assert_eq!(event.y, cy - 1);
    }
}
