//! Decode demo: feed raw terminal chunks through the input decoders.
//!
//! Run with `cargo run --example decode_demo`.

use termgrid::{parse_keypress, parse_mouse_event};

fn main() {
    let key_chunks: &[&[u8]] = &[
        b"a",
        b"A",
        b"\x03",
        b"\x1b[A",
        b"\x1b[1;5A",
        b"\x1bOP",
        b"\x1b[11~",
        b"\x1b[[A",
        b"\x1bf",
        b"pasted text",
    ];

    for chunk in key_chunks {
        let press = parse_keypress(chunk);
        println!("{:?} -> {press:?}", String::from_utf8_lossy(chunk));
    }

    let mouse_chunk = b"\x1b[<0;12;4M\x1b[<64;12;4M";
    let mut rest: &[u8] = mouse_chunk;
    while let Some((event, len)) = parse_mouse_event(rest) {
        println!("mouse: {event:?} ({len} bytes)");
        rest = &rest[len..];
    }
}
