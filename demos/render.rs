//! Render demo: draw two frames and emit the minimal ANSI between them.
//!
//! Run with `cargo run --example render_demo`. The demo prints the encoded
//! escape sequences as visible text rather than driving a live terminal, so
//! the byte savings of the patch path are easy to inspect.

use termgrid::{
    buffer_to_ansi, patches_to_ansi, CellAttrs, Color, DoubleBuffer, NamedColor, OutputBuffer,
};

fn main() -> std::io::Result<()> {
    let mut frame = DoubleBuffer::new(40, 6);

    // First frame
    frame.back_mut().write_str(
        0,
        0,
        "termgrid demo",
        Some(Color::Named(NamedColor::Green)),
        None,
        CellAttrs::BOLD,
    );
    frame
        .back_mut()
        .write_str(0, 2, "count: 0", None, None, CellAttrs::empty());
    frame.swap();

    let full = buffer_to_ansi(frame.front());
    println!("full render ({} bytes): {:?}", full.len(), full);

    // Second frame: redraw into the stale back buffer, bump the counter
    frame.back_mut().clear();
    frame.back_mut().write_str(
        0,
        0,
        "termgrid demo",
        Some(Color::Named(NamedColor::Green)),
        None,
        CellAttrs::BOLD,
    );
    frame
        .back_mut()
        .write_str(0, 2, "count: 1", None, None, CellAttrs::empty());
    let patches = frame.swap();

    let incremental = patches_to_ansi(&patches, frame.width());
    println!(
        "incremental render: {} patches, {} bytes: {:?}",
        patches.len(),
        incremental.len(),
        incremental
    );

    // The boundary adapter: accumulate and flush in one syscall
    let mut out = OutputBuffer::new();
    out.write_str(&incremental);
    out.flush_to(&mut std::io::sink())?;

    Ok(())
}
