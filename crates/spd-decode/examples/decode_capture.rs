//! Example: decode every channel in a console capture
//!
//! ```text
//! cargo run --example decode_capture -- capture.log
//! ```

use spd_decode::dump::{read_capture, Markers};
use spd_decode::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("spd_decode=debug")
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example decode_capture -- <capture.log>");
        std::process::exit(1);
    });

    let text = std::fs::read_to_string(&path)
        .map_err(|e| SpdError::malformed(format!("cannot read {path}: {e}")))?;
    let channels = read_capture(&text, &Markers::default())?;

    for (id, buffer) in channels.iter() {
        println!("── {id} ──");
        match decode(buffer, id) {
            Ok(module) => print!("{module}"),
            Err(e) => println!("{e}"),
        }
        println!();
    }

    match compare(&channels) {
        Ok(verdict) => print!("{verdict}"),
        Err(e) => println!("{e}"),
    }

    Ok(())
}
