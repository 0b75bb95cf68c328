//! Image output
//!
//! Writes a finished frame as an ASCII PPM (P3) image. Color components
//! are clamped to [0, 1] and scaled to the 0..255 byte range.
//!
//! Author: Moroya Sakamoto

use crate::render::Frame;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Image output errors.
#[derive(Error, Debug)]
pub enum IoError {
    /// Underlying file system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Save a frame as an ASCII PPM file.
pub fn save_ppm<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<(), IoError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "P3")?;
    writeln!(out)?;
    writeln!(out, "{} {} 255", frame.width(), frame.height())?;

    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let color = frame.pixel(x, y);
            write!(
                out,
                "{} {} {} ",
                (color.x.clamp(0.0, 1.0) * 255.0) as u8,
                (color.y.clamp(0.0, 1.0) * 255.0) as u8,
                (color.z.clamp(0.0, 1.0) * 255.0) as u8,
            )?;
        }
    }

    out.flush()?;
    Ok(())
}
