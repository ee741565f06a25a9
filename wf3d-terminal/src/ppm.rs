/// Portable pixel-map (PPM) image sink
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use wf3d_core::Canvas;

/// Map an accumulated intensity to an 8-bit level; values above 1.0 saturate
fn to_byte(intensity: f32) -> u8 {
    (intensity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Write `canvas` as a binary P6 image with equal RGB channels
pub fn write_ppm<W: Write>(canvas: &Canvas, writer: &mut W) -> io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", canvas.width(), canvas.height())?;

    let mut row = Vec::with_capacity(canvas.width() * 3);
    for line in canvas.pixels().chunks(canvas.width()) {
        row.clear();
        for &intensity in line {
            let level = to_byte(intensity);
            row.extend_from_slice(&[level, level, level]);
        }
        writer.write_all(&row)?;
    }
    Ok(())
}

pub fn save_ppm<P: AsRef<Path>>(canvas: &Canvas, path: P) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(canvas, &mut writer)?;
    writer.flush()
}
