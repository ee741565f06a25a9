/// ASCII image sink: prints a canvas as coloured terminal characters
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wf3d_core::Canvas;

/// Character luminosity ramp (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Downsamples a canvas into a grid of characters
pub struct AsciiRenderer {
    columns: usize,
    rows: usize,
}

impl AsciiRenderer {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Brightest pixel under each character cell, row-major
    pub fn cell_intensities(&self, canvas: &Canvas) -> Vec<f32> {
        let mut cells = vec![0.0f32; self.columns * self.rows];
        for y in 0..canvas.height() {
            let row = y * self.rows / canvas.height();
            for x in 0..canvas.width() {
                let col = x * self.columns / canvas.width();
                let value = canvas.pixels()[y * canvas.width() + x];
                let cell = &mut cells[row * self.columns + col];
                *cell = cell.max(value);
            }
        }
        cells
    }

    pub fn character(intensity: f32) -> char {
        let top = LUMINOSITY_RAMP.len() - 1;
        let index = (intensity.clamp(0.0, 1.0) * top as f32) as usize;
        LUMINOSITY_RAMP[index.min(top)]
    }

    pub fn draw<W: Write>(&self, canvas: &Canvas, writer: &mut W) -> std::io::Result<()> {
        let cells = self.cell_intensities(canvas);
        for row in cells.chunks(self.columns) {
            for &intensity in row {
                let c = Self::character(intensity);

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        writer.flush()
    }
}
