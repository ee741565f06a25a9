/// Floating-point intensity canvas with bilinear splatting and line drawing
use crate::error::{Error, Result};

/// Intensity written by `draw_line`
pub const FULL_INTENSITY: f32 = 1.0;

/// A width x height grid of intensities, stored row-major.
///
/// Writes accumulate and are never clamped, so a pixel may exceed 1.0 when
/// lines overlap. Nothing in the library clears the canvas implicitly: call
/// [`Canvas::begin_frame`] before drawing each new frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<f32>,
}

impl Canvas {
    /// Allocate a zeroed canvas. Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let size = width.checked_mul(height).ok_or(Error::AllocationFailed)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(size)?;
        pixels.resize(size, 0.0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixel intensities
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn max_intensity(&self) -> f32 {
        self.pixels.iter().copied().fold(0.0, f32::max)
    }

    pub fn clear(&mut self, value: f32) {
        self.pixels.fill(value);
    }

    /// Start a new frame by resetting every pixel to zero.
    ///
    /// Rendering only ever adds to the canvas, so skipping this call blends
    /// the previous frame into the next one.
    pub fn begin_frame(&mut self) {
        self.clear(0.0);
    }

    fn add(&mut self, x: i64, y: i64, value: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] += value;
        }
    }

    /// Bilinear splat: spread `intensity` over the four pixels around `(x, y)`
    /// in proportion to the fractional offsets. Off-canvas shares are dropped.
    pub fn set_pixel(&mut self, x: f32, y: f32, intensity: f32) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }

        let (x0, y0) = (x.floor(), y.floor());
        // No share of the splat can land on the grid
        if x0 < -1.0 || y0 < -1.0 || x0 >= self.width as f32 || y0 >= self.height as f32 {
            return;
        }
        let (fx, fy) = (x - x0, y - y0);
        let (x0, y0) = (x0 as i64, y0 as i64);

        self.add(x0, y0, intensity * (1.0 - fx) * (1.0 - fy));
        self.add(x0 + 1, y0, intensity * fx * (1.0 - fy));
        self.add(x0, y0 + 1, intensity * (1.0 - fx) * fy);
        self.add(x0 + 1, y0 + 1, intensity * fx * fy);
    }

    /// Draw a full-intensity line
    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32) {
        self.draw_line_with_intensity(x0, y0, x1, y1, thickness, FULL_INTENSITY);
    }

    /// Draw a line by stepping along the dominant axis one unit at a time.
    ///
    /// Each of the `floor(length) + 1` samples stamps a square of
    /// `(2 * half + 1)^2` splats, where `half = floor(thickness / 2)`. Any
    /// thickness below 2.0 gives a single-sample-wide line. Samples whose
    /// stamp falls entirely off the grid are skipped, so very long lines
    /// cost no more than their visible part.
    pub fn draw_line_with_intensity(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        thickness: f32,
        intensity: f32,
    ) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let length = dx.abs().max(dy.abs());

        // Coincident endpoints and non-finite input are both degenerate
        if !length.is_finite() || length == 0.0 {
            return;
        }

        let x_step = dx / length;
        let y_step = dy / length;
        let half = ((thickness / 2.0).floor() as i64).max(0);
        let reach = half as f32 + 2.0;

        // Only step through the samples whose stamp can touch the grid
        let (mut first, mut last) = (0.0f32, length.floor());
        for (start, step, size) in [(x0, x_step, self.width), (y0, y_step, self.height)] {
            let (lo, hi) = (-reach, size as f32 + reach);
            if step == 0.0 {
                if start < lo || start > hi {
                    return;
                }
                continue;
            }
            let (a, b) = ((lo - start) / step, (hi - start) / step);
            first = first.max(a.min(b).ceil());
            last = last.min(a.max(b).floor());
        }
        if first > last {
            return;
        }
        let span = self.width.max(self.height) + 2 * reach as usize + 1;

        for i in (first as u64..=last as u64).take(span) {
            let x = x0 + x_step * i as f32;
            let y = y0 + y_step * i as f32;
            for oy in -half..=half {
                for ox in -half..=half {
                    self.set_pixel(x + ox as f32, y + oy as f32, intensity);
                }
            }
        }
    }
}
