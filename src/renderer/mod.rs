//! Pixel renderer for radar draw commands
//!
//! The animator speaks in radar units; everything here works in canvas
//! pixels. `units_per_pixel` maps one onto the other. Output backends
//! convert the finished canvas to their native format.

mod raster;

pub use raster::draw_command;

use crate::color::RgbColor;
use crate::radar::{DrawCommand, Viewport};

/// Owned RGB pixel buffer, row-major.
pub struct Canvas {
    pub data: Vec<RgbColor>,
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![RgbColor::BLACK; width * height],
            width,
            height,
        }
    }

    /// Resize the canvas, reallocating only when the buffer is too small.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let needed = width * height;
        if self.data.len() < needed {
            self.data.resize(needed, RgbColor::BLACK);
        }
    }

    #[inline]
    pub fn clear(&mut self, background: RgbColor) {
        let len = self.width * self.height;
        self.data[..len].fill(background);
    }

    /// Composite `color` at (x, y) with the given opacity. Out-of-bounds writes are dropped.
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: RgbColor, opacity: f32) {
        if x >= self.width || y >= self.height || opacity <= 0.0 {
            return;
        }
        let idx = y * self.width + x;
        self.data[idx] = color.over(self.data[idx], opacity);
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> RgbColor {
        if x < self.width && y < self.height {
            self.data[y * self.width + x]
        } else {
            RgbColor::BLACK
        }
    }

    /// The radar-unit viewport this canvas covers.
    pub fn viewport(&self, units_per_pixel: f32) -> Viewport {
        Viewport::new(
            self.width as f32 * units_per_pixel,
            self.height as f32 * units_per_pixel,
        )
    }
}

/// Main entry point: paint a complete frame onto the canvas.
pub fn render_frame(
    canvas: &mut Canvas,
    commands: &[DrawCommand],
    background: RgbColor,
    units_per_pixel: f32,
) {
    canvas.clear(background);
    for command in commands {
        draw_command(canvas, command, units_per_pixel);
    }
}
