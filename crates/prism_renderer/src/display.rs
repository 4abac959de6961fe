//! Output targets for the renderer.

use crate::Color;

/// A pixel sink the renderer writes finished pixels into.
///
/// The renderer only borrows its display; storage and presentation belong to
/// the caller.
pub trait Display {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Store the final colour of pixel `(x, y)`, `(0, 0)` being top-left.
    fn put_pixel(&mut self, x: u32, y: u32, color: Color);

    /// Width over height.
    fn aspect(&self) -> f32 {
        self.width() as f32 / self.height().max(1) as f32
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// In-memory frame buffer holding unclamped colours.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// All channels as one flat slice, `[r, g, b, r, g, b, ...]`.
    pub fn as_f32_slice(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Reset every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self, gamma_correct: bool) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &color in &self.pixels {
            let color = if gamma_correct {
                Color::new(
                    linear_to_gamma(color.r),
                    linear_to_gamma(color.g),
                    linear_to_gamma(color.b),
                )
            } else {
                color
            };
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

impl Display for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        match self.index(x, y) {
            Some(i) => self.pixels[i] = color,
            None => log::warn!(
                "Ignoring write to ({}, {}) outside {}x{} frame buffer",
                x,
                y,
                self.width,
                self.height
            ),
        }
    }
}
