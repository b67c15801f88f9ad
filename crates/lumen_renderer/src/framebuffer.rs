//! Frame buffer holding accumulated and quantized pixels.

use lumen_math::Vec3;

/// Color type alias (RGB, unbounded HDR values)
pub type Color = Vec3;

/// A 2D grid of accumulated floating-point pixel colors plus a parallel
/// grid of quantized 8-bit colors.
///
/// Both planes are row-major and zero-initialized. The float plane is
/// written by the render pass; the quantized plane only by tone mapping.
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
    pub quantized: Vec<[u8; 3]>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        let count = (width * height) as usize;
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; count],
            quantized: vec![[0; 3]; count],
        }
    }

    /// Get the accumulated color at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the accumulated color at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Get the quantized color at (x, y).
    pub fn get_quantized(&self, x: u32, y: u32) -> [u8; 3] {
        self.quantized[(y * self.width + x) as usize]
    }
}
