//! Host strip access
//!
//! The host owns the pixel colors. Usermods read and rewrite them through
//! [`PixelStrip`] after the effect has rendered and before the frame is
//! written out.

use alloc::vec;
use alloc::vec::Vec;

use crate::color::{BLACK, Rgbw};

/// Pixel access the host provides to usermods
pub trait PixelStrip {
    /// Number of physical pixels, fixed for the session
    fn length_physical(&self) -> usize;

    /// Current color of a pixel. Out-of-range pixels read as black.
    fn pixel_color(&self, index: usize) -> Rgbw;

    /// Overwrite the color of a pixel. Out-of-range pixels are ignored.
    fn set_pixel_color(&mut self, index: usize, color: Rgbw);

    /// Check if the host is in the middle of pushing a frame out
    fn is_updating(&self) -> bool {
        false
    }
}

/// In-memory strip backed by a color buffer
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStrip {
    pixels: Vec<Rgbw>,
    updating: bool,
}

impl MemoryStrip {
    /// Create a strip of `length` black pixels
    pub fn new(length: usize) -> Self {
        Self {
            pixels: vec![BLACK; length],
            updating: false,
        }
    }

    /// Mark the strip as busy, e.g. while a frame is being written out
    pub fn set_updating(&mut self, updating: bool) {
        self.updating = updating;
    }

    /// Get the pixel buffer
    pub fn pixels(&self) -> &[Rgbw] {
        &self.pixels
    }

    /// Get the pixel buffer for rendering
    pub fn pixels_mut(&mut self) -> &mut [Rgbw] {
        &mut self.pixels
    }
}

impl PixelStrip for MemoryStrip {
    fn length_physical(&self) -> usize {
        self.pixels.len()
    }

    fn pixel_color(&self, index: usize) -> Rgbw {
        self.pixels.get(index).copied().unwrap_or(BLACK)
    }

    fn set_pixel_color(&mut self, index: usize, color: Rgbw) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn is_updating(&self) -> bool {
        self.updating
    }
}
