//! The 3-byte RGB pixel and its classification helpers.
//!
//! `Pixel` is laid out exactly like one pixel of the raster block on disk
//! (three `u8` channels, no padding), so a `Vec<Pixel>` can be filled and
//! written as a single contiguous byte slice through `bytemuck`.

use bytemuck::{Pod, Zeroable};

/// Channel value of a fully saturated channel.
pub const CHANNEL_MAX: u8 = 255;

/// A single RGB pixel with 8-bit channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Pixel {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Pixel {
    /// Create a pixel from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a pixel with all three channels set to `value`.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// The channels as an `[r, g, b]` array.
    #[inline]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns true if all three channels are equal, including black and white.
    #[inline]
    pub fn is_grayscale(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Returns true if all three channels are 0.
    #[inline]
    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Returns true if all three channels are 255.
    #[inline]
    pub fn is_white(&self) -> bool {
        self.r == CHANNEL_MAX && self.g == CHANNEL_MAX && self.b == CHANNEL_MAX
    }

    /// Integer mean of the three channels.
    ///
    /// The sum is taken in `u16` so it cannot overflow (max 765), and the
    /// division truncates: `(100 + 50 + 25) / 3 == 58`.
    #[inline]
    pub fn brightness(&self) -> u8 {
        let sum = self.r as u16 + self.g as u16 + self.b as u16;
        (sum / 3) as u8
    }

    /// Set all three channels to `value`.
    #[inline]
    pub fn set_uniform(&mut self, value: u8) {
        self.r = value;
        self.g = value;
        self.b = value;
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Pixel> for [u8; 3] {
    fn from(pixel: Pixel) -> Self {
        pixel.channels()
    }
}
