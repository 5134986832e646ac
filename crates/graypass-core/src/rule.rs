//! The selective grayscale rule.
//!
//! Achromatic pixels (black, white, or any gray) are left as they are. Every
//! other pixel is replaced by its truncated channel mean. The rule only reads
//! and writes the pixel it is given, so it can run over any partition of the
//! pixel array in any order.

use crate::pixel::Pixel;

/// Decide what a pixel becomes under the rule.
///
/// Returns `None` for pixels the rule leaves untouched, or the uniform value
/// the pixel should take otherwise.
#[inline]
pub fn grayscale_value(pixel: Pixel) -> Option<u8> {
    if pixel.is_black() || pixel.is_white() || pixel.is_grayscale() {
        None
    } else {
        Some(pixel.brightness())
    }
}

/// Apply the rule to a single pixel in place.
///
/// Returns `true` if the pixel was changed.
#[inline]
pub fn apply_rule(pixel: &mut Pixel) -> bool {
    match grayscale_value(*pixel) {
        Some(value) => {
            pixel.set_uniform(value);
            true
        }
        None => false,
    }
}

/// Apply the rule to every pixel of a slice, returning how many changed.
pub fn apply_rule_to_slice(pixels: &mut [Pixel]) -> usize {
    pixels.iter_mut().map(|p| apply_rule(p) as usize).sum()
}
