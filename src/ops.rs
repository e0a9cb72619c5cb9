//! Frame-view pixel operations.
//!
//! Effects draw at computed positions that may land off the strip
//! (meteor heads, scene entities); these helpers silently ignore
//! out-of-range indices instead of making every call site check.

use crate::color::Rgb;
use crate::math8::qsub8;

/// Set a single pixel, ignoring out-of-range indices.
#[allow(clippy::cast_sign_loss)]
pub fn set_px(leds: &mut [Rgb], index: i32, color: Rgb) {
    if index >= 0 {
        if let Some(led) = leds.get_mut(index as usize) {
            *led = color;
        }
    }
}

/// Read a single pixel; out-of-range reads are black.
#[allow(clippy::cast_sign_loss)]
pub fn get_px(leds: &[Rgb], index: i32) -> Rgb {
    if index >= 0 {
        leds.get(index as usize)
            .copied()
            .unwrap_or(Rgb { r: 0, g: 0, b: 0 })
    } else {
        Rgb { r: 0, g: 0, b: 0 }
    }
}

/// Fill the whole frame with one color.
pub fn fill(leds: &mut [Rgb], color: Rgb) {
    for led in leds.iter_mut() {
        *led = color;
    }
}

/// Clear the whole frame to black.
pub fn clear(leds: &mut [Rgb]) {
    fill(leds, Rgb { r: 0, g: 0, b: 0 });
}

/// Fade one pixel toward black by `amount` per channel.
pub fn fade_to_black(leds: &mut [Rgb], index: usize, amount: u8) {
    if let Some(led) = leds.get_mut(index) {
        led.r = qsub8(led.r, amount);
        led.g = qsub8(led.g, amount);
        led.b = qsub8(led.b, amount);
    }
}
