mod palette;

pub use palette::{FIRE_PALETTE, heat_color, sample_ramp, wheel};
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use smart_leds::hsv::hsv2rgb;

use crate::math8::{blend8, qadd8, scale8};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Build a color from a 0xRRGGBB literal
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(hex: u32) -> Rgb {
    Rgb {
        r: ((hex >> 16) & 0xFF) as u8,
        g: ((hex >> 8) & 0xFF) as u8,
        b: (hex & 0xFF) as u8,
    }
}

/// Blend two colors channel-wise (`amount_of_b` = 0..255)
pub const fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Add two colors channel-wise, saturating at 255
pub const fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: qadd8(a.r, b.r),
        g: qadd8(a.g, b.g),
        b: qadd8(a.b, b.b),
    }
}

/// Scale all channels of a color by `scale` (0-255 = 0.0-1.0)
pub const fn scale_color(c: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(c.r, scale),
        g: scale8(c.g, scale),
        b: scale8(c.b, scale),
    }
}

/// Convert fractional HSV (each component in `[0, 1]`) to RGB.
///
/// The scene patterns compute hue and brightness in float space; this
/// maps them onto the 8-bit HSV rainbow used everywhere else.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_f32(h: f32, s: f32, v: f32) -> Rgb {
    let h = h - libm::floorf(h); // wrap into [0, 1)
    hsv2rgb(Hsv {
        hue: (h * 255.0) as u8,
        sat: (s.clamp(0.0, 1.0) * 255.0) as u8,
        val: (v.clamp(0.0, 1.0) * 255.0) as u8,
    })
}
