//! 8-bit and 16-bit integer math helpers.
//!
//! Saturating blends and the integral-domain sine functions used by the
//! wave-synthesis pattern. Angles wrap modulo 256 (`sin8`) or 65536
//! (`sin16`) so phase accumulators stay deterministic.

use core::f32::consts::TAU;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Saturating 8-bit add
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Saturating 8-bit subtract
#[inline]
pub const fn qsub8(a: u8, b: u8) -> u8 {
    a.saturating_sub(b)
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Sine over an 8-bit angular domain.
///
/// `angle` sweeps one full period over 0-255; the result is offset to
/// 1-255 with 128 at zero crossings.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn sin8(angle: u8) -> u8 {
    let rad = f32::from(angle) * TAU / 256.0;
    #[allow(clippy::cast_sign_loss)]
    {
        ((libm::sinf(rad) * 127.0) as i16 + 128) as u8
    }
}

/// Sine over a 16-bit angular domain.
///
/// `angle` sweeps one full period over 0-65535; returns -32767..=32767.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn sin16(angle: u16) -> i16 {
    let rad = f32::from(angle) * TAU / 65536.0;
    (libm::sinf(rad) * 32767.0) as i16
}

/// Ease in out quadratic
pub fn ease_in_out_quad(i: u8) -> u8 {
    let j = if i & 0x80 != 0 { 255 - i } else { i };
    let jj = scale8(j, j);
    let jj2 = jj << 1;
    if i & 0x80 == 0 { jj2 } else { 255 - jj2 }
}
