//! Beat oscillators: smooth periodic functions of real elapsed time.
//!
//! A "beat" is a sawtooth phase driven by a beats-per-minute rate;
//! `beatsin8`/`beatsin16` shape it through a sine into a bounded range.
//! All functions take `now` explicitly so callers stay in control of the
//! clock (and tests can drive synthetic time).

use embassy_time::Instant;

use crate::math8::{sin8, sin16};

/// Sawtooth phase in the 16-bit angular domain, one period per beat.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn beat16(now: Instant, bpm: u16) -> u16 {
    ((now.as_millis().wrapping_mul(u64::from(bpm)).wrapping_mul(65536)) / 60_000) as u16
}

/// Sawtooth phase in the 8-bit angular domain, one period per beat.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn beat8(now: Instant, bpm: u16) -> u8 {
    ((now.as_millis().wrapping_mul(u64::from(bpm)).wrapping_mul(256)) / 60_000) as u8
}

/// Sine oscillator between `min` and `max` at `bpm` beats per minute.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn beatsin16(now: Instant, bpm: u16, min: u16, max: u16, phase_offset: u16) -> u16 {
    let beat = beat16(now, bpm).wrapping_add(phase_offset);
    let sine = i32::from(sin16(beat));
    let amplitude = i32::from((max - min) / 2);
    // Truncating division (not a shift): keeps the trough at exactly
    // `min` instead of flooring one count below it.
    let centered = i32::from(min) + amplitude + (sine * amplitude) / 32768;
    centered as u16
}

/// 8-bit variant of [`beatsin16`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn beatsin8(now: Instant, bpm: u16, min: u8, max: u8, phase_offset: u8) -> u8 {
    let beat = beat8(now, bpm).wrapping_add(phase_offset);
    let amplitude = i16::from((max - min) / 2);
    let swing = (i16::from(sin8(beat)) - 128) * amplitude / 127;
    (i16::from(min) + amplitude + swing) as u8
}
