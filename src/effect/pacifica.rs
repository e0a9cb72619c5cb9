//! Layered ocean-wave synthesis.
//!
//! Four palette layers, each a sine-indexed walk through a 16-entry
//! color ramp, composited additively over a slowly breathing deep-blue
//! background. Layer speeds are themselves modulated by beat
//! oscillators, so the swell speeds up and slows down organically. Two
//! post-passes finish the look: whitecaps where luminance crests above
//! a moving threshold, and a deepen pass that pulls the palette toward
//! teal.
//!
//! All phase math runs on wrapping 16-bit angles; per-pixel colors are
//! fractional-index blends within the ramps.

use embassy_time::Instant;

use super::Effect;
use crate::{
    beat::{beat8, beat16, beatsin8, beatsin16},
    color::{Rgb, add_colors, rgb_from_u32, sample_ramp},
    math8::{qadd8, scale8, sin8, sin16},
    ops::fill,
};

macro_rules! hex_ramp {
    ($($color:expr),*) => {
        [
            $(rgb_from_u32($color)),*
        ]
    };
}

// Deep blue-green ramps; 1 and 2 differ only in their bright crest
// entries, 3 is the lighter accent ramp.
#[allow(clippy::unreadable_literal)]
const RAMP_1: [Rgb; 16] = hex_ramp![
    0x000507, 0x000409, 0x00030B, 0x00030D, 0x000210, 0x000212, 0x000114,
    0x000117, 0x000019, 0x00001C, 0x000026, 0x000031, 0x00003B, 0x000046,
    0x14554B, 0x28AA50
];

#[allow(clippy::unreadable_literal)]
const RAMP_2: [Rgb; 16] = hex_ramp![
    0x000507, 0x000409, 0x00030B, 0x00030D, 0x000210, 0x000212, 0x000114,
    0x000117, 0x000019, 0x00001C, 0x000026, 0x000031, 0x00003B, 0x000046,
    0x0C5F52, 0x19BE5F
];

#[allow(clippy::unreadable_literal)]
const RAMP_3: [Rgb; 16] = hex_ramp![
    0x000208, 0x00030E, 0x000514, 0x00061A, 0x000820, 0x000927, 0x000B2D,
    0x000C33, 0x000E39, 0x001040, 0x001450, 0x001860, 0x001C70, 0x002080,
    0x1040BF, 0x2060FF
];

/// Per-pixel angular step inside one layer pass.
const WAVE_ANGLE_STEP: u16 = 250;

#[derive(Debug, Clone, Default)]
pub struct PacificaEffect {
    // Color-index start points for the four layers, advanced by
    // beat-modulated elapsed time each tick.
    ci_start: [u16; 4],
    last_ms: Option<u64>,
}

impl PacificaEffect {
    pub const fn new() -> Self {
        Self {
            ci_start: [0; 4],
            last_ms: None,
        }
    }

    /// Render one layer: a sine-modulated walk through `ramp`, added
    /// saturating onto the existing frame.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn one_layer(
        leds: &mut [Rgb],
        ramp: &[Rgb],
        ci_start: u16,
        wave_scale: u16,
        brightness: u8,
        angle_offset: u16,
    ) {
        let mut ci = ci_start;
        let mut wave_angle = angle_offset;
        let wave_scale_half = wave_scale / 2 + 20;

        for led in leds.iter_mut() {
            wave_angle = wave_angle.wrapping_add(WAVE_ANGLE_STEP);
            let s16 = (i32::from(sin16(wave_angle)) + 32768) as u32;
            let cs = ((s16 * u32::from(wave_scale_half)) >> 16) as u16 + wave_scale_half;
            ci = ci.wrapping_add(cs);
            let sindex16 = (i32::from(sin16(ci)) + 32768) as u32;
            let sindex8 = (sindex16 >> 8) as u8;
            let c = sample_ramp(ramp, sindex8, brightness);
            *led = add_colors(*led, c);
        }
    }

    /// Brighten the crests: wherever luminance exceeds a slowly
    /// oscillating threshold, boost channels by the overage (green and
    /// blue more than red, so caps read as white-teal).
    #[allow(clippy::cast_possible_truncation)]
    fn add_whitecaps(now: Instant, leds: &mut [Rgb]) {
        let base_threshold = beatsin8(now, 9, 55, 65, 0);
        let mut wave = beat8(now, 7);

        for led in leds.iter_mut() {
            let threshold = scale8(sin8(wave), 20).wrapping_add(base_threshold);
            wave = wave.wrapping_add(7);
            let lum =
                ((u16::from(led.r) + u16::from(led.g) + u16::from(led.b)) / 3) as u8;
            if lum > threshold {
                let overage = lum - threshold;
                let overage2 = qadd8(overage, overage);
                led.r = qadd8(led.r, overage);
                led.g = qadd8(led.g, overage2);
                led.b = qadd8(led.b, qadd8(overage2, overage2));
            }
        }
    }

    /// Bias the whole frame toward deep teal-blue.
    fn deepen_colors(leds: &mut [Rgb]) {
        for led in leds.iter_mut() {
            led.b = scale8(led.b, 145);
            led.g = scale8(led.g, 200);
            led.r = qadd8(led.r, 2);
            led.g = qadd8(led.g, 5);
            led.b = qadd8(led.b, 7);
        }
    }
}

impl Effect for PacificaEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }

        let ms = now.as_millis();
        let delta_ms = self.last_ms.map_or(0, |last| ms.saturating_sub(last));
        self.last_ms = Some(ms);

        // Advance the four layer phases by beat-modulated elapsed time.
        let speed1 = u64::from(beatsin16(now, 1, 179, 269, 0));
        let speed2 = u64::from(beatsin16(now, 1, 179, 269, 0));
        let delta1 = delta_ms * speed1 / 256;
        let delta2 = delta_ms * speed2 / 256;
        let delta21 = (delta1 + delta2) / 2;

        self.ci_start[0] = self.ci_start[0]
            .wrapping_add(((delta1 * u64::from(beatsin16(now, 20, 10, 13, 0))) >> 16) as u16);
        self.ci_start[1] = self.ci_start[1]
            .wrapping_sub(((delta21 * u64::from(beatsin16(now, 15, 8, 11, 0))) >> 16) as u16);
        self.ci_start[2] = self.ci_start[2]
            .wrapping_sub(((delta1 * u64::from(beatsin16(now, 10, 5, 7, 0))) >> 16) as u16);
        self.ci_start[3] = self.ci_start[3]
            .wrapping_sub(((delta2 * u64::from(beatsin16(now, 5, 4, 6, 0))) >> 16) as u16);

        // Breathing near-black blue-green background.
        fill(
            leds,
            Rgb {
                r: beatsin8(now, 2, 2, 5, 0),
                g: beatsin8(now, 2, 6, 10, 0),
                b: beatsin8(now, 2, 8, 12, 0),
            },
        );

        Self::one_layer(
            leds,
            &RAMP_1,
            self.ci_start[0],
            beatsin16(now, 1, 11 * 256, 14 * 256, 0),
            beatsin8(now, 1, 70, 130, 0),
            beat16(now, 3).wrapping_neg(),
        );
        Self::one_layer(
            leds,
            &RAMP_2,
            self.ci_start[1],
            beatsin16(now, 1, 6 * 256, 9 * 256, 0),
            beatsin8(now, 1, 40, 80, 0),
            beat16(now, 4),
        );
        Self::one_layer(
            leds,
            &RAMP_3,
            self.ci_start[2],
            6 * 256,
            beatsin8(now, 1, 10, 38, 0),
            beat16(now, 5).wrapping_neg(),
        );
        Self::one_layer(
            leds,
            &RAMP_3,
            self.ci_start[3],
            5 * 256,
            beatsin8(now, 1, 10, 28, 0),
            beat16(now, 6),
        );

        Self::add_whitecaps(now, leds);
        Self::deepen_colors(leds);
    }

    fn reset(&mut self) {
        self.ci_start = [0; 4];
        self.last_ms = None;
    }
}
