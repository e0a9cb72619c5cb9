//! Whole-strip intensity effects: breathe and strobe.

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::{Rgb, scale_color},
    ops::{clear, fill},
};

const DEFAULT_STROBE_FLASHES: u8 = 10;

/// Breathe effect: the whole strip fades in and out.
///
/// Intensity moves one step per tick, so a full cycle takes 510 ticks
/// regardless of wall-clock gaps between frames.
#[derive(Debug, Clone)]
pub struct BreatheEffect {
    color: Rgb,
    level: u8,
    rising: bool,
}

impl BreatheEffect {
    pub const fn new(color: Rgb) -> Self {
        Self {
            color,
            level: 0,
            rising: true,
        }
    }
}

impl Effect for BreatheEffect {
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        if self.rising {
            if self.level == 255 {
                self.rising = false;
            } else {
                self.level += 1;
            }
        } else {
            if self.level == 0 {
                self.rising = true;
            } else {
                self.level -= 1;
            }
        }

        fill(leds, scale_color(self.color, self.level));
    }

    fn reset(&mut self) {
        self.level = 0;
        self.rising = true;
    }
}

/// Strobe effect: a burst of full-strip flashes, then one dark frame,
/// repeating. The burst "finished" condition is plain state, not an
/// error.
#[derive(Debug, Clone)]
pub struct StrobeEffect {
    color: Rgb,
    flashes: u8,
    half_cycles: u8,
    on: bool,
}

impl StrobeEffect {
    pub const fn new(color: Rgb) -> Self {
        Self {
            color,
            flashes: DEFAULT_STROBE_FLASHES,
            half_cycles: 0,
            on: true,
        }
    }

    /// Set the number of flashes per burst
    #[must_use]
    pub const fn with_flashes(mut self, flashes: u8) -> Self {
        self.flashes = flashes;
        self
    }
}

impl Effect for StrobeEffect {
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        if self.half_cycles < self.flashes.saturating_mul(2) {
            if self.on {
                fill(leds, self.color);
            } else {
                clear(leds);
            }
            self.on = !self.on;
            self.half_cycles += 1;
        } else {
            // Burst done: one dark frame, then start over.
            clear(leds);
            self.half_cycles = 0;
            self.on = true;
        }
    }

    fn reset(&mut self) {
        self.half_cycles = 0;
        self.on = true;
    }
}
