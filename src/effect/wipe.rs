//! Color wipe: fill the strip one pixel per tick, then hold.

use embassy_time::Instant;

use super::Effect;
use crate::color::Rgb;

/// One-shot wipe. Completion is modeled as state (`done`), not as an
/// error; once full, the strip holds the color.
#[derive(Debug, Clone)]
pub struct ColorWipeEffect {
    color: Rgb,
    index: usize,
    done: bool,
}

impl ColorWipeEffect {
    pub const fn new(color: Rgb) -> Self {
        Self {
            color,
            index: 0,
            done: false,
        }
    }

    /// Whether the wipe has covered the whole strip.
    pub const fn is_done(&self) -> bool {
        self.done
    }
}

impl Effect for ColorWipeEffect {
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        if self.done {
            return;
        }
        if self.index < leds.len() {
            leds[self.index] = self.color;
            self.index += 1;
        } else {
            self.done = true;
        }
    }

    fn reset(&mut self) {
        self.index = 0;
        self.done = false;
    }
}
