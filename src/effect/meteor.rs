//! Meteor rain: a bright head with a randomly decaying trail.

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::Rgb,
    ops::{fade_to_black, set_px},
    random::Xorshift32,
};

const DEFAULT_SIZE: u8 = 10;
const DEFAULT_TRAIL_DECAY: u8 = 64;

#[derive(Debug, Clone)]
pub struct MeteorEffect {
    color: Rgb,
    size: u8,
    trail_decay: u8,
    random_decay: bool,
    pos: u32,
    rng: Xorshift32,
}

impl MeteorEffect {
    pub const fn new(color: Rgb, seed: u32) -> Self {
        Self {
            color,
            size: DEFAULT_SIZE,
            trail_decay: DEFAULT_TRAIL_DECAY,
            random_decay: true,
            pos: 0,
            rng: Xorshift32::new(seed),
        }
    }

    /// Set the meteor head size in pixels
    #[must_use]
    pub const fn with_size(mut self, size: u8) -> Self {
        self.size = size;
        self
    }

    /// Set the per-tick trail fade amount
    #[must_use]
    pub const fn with_trail_decay(mut self, decay: u8) -> Self {
        self.trail_decay = decay;
        self
    }
}

impl Effect for MeteorEffect {
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let len = leds.len();
        if len == 0 {
            return;
        }

        // Fade the whole strip; with random decay each pixel keeps its
        // value on roughly half the ticks, which breaks the trail up.
        for j in 0..len {
            if !self.random_decay || self.rng.range(0, 10) > 5 {
                fade_to_black(leds, j, self.trail_decay);
            }
        }

        for i in 0..i32::from(self.size) {
            set_px(leds, self.pos as i32 - i, self.color);
        }

        self.pos += 1;
        if self.pos as usize >= len {
            self.pos = 0;
        }
    }

    fn reset(&mut self) {
        self.pos = 0;
    }
}
