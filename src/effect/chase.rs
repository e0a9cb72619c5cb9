//! Theater chase effects: every third pixel lit, marching one step per
//! tick.

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::{Rgb, wheel},
    ops::clear,
};

const CHASE_SPACING: usize = 3;

/// Single-color theater chase.
#[derive(Debug, Clone)]
pub struct TheaterChaseEffect {
    color: Rgb,
    offset: u8,
}

impl TheaterChaseEffect {
    pub const fn new(color: Rgb) -> Self {
        Self { color, offset: 0 }
    }
}

impl Effect for TheaterChaseEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        clear(leds);
        let len = leds.len();
        let mut i = self.offset as usize;
        while i < len {
            leds[i] = self.color;
            i += CHASE_SPACING;
        }
        self.offset = (self.offset + 1) % CHASE_SPACING as u8;
    }

    fn reset(&mut self) {
        self.offset = 0;
    }
}

/// Theater chase where the lit pixels sample the color wheel; the wheel
/// position advances once per full chase cycle.
#[derive(Debug, Clone, Default)]
pub struct TheaterChaseRainbowEffect {
    offset: u8,
    wheel_pos: u8,
}

impl TheaterChaseRainbowEffect {
    pub const fn new() -> Self {
        Self {
            offset: 0,
            wheel_pos: 0,
        }
    }
}

impl Effect for TheaterChaseRainbowEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        clear(leds);
        for (j, led) in leds.iter_mut().enumerate() {
            if j % CHASE_SPACING == self.offset as usize {
                *led = wheel((j as u8).wrapping_add(self.wheel_pos));
            }
        }
        self.offset = (self.offset + 1) % CHASE_SPACING as u8;
        if self.offset == 0 {
            self.wheel_pos = self.wheel_pos.wrapping_add(1);
        }
    }

    fn reset(&mut self) {
        self.offset = 0;
        self.wheel_pos = 0;
    }
}
