//! Rainbow cycle: the full color wheel stretched across the strip,
//! rotating one wheel step per tick.

use embassy_time::Instant;

use super::Effect;
use crate::color::{Rgb, wheel};

#[derive(Debug, Clone, Default)]
pub struct RainbowCycleEffect {
    wheel_pos: u8,
}

impl RainbowCycleEffect {
    pub const fn new() -> Self {
        Self { wheel_pos: 0 }
    }
}

impl Effect for RainbowCycleEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let len = leds.len();
        if len == 0 {
            return;
        }
        for (i, led) in leds.iter_mut().enumerate() {
            let spread = (i * 256 / len) as u8;
            *led = wheel(spread.wrapping_add(self.wheel_pos));
        }
        self.wheel_pos = self.wheel_pos.wrapping_add(1);
    }

    fn reset(&mut self) {
        self.wheel_pos = 0;
    }
}
