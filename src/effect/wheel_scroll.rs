//! Two-color gradient scroll: a repeating blend between two colors,
//! sliding one pixel per tick.

use embassy_time::Instant;

use super::Effect;
use crate::color::{Rgb, blend_colors};

const DEFAULT_PERIOD: u32 = 500;

#[derive(Debug, Clone)]
pub struct WheelScrollEffect {
    color_a: Rgb,
    color_b: Rgb,
    period: u32,
    position: u32,
}

impl WheelScrollEffect {
    pub const fn new(color_a: Rgb, color_b: Rgb) -> Self {
        Self {
            color_a,
            color_b,
            period: DEFAULT_PERIOD,
            position: 0,
        }
    }

    /// Set the repeat length of the gradient in pixels
    #[must_use]
    pub const fn with_period(mut self, period: u32) -> Self {
        self.period = if period == 0 { 1 } else { period };
        self
    }
}

impl Effect for WheelScrollEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        for (i, led) in leds.iter_mut().enumerate() {
            let offset = (i as u32 + self.position) % self.period;
            let amount = (offset * 255 / self.period) as u8;
            *led = blend_colors(self.color_a, self.color_b, amount);
        }
        self.position = self.position.wrapping_add(1);
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}
