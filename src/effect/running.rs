//! Running lights: a sine-shaped intensity wave sliding along the strip.

use embassy_time::Instant;

use super::Effect;
use crate::color::{Rgb, scale_color};

/// Spatial period divisor: one full wave spans ~63 pixels.
const WAVE_SCALE: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct RunningLightsEffect {
    color: Rgb,
    position: u32,
}

impl RunningLightsEffect {
    pub const fn new(color: Rgb) -> Self {
        Self { color, position: 0 }
    }
}

impl Effect for RunningLightsEffect {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        for (i, led) in leds.iter_mut().enumerate() {
            let phase = (i as u32 + self.position) as f32 / WAVE_SCALE;
            let level = (libm::sinf(phase) + 1.0) * 127.5;
            *led = scale_color(self.color, level as u8);
        }
        self.position = self.position.wrapping_add(1);
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}
