//! Cylon eye: a bright bar with dim fringes sweeping back and forth.

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::Rgb,
    ops::{clear, set_px},
};

/// Sweeping eye effect. The eye size is a bound parameter, so the
/// catalog carries narrow and wide presets of the same implementation.
#[derive(Debug, Clone)]
pub struct CylonEffect {
    color: Rgb,
    eye_size: u8,
    pos: i32,
    forward: bool,
}

impl CylonEffect {
    pub const fn new(color: Rgb, eye_size: u8) -> Self {
        Self {
            color,
            eye_size,
            pos: 0,
            forward: true,
        }
    }

    const fn fringe(&self) -> Rgb {
        Rgb {
            r: self.color.r / 10,
            g: self.color.g / 10,
            b: self.color.b / 10,
        }
    }
}

impl Effect for CylonEffect {
    #[allow(clippy::cast_possible_wrap)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        clear(leds);

        let len = leds.len() as i32;
        let eye = i32::from(self.eye_size);
        let fringe = self.fringe();

        set_px(leds, self.pos, fringe);
        for j in 1..=eye {
            set_px(leds, self.pos + j, self.color);
        }
        set_px(leds, self.pos + eye + 1, fringe);

        if self.forward {
            if self.pos < len - eye - 2 {
                self.pos += 1;
            } else {
                self.forward = false;
            }
        } else {
            if self.pos > 0 {
                self.pos -= 1;
            } else {
                self.forward = true;
            }
        }
    }

    fn reset(&mut self) {
        self.pos = 0;
        self.forward = true;
    }
}
