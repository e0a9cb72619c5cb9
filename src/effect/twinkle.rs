//! Randomized point effects: twinkle, sparkle and snow sparkle.
//!
//! All of these draw uniformly from pixel index space each tick; the
//! "only one lit" variants clear the frame before drawing.

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::Rgb,
    ops::{clear, fill},
    random::Xorshift32,
};

const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

const SNOW_HOLD_TICKS: u8 = 5;

/// Light one random pixel per tick in a fixed color.
#[derive(Debug, Clone)]
pub struct TwinkleEffect {
    color: Rgb,
    only_one: bool,
    rng: Xorshift32,
}

impl TwinkleEffect {
    pub const fn new(color: Rgb, only_one: bool, seed: u32) -> Self {
        Self {
            color,
            only_one,
            rng: Xorshift32::new(seed),
        }
    }
}

impl Effect for TwinkleEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }
        if self.only_one {
            clear(leds);
        }
        let idx = self.rng.below(leds.len() as u32) as usize;
        leds[idx] = self.color;
    }
}

/// Light one random pixel per tick in a random color.
#[derive(Debug, Clone)]
pub struct TwinkleRandomEffect {
    only_one: bool,
    rng: Xorshift32,
}

impl TwinkleRandomEffect {
    pub const fn new(only_one: bool, seed: u32) -> Self {
        Self {
            only_one,
            rng: Xorshift32::new(seed),
        }
    }
}

impl Effect for TwinkleRandomEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }
        if self.only_one {
            clear(leds);
        }
        let idx = self.rng.below(leds.len() as u32) as usize;
        leds[idx] = Rgb {
            r: self.rng.next_u8(),
            g: self.rng.next_u8(),
            b: self.rng.next_u8(),
        };
    }
}

/// One pixel flashes on for a single tick, then goes dark before the
/// next pixel is chosen.
#[derive(Debug, Clone)]
pub struct SparkleEffect {
    color: Rgb,
    lit: Option<usize>,
    hold: u8,
    rng: Xorshift32,
}

impl SparkleEffect {
    pub const fn new(color: Rgb, seed: u32) -> Self {
        Self {
            color,
            lit: None,
            hold: 0,
            rng: Xorshift32::new(seed),
        }
    }
}

impl Effect for SparkleEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }
        match self.lit {
            None => {
                let idx = self.rng.below(leds.len() as u32) as usize;
                leds[idx] = self.color;
                self.lit = Some(idx);
                self.hold = 1;
            }
            Some(idx) => {
                if self.hold > 0 {
                    self.hold -= 1;
                    if self.hold == 0 {
                        leds[idx] = Rgb { r: 0, g: 0, b: 0 };
                        self.lit = None;
                    }
                }
            }
        }
    }

    fn reset(&mut self) {
        self.lit = None;
        self.hold = 0;
    }
}

/// White glints over a dim base color, restored after a short hold.
#[derive(Debug, Clone)]
pub struct SnowSparkleEffect {
    base: Rgb,
    glints: [usize; 2],
    hold: u8,
    primed: bool,
    rng: Xorshift32,
}

impl SnowSparkleEffect {
    pub const fn new(base: Rgb, seed: u32) -> Self {
        Self {
            base,
            glints: [0; 2],
            hold: 0,
            primed: false,
            rng: Xorshift32::new(seed),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn pick_distinct(&mut self, len: usize) -> [usize; 2] {
        let a = self.rng.below(len as u32) as usize;
        let mut b = self.rng.below(len as u32) as usize;
        if len > 1 {
            while b == a {
                b = self.rng.below(len as u32) as usize;
            }
        }
        [a, b]
    }
}

impl Effect for SnowSparkleEffect {
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }
        if !self.primed {
            fill(leds, self.base);
            self.primed = true;
        }

        if self.hold == 0 {
            self.glints = self.pick_distinct(leds.len());
            for &g in &self.glints {
                leds[g] = WHITE;
            }
            self.hold = SNOW_HOLD_TICKS;
        } else {
            self.hold -= 1;
            if self.hold == 0 {
                for &g in &self.glints {
                    leds[g] = self.base;
                }
            }
        }
    }

    fn reset(&mut self) {
        self.hold = 0;
        self.primed = false;
    }
}
