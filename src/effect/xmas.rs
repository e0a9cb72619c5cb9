//! Winter ensemble scene.
//!
//! Drifting snowflakes, swaying treats, reindeer that slow down near
//! food, an occasional Santa with a sparkle trail, and momentary
//! twinkles, all over a slowly breathing red-green background. Entity
//! populations are bounded; off-strip entities are dropped. Timers are
//! frame counters.

use core::f32::consts::TAU;

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::{Rgb, hsv_f32, scale_color},
    ops::{clear, set_px},
    random::Xorshift32,
};

const MAX_SNOWFLAKES: usize = 20;
const MAX_TREATS: usize = 5;
const MAX_REINDEER: usize = 2;
const MAX_TWINKLES: usize = 16;
const TRAIL_CAP: usize = 48;

const SNOWFLAKE_SPAWN_CHANCE: f32 = 0.1;
const SNOWFLAKE_SPEED_MIN: f32 = 0.02;
const SNOWFLAKE_SPEED_MAX: f32 = 0.05;
const TREAT_SPAWN_CHANCE: f32 = 0.005;
const TREAT_SWAY_SPEED: f32 = 0.02;
const REINDEER_SPAWN_CHANCE: f32 = 0.001;
const REINDEER_SPEED: f32 = 0.1;
const SANTA_SPAWN_CHANCE: f32 = 0.0005;
const SANTA_SPEED: f32 = 0.12;
const TWINKLE_CHANCE: f32 = 0.002;
const TWINKLE_LIFE: u8 = 3;
const TRAIL_LIFE: u8 = 5;

const REINDEER_WIDTH: i32 = 8;
const SANTA_WIDTH: i32 = 10;

const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
const BROWN: Rgb = Rgb {
    r: 139,
    g: 69,
    b: 19,
};
const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
const GOLD: Rgb = Rgb {
    r: 255,
    g: 215,
    b: 0,
};

// Red suit, white trim, face, belt; nose-to-tail pixel pattern.
const SANTA_COLORS: [Rgb; 10] = [
    RED,
    WHITE,
    Rgb {
        r: 255,
        g: 200,
        b: 150,
    },
    RED,
    Rgb { r: 0, g: 0, b: 0 },
    RED,
    WHITE,
    RED,
    RED,
    RED,
];

const ORNAMENT_COLORS: [Rgb; 6] = [
    RED,
    Rgb { r: 0, g: 255, b: 0 },
    WHITE,
    GOLD,
    Rgb { r: 200, g: 0, b: 0 },
    Rgb { r: 0, g: 200, b: 0 },
];

#[derive(Debug, Clone, Copy)]
struct Snowflake {
    pos: f32,
    speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TreatKind {
    CandyCane,
    Bell,
    Ornament,
}

#[derive(Debug, Clone, Copy)]
struct Treat {
    pos: f32,
    origin: f32,
    dir: i8,
    sway_timer: u8,
    color: Rgb,
    kind: TreatKind,
}

#[derive(Debug, Clone, Copy)]
struct Reindeer {
    pos: f32,
    dir: i8,
    paused: bool,
    pause_timer: u8,
}

#[derive(Debug, Clone)]
struct Santa {
    pos: f32,
    dir: i8,
    trail: heapless::Vec<(i32, u8), TRAIL_CAP>,
}

#[derive(Debug, Clone)]
pub struct XmasScene {
    primed: bool,
    frame: u32,
    hue_base: f32,
    hue_dir: i8,
    snowflakes: heapless::Vec<Snowflake, MAX_SNOWFLAKES>,
    treats: heapless::Vec<Treat, MAX_TREATS>,
    reindeer: heapless::Vec<Reindeer, MAX_REINDEER>,
    santa: Option<Santa>,
    twinkles: heapless::Vec<(usize, u8), MAX_TWINKLES>,
    rng: Xorshift32,
}

impl XmasScene {
    pub const fn new(seed: u32) -> Self {
        Self {
            primed: false,
            frame: 0,
            hue_base: 0.0,
            hue_dir: 1,
            snowflakes: heapless::Vec::new(),
            treats: heapless::Vec::new(),
            reindeer: heapless::Vec::new(),
            santa: None,
            twinkles: heapless::Vec::new(),
            rng: Xorshift32::new(seed),
        }
    }

    pub fn snowflakes(&self) -> usize {
        self.snowflakes.len()
    }

    pub const fn has_santa(&self) -> bool {
        self.santa.is_some()
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn spawn(&mut self, num_leds: usize) {
        if self.rng.next_f32() < SNOWFLAKE_SPAWN_CHANCE
            && self.snowflakes.len() < MAX_SNOWFLAKES
        {
            let _ = self.snowflakes.push(Snowflake {
                pos: 0.0,
                speed: self.rng.range_f32(SNOWFLAKE_SPEED_MIN, SNOWFLAKE_SPEED_MAX),
            });
        }

        if self.rng.next_f32() < TREAT_SPAWN_CHANCE && self.treats.len() < MAX_TREATS {
            let pos = self.rng.below(num_leds as u32) as f32;
            let kind = match self.rng.below(3) {
                0 => TreatKind::CandyCane,
                1 => TreatKind::Bell,
                _ => TreatKind::Ornament,
            };
            let color = match kind {
                TreatKind::CandyCane => WHITE,
                TreatKind::Bell => GOLD,
                TreatKind::Ornament => {
                    ORNAMENT_COLORS[self.rng.below(ORNAMENT_COLORS.len() as u32) as usize]
                }
            };
            let _ = self.treats.push(Treat {
                pos,
                origin: pos,
                dir: self.rng.direction(),
                sway_timer: self.rng.range(50, 150) as u8,
                color,
                kind,
            });
        }

        if self.rng.next_f32() < REINDEER_SPAWN_CHANCE
            && self.reindeer.len() < MAX_REINDEER
        {
            let max_start = num_leds.saturating_sub(10).max(1);
            let _ = self.reindeer.push(Reindeer {
                pos: self.rng.below(max_start as u32) as f32,
                dir: self.rng.direction(),
                paused: false,
                pause_timer: 0,
            });
        }

        if self.rng.next_f32() < SANTA_SPAWN_CHANCE && self.santa.is_none() {
            let from_left = self.rng.next_f32() > 0.5;
            self.santa = Some(Santa {
                pos: if from_left {
                    0.0
                } else {
                    num_leds.saturating_sub(11) as f32
                },
                dir: if from_left { 1 } else { -1 },
                trail: heapless::Vec::new(),
            });
        }
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn update_entities(&mut self, num_leds: usize) {
        let n = num_leds as f32;

        self.snowflakes.retain_mut(|s| {
            s.pos += s.speed;
            s.pos < n
        });

        for t in &mut self.treats {
            t.sway_timer = t.sway_timer.saturating_sub(1);
            if t.sway_timer == 0 {
                t.dir = -t.dir;
                t.sway_timer = self.rng.range(50, 150) as u8;
            }
            t.pos += f32::from(t.dir) * TREAT_SWAY_SPEED;
            // Keep each treat tethered near where it appeared.
            if libm::fabsf(t.pos - t.origin) > 2.0 {
                t.dir = -t.dir;
            }
        }

        let treats = &self.treats;
        let rng = &mut self.rng;
        self.reindeer.retain_mut(|r| {
            let mut speed = REINDEER_SPEED;
            let ahead = r.pos + (REINDEER_WIDTH * i32::from(r.dir)) as f32;
            let treat_ahead = treats.iter().any(|t| libm::fabsf(t.pos - ahead) < 5.0);
            if treat_ahead && !r.paused {
                if rng.next_f32() < 0.3 {
                    r.paused = true;
                    r.pause_timer = rng.range(20, 50) as u8;
                } else {
                    speed *= 0.5;
                }
            }
            if r.paused {
                r.pause_timer = r.pause_timer.saturating_sub(1);
                if r.pause_timer == 0 {
                    r.paused = false;
                }
            } else {
                r.pos += speed * f32::from(r.dir);
            }
            r.pos + REINDEER_WIDTH as f32 >= 0.0 && r.pos < n
        });

        let mut santa_gone = false;
        if let Some(santa) = &mut self.santa {
            let mut speed = SANTA_SPEED;
            let ahead = santa.pos + (SANTA_WIDTH * i32::from(santa.dir)) as f32;
            if treats.iter().any(|t| libm::fabsf(t.pos - ahead) < 10.0) {
                speed *= 1.3;
            }

            let old_pos = santa.pos;
            santa.pos += speed * f32::from(santa.dir);

            // Mark every pixel crossed this tick for the sparkle trail.
            let (start, end) = {
                let a = old_pos as i32;
                let b = santa.pos as i32;
                (a.min(b), a.max(b))
            };
            for p in start..=end {
                let _ = santa.trail.push((p, TRAIL_LIFE));
            }
            santa.trail.retain_mut(|(_, life)| {
                *life -= 1;
                *life > 0
            });

            santa_gone = santa.pos + (SANTA_WIDTH as f32) < 0.0 || santa.pos >= n;
        }
        if santa_gone {
            self.santa = None;
        }
    }

    /// Background: hue oscillating between red and green, shifted a
    /// little along the strip, with positional brightness breathing.
    #[allow(clippy::cast_precision_loss)]
    fn draw_background(&self, leds: &mut [Rgb]) {
        let len = leds.len() as f32;
        for (i, led) in leds.iter_mut().enumerate() {
            let ratio = i as f32 / len;
            let hue = self.hue_base + 0.1 * libm::sinf(ratio * TAU);
            let value =
                0.8 + 0.2 * libm::sinf(self.frame as f32 * 0.01 + ratio * TAU);
            *led = hsv_f32(hue, 1.0, value);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_entities(&self, leds: &mut [Rgb]) {
        for s in &self.snowflakes {
            set_px(leds, s.pos as i32, WHITE);
        }

        for t in &self.treats {
            let p = t.pos as i32;
            if t.kind == TreatKind::CandyCane {
                set_px(leds, p, WHITE);
                set_px(leds, p + 1, RED);
            } else {
                set_px(leds, p, t.color);
            }
        }

        for r in &self.reindeer {
            let start = r.pos as i32;
            for i in 0..REINDEER_WIDTH {
                // Brown body with the nose pixel at the front.
                let color = if i == REINDEER_WIDTH - 1 { RED } else { BROWN };
                set_px(leds, start + i, color);
            }
        }

        if let Some(santa) = &self.santa {
            let start = santa.pos as i32;
            for (i, &color) in SANTA_COLORS.iter().enumerate() {
                set_px(leds, start + i as i32, color);
            }
            for &(p, life) in &santa.trail {
                let intensity = life * (255 / TRAIL_LIFE);
                set_px(leds, p, scale_color(WHITE, intensity));
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_twinkles(&mut self, leds: &mut [Rgb]) {
        if self.rng.next_f32() < TWINKLE_CHANCE && !leds.is_empty() {
            let p = self.rng.below(leds.len() as u32) as usize;
            let _ = self.twinkles.push((p, TWINKLE_LIFE));
        }

        for &(p, life) in &self.twinkles {
            let intensity = life * (255 / TWINKLE_LIFE);
            set_px(leds, p as i32, scale_color(WHITE, intensity));
        }
        self.twinkles.retain_mut(|(_, life)| {
            *life -= 1;
            *life > 0
        });
    }
}

impl Effect for XmasScene {
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let num_leds = leds.len();
        if num_leds == 0 {
            return;
        }

        if !self.primed {
            self.primed = true;
            clear(leds);
        }

        self.frame += 1;

        // Hue base drifts between red (0.0) and green (0.33).
        self.hue_base += 0.0005 * f32::from(self.hue_dir);
        if self.hue_base > 0.33 {
            self.hue_base = 0.33;
            self.hue_dir = -1;
        } else if self.hue_base < 0.0 {
            self.hue_base = 0.0;
            self.hue_dir = 1;
        }

        self.spawn(num_leds);
        self.update_entities(num_leds);

        self.draw_background(leds);
        self.draw_entities(leds);
        self.draw_twinkles(leds);
    }

    fn reset(&mut self) {
        let seed = self.rng.next_u32();
        *self = Self::new(seed);
    }
}
