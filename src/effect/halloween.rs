//! Pumpkin pursuit scene.
//!
//! A hue-cycling pumpkin roams the strip chasing spawned treats. Eaten
//! treats grow the pumpkin (width only ever increases within a run);
//! the scene resets itself once the pumpkin fills the strip. Every
//! timer in here is a frame counter, so the scene is deterministic at
//! any tick rate.

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::{Rgb, blend_colors, hsv_f32},
    ops::{clear, set_px},
    random::Xorshift32,
};

const MAX_TREATS: usize = 16;

const MAX_PUMPKIN_SPEED: f32 = 0.7;
const WANDER_MIN_SPEED: f32 = 0.01;
const WANDER_MAX_SPEED: f32 = 0.2;
/// Minimum distance between the pumpkin and a freshly spawned treat.
const SPAWN_CLEARANCE: f32 = 20.0;
/// Frames between spawn opportunities.
const SPAWN_COOLDOWN: u32 = 50;
const START_WIDTH: u16 = 20;
const PANIC_FRAMES: u8 = 20;
const MOUTH_FLASH_FRAMES: u8 = 50;
const EAT_FLASH_FRAMES: u8 = 10;

#[derive(Debug, Clone, Copy)]
struct Treat {
    pos: f32,
    dir: i8,
    color: Rgb,
    panic_timer: u8,
    length: u8,
    base_speed: f32,
    special: bool,
}

#[derive(Debug, Clone)]
pub struct HalloweenScene {
    primed: bool,
    frame: u32,
    pumpkin_pos: f32,
    pumpkin_dir: i8,
    pumpkin_speed: f32,
    pumpkin_accel: f32,
    next_dir_change: u32,
    color_phase: u16,
    width: u16,
    treats: heapless::Vec<Treat, MAX_TREATS>,
    last_spawn: u32,
    eaten: u32,
    mouth_flash: bool,
    mouth_flash_timer: u8,
    eat_flash_timer: u8,
    rng: Xorshift32,
}

impl HalloweenScene {
    pub const fn new(seed: u32) -> Self {
        Self {
            primed: false,
            frame: 0,
            pumpkin_pos: 0.0,
            pumpkin_dir: 1,
            pumpkin_speed: 0.05,
            pumpkin_accel: 0.0,
            next_dir_change: 0,
            color_phase: 0,
            width: START_WIDTH,
            treats: heapless::Vec::new(),
            last_spawn: 0,
            eaten: 0,
            mouth_flash: false,
            mouth_flash_timer: 0,
            eat_flash_timer: 0,
            rng: Xorshift32::new(seed),
        }
    }

    /// Pumpkin body width in pixels (monotonically non-decreasing
    /// within a run).
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Treats eaten so far in this run.
    pub const fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn treats(&self) -> usize {
        self.treats.len()
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn spawn_treats(&mut self, num_leds: usize) {
        let group_size = self.rng.range(1, 3);
        for _ in 0..group_size {
            // Find a spot away from the pumpkin, give up after a while.
            let mut pos = 0.0;
            for _ in 0..50 {
                pos = self.rng.below(num_leds as u32) as f32;
                if libm::fabsf(pos - self.pumpkin_pos) > SPAWN_CLEARANCE {
                    break;
                }
            }
            let special = self.rng.next_f32() > 0.9;
            let (length, base_speed) = if special {
                (3, 0.4)
            } else {
                let length = self.rng.range(1, 3) as u8;
                (length, 0.5 - f32::from(length - 1) * 0.15)
            };
            let treat = Treat {
                pos,
                dir: self.rng.direction(),
                color: Rgb {
                    r: self.rng.range(100, 255) as u8,
                    g: self.rng.range(100, 255) as u8,
                    b: self.rng.range(100, 255) as u8,
                },
                panic_timer: 0,
                length,
                base_speed,
                special,
            };
            let _ = self.treats.push(treat);
        }
        self.last_spawn = self.frame;
    }

    /// Reverse treats that drift into each other.
    fn bounce_close_pairs(&mut self) {
        for i in 0..self.treats.len() {
            for j in i + 1..self.treats.len() {
                if libm::fabsf(self.treats[i].pos - self.treats[j].pos) < 2.0 {
                    self.treats[i].dir = -self.treats[i].dir;
                    self.treats[j].dir = -self.treats[j].dir;
                }
            }
        }
    }

    /// Pick direction and speed: chase the nearest treat, faster the
    /// closer it gets, or wander when the strip is empty.
    fn steer_pumpkin(&mut self) {
        let nearest = self
            .treats
            .iter()
            .map(|t| t.pos - self.pumpkin_pos)
            .min_by(|a, b| {
                libm::fabsf(*a)
                    .partial_cmp(&libm::fabsf(*b))
                    .unwrap_or(core::cmp::Ordering::Equal)
            });

        if let Some(dist) = nearest {
            self.pumpkin_dir = if dist > 0.0 { 1 } else { -1 };
            let distance = libm::fabsf(dist);
            let mut speed: f32 = 0.3;
            if distance < 20.0 {
                speed += 0.2;
            }
            if distance < 10.0 {
                speed += 0.2;
            }
            if distance < 5.0 {
                speed += 0.3;
            }
            if self.rng.next_f32() > 0.99 {
                self.pumpkin_dir = -self.pumpkin_dir;
            }
            self.pumpkin_speed = speed.min(MAX_PUMPKIN_SPEED);
        } else {
            if self.frame > self.next_dir_change {
                self.pumpkin_dir = self.rng.direction();
                self.next_dir_change = self.frame + self.rng.range(50, 150);
            }
            if self.rng.next_f32() > 0.95 {
                self.pumpkin_accel = self.rng.range_f32(-0.02, 0.02);
            }
            self.pumpkin_speed = (self.pumpkin_speed + self.pumpkin_accel)
                .clamp(WANDER_MIN_SPEED, WANDER_MAX_SPEED);
        }
    }

    /// Move treats (distance-scaled speed, panic reversals, flicker)
    /// and draw the survivors; off-strip treats are dropped.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn move_and_draw_treats(&mut self, leds: &mut [Rgb]) {
        let num_leds = leds.len() as f32;
        let pumpkin_pos = self.pumpkin_pos;
        let old = core::mem::replace(&mut self.treats, heapless::Vec::new());

        for mut t in old {
            let dist = libm::fabsf(t.pos - pumpkin_pos);
            let speed = if dist > 40.0 {
                t.base_speed * 0.1
            } else if dist > 20.0 {
                t.base_speed * 0.5
            } else {
                // Close to the pumpkin: scramble, sometimes turning
                // right around (held off by the panic cooldown).
                if t.panic_timer == 0 && self.rng.next_f32() > 0.9 {
                    t.dir = -t.dir;
                    t.panic_timer = PANIC_FRAMES;
                }
                t.base_speed * 1.2
            };

            if t.panic_timer > 0 {
                t.panic_timer -= 1;
            }
            if self.rng.next_f32() > 0.995 {
                t.dir = -t.dir;
            }

            t.pos += f32::from(t.dir) * speed;

            if t.special {
                t.color = hsv_f32(self.rng.next_f32(), 1.0, 1.0);
            } else if self.rng.next_f32() > 0.95 {
                t.color = Rgb {
                    r: flicker_channel(&mut self.rng, t.color.r),
                    g: flicker_channel(&mut self.rng, t.color.g),
                    b: flicker_channel(&mut self.rng, t.color.b),
                };
            }

            if t.pos >= 0.0 && t.pos < num_leds {
                let start = t.pos as i32;
                for l in 0..i32::from(t.length) {
                    set_px(leds, start + l * i32::from(t.dir), t.color);
                }
                let _ = self.treats.push(t);
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_pumpkin(&mut self, leds: &mut [Rgb], body: Rgb, side: Rgb) {
        let center = self.pumpkin_pos as i32;
        let start = center - i32::from(self.width) / 2;
        let end = start + i32::from(self.width);

        for i in start..end {
            let edge_dist = (i - start).min(end - i - 1);
            let mut color = if edge_dist < 3 {
                // Blend the outermost three pixels into the side hue.
                let amount = ((3 - edge_dist) * 255 / 3) as u8;
                blend_colors(body, side, amount)
            } else {
                body
            };
            if self.eat_flash_timer > 0 && self.rng.next_f32() < 0.1 {
                color = Rgb {
                    r: 255,
                    g: 255,
                    b: 255,
                };
            }
            set_px(leds, i, color);
        }

        self.draw_eyes(leds, center);
        self.draw_mouth(leds, center);
    }

    /// Eyes grow more elaborate as the pumpkin grows.
    fn draw_eyes(&self, leds: &mut [Rgb], center: i32) {
        if self.width < 30 {
            set_px(leds, center, Rgb { r: 255, g: 0, b: 0 });
        } else if self.width < 50 {
            set_px(leds, center, Rgb { r: 255, g: 0, b: 0 });
            set_px(leds, center + 1, Rgb { r: 255, g: 100, b: 0 });
        } else {
            set_px(leds, center - 1, Rgb { r: 200, g: 0, b: 0 });
            set_px(leds, center, Rgb { r: 255, g: 0, b: 0 });
            set_px(leds, center + 1, Rgb { r: 255, g: 80, b: 0 });
            set_px(leds, center + 2, Rgb { r: 180, g: 80, b: 0 });
        }
    }

    fn draw_mouth(&mut self, leds: &mut [Rgb], center: i32) {
        let mouth_width = (self.width / 4).max(5);
        let mouth_start = center - i32::from(mouth_width) / 2;

        if self.mouth_flash_timer == 0 && self.rng.range(0, 100) > 98 {
            self.mouth_flash = !self.mouth_flash;
            self.mouth_flash_timer = MOUTH_FLASH_FRAMES;
        }
        if self.mouth_flash_timer > 0 {
            self.mouth_flash_timer -= 1;
        }

        let color = if self.mouth_flash {
            Rgb {
                r: 255,
                g: 255,
                b: 255,
            }
        } else {
            Rgb {
                r: 200,
                g: 200,
                b: 150,
            }
        };
        for p in mouth_start..mouth_start + i32::from(mouth_width) {
            set_px(leds, p, color);
        }
    }

    /// Remove treats overlapping the pumpkin body and grow on
    /// thresholds. Consumed treats are gone before the next draw.
    #[allow(clippy::cast_possible_truncation)]
    fn consume_treats(&mut self) {
        let center = self.pumpkin_pos as i32;
        let start = center - i32::from(self.width) / 2;
        let end = start + i32::from(self.width);

        let mut eaten = 0u32;
        let mut special_eaten = 0u32;
        self.treats.retain(|t| {
            let overlaps = (0..i32::from(t.length)).any(|l| {
                let p = t.pos as i32 + l * i32::from(t.dir);
                p >= start && p <= end
            });
            if overlaps {
                eaten += 1;
                if t.special {
                    special_eaten += 1;
                }
            }
            !overlaps
        });

        if eaten > 0 {
            self.eaten += eaten;
            self.eat_flash_timer = EAT_FLASH_FRAMES;

            let mut growth = 0;
            if self.eaten % 5 == 0 {
                growth += 5;
            }
            growth += 10 * special_eaten as u16;
            self.width += growth;
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn flicker_channel(rng: &mut Xorshift32, value: u8) -> u8 {
    let jitter = rng.range(0, 40) as i16 - 20;
    (i16::from(value) + jitter).clamp(100, 255) as u8
}

/// Slow violet-blue background gradient scrolling with the frame count.
#[allow(clippy::cast_precision_loss)]
fn background_color(position: u32) -> Rgb {
    let hue_deg = (position % 600) as f32 / 600.0 * 80.0 + 200.0;
    hsv_f32(hue_deg / 360.0, 1.0, 0.2)
}

impl Effect for HalloweenScene {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let num_leds = leds.len();
        if num_leds == 0 {
            return;
        }

        if !self.primed {
            self.primed = true;
            self.pumpkin_pos = (num_leds / 2) as f32;
            clear(leds);
        }

        self.frame += 1;

        // A pumpkin that fills the strip ends the run.
        if usize::from(self.width) >= num_leds {
            let seed = self.rng.next_u32();
            *self = Self::new(seed);
            return;
        }

        if self.frame.wrapping_sub(self.last_spawn) > SPAWN_COOLDOWN
            && self.rng.next_f32() > 0.95
        {
            self.spawn_treats(num_leds);
        }

        // Hue rotation for the body, side hue offset 30 degrees; a slow
        // sine breathes the brightness between 0.8 and 1.0.
        self.color_phase = (self.color_phase + 1) % 360;
        let side_phase = (self.color_phase + 30) % 360;
        let sine = (libm::sinf(self.frame as f32 * 0.05) + 1.0) / 2.0;
        let value = 0.8 + 0.2 * sine;
        let body = hsv_f32(f32::from(self.color_phase) / 360.0, 1.0, value);
        let side = hsv_f32(f32::from(side_phase) / 360.0, 1.0, value);

        for (i, led) in leds.iter_mut().enumerate() {
            *led = background_color(i as u32 + self.frame);
        }

        self.bounce_close_pairs();
        self.steer_pumpkin();

        self.pumpkin_pos = (self.pumpkin_pos
            + self.pumpkin_speed * f32::from(self.pumpkin_dir))
        .clamp(0.0, (num_leds - 1) as f32);

        self.move_and_draw_treats(leds);
        self.draw_pumpkin(leds, body, side);
        self.consume_treats();

        if self.eat_flash_timer > 0 {
            self.eat_flash_timer -= 1;
        }
    }

    fn reset(&mut self) {
        let seed = self.rng.next_u32();
        *self = Self::new(seed);
    }
}
