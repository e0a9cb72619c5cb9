//! Kinematic bounce effects.
//!
//! `BouncingBallsEffect` integrates projectile motion against real
//! elapsed time (gravity, impact velocity, per-ball damping) and maps
//! height onto the strip. `ColorBounceEffect` is a pair of pixels
//! crossing the strip and trading places, shifting color on every wall
//! hit.

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::Rgb,
    ops::{clear, set_px},
};

/// Upper bound on simultaneously simulated balls.
pub const MAX_BALLS: usize = 24;

const GRAVITY: f32 = -9.81;
const START_HEIGHT: f32 = 1.0;
/// Below this rebound velocity a ball is considered at rest.
const REST_VELOCITY: f32 = 0.01;
/// Clamp for wall-clock gaps (pauses, stalls) so a stalled loop does
/// not teleport the simulation.
const MAX_DT_MS: u64 = 100;

const SOLO_COLORS: [Rgb; 1] = [Rgb { r: 255, g: 0, b: 0 }];
const TRIO_COLORS: [Rgb; 3] = [
    Rgb { r: 255, g: 0, b: 0 },
    Rgb {
        r: 255,
        g: 255,
        b: 255,
    },
    Rgb { r: 0, g: 0, b: 255 },
];

#[derive(Debug, Clone, Copy, Default)]
struct Ball {
    since_bounce_ms: u32,
    impact_velocity: f32,
    dampening: f32,
    height: f32,
}

/// Balls dropped from a common height, bouncing with per-ball damping.
#[derive(Debug, Clone)]
pub struct BouncingBallsEffect {
    colors: &'static [Rgb],
    count: usize,
    continuous: bool,
    balls: [Ball; MAX_BALLS],
    last_ms: Option<u64>,
}

impl BouncingBallsEffect {
    #[allow(clippy::cast_precision_loss)]
    pub fn new(colors: &'static [Rgb], count: usize, continuous: bool) -> Self {
        let count = count.clamp(1, MAX_BALLS);
        let launch = libm::sqrtf(2.0 * -GRAVITY * START_HEIGHT);
        let mut balls = [Ball::default(); MAX_BALLS];
        for (i, ball) in balls.iter_mut().enumerate().take(count) {
            *ball = Ball {
                since_bounce_ms: 0,
                impact_velocity: launch,
                // Later balls lose slightly more energy per bounce, so
                // the group spreads out over time.
                dampening: 0.90 - i as f32 / (count * count) as f32,
                height: START_HEIGHT,
            };
        }
        Self {
            colors,
            count,
            continuous,
            balls,
            last_ms: None,
        }
    }

    /// One red ball.
    pub fn solo() -> Self {
        Self::new(&SOLO_COLORS, 1, false)
    }

    /// Twenty balls cycling through red, white and blue.
    pub fn crowd() -> Self {
        Self::new(&TRIO_COLORS, 20, false)
    }
}

impl Effect for BouncingBallsEffect {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn step(&mut self, now: Instant, leds: &mut [Rgb]) {
        let len = leds.len();
        if len == 0 {
            return;
        }

        let ms = now.as_millis();
        let dt_ms = match self.last_ms {
            None => 0,
            Some(last) => ms.saturating_sub(last).min(MAX_DT_MS),
        };
        self.last_ms = Some(ms);

        let launch = libm::sqrtf(2.0 * -GRAVITY * START_HEIGHT);

        for ball in self.balls.iter_mut().take(self.count) {
            ball.since_bounce_ms += dt_ms as u32;
            let t = ball.since_bounce_ms as f32 / 1000.0;
            let mut h = 0.5 * GRAVITY * t * t + ball.impact_velocity * t;

            if h < 0.0 {
                h = 0.0;
                ball.impact_velocity *= ball.dampening;
                ball.since_bounce_ms = 0;
                if ball.impact_velocity < REST_VELOCITY && self.continuous {
                    ball.impact_velocity = launch;
                }
            }
            ball.height = h;
        }

        clear(leds);
        for (i, ball) in self.balls.iter().take(self.count).enumerate() {
            let pixel =
                libm::roundf(ball.height * (len - 1) as f32 / START_HEIGHT) as i32;
            let color = self.colors[i % self.colors.len()];
            set_px(leds, pixel, color);
            set_px(leds, pixel + 1, color);
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.colors, self.count, self.continuous);
    }
}

/// Two pixels starting at opposite ends, crossing and bouncing off the
/// walls; both colors shift a little on every bounce.
#[derive(Debug, Clone)]
pub struct ColorBounceEffect {
    color_a: Rgb,
    color_b: Rgb,
    pos_a: i32,
    pos_b: i32,
    dir: i32,
    primed: bool,
}

impl ColorBounceEffect {
    pub const fn new(color_a: Rgb, color_b: Rgb) -> Self {
        Self {
            color_a,
            color_b,
            pos_a: 0,
            pos_b: 0,
            dir: 1,
            primed: false,
        }
    }

    const fn shift(c: Rgb) -> Rgb {
        Rgb {
            r: c.r.wrapping_add(10),
            g: c.g.wrapping_add(10),
            b: c.b.wrapping_add(10),
        }
    }
}

impl Effect for ColorBounceEffect {
    #[allow(clippy::cast_possible_wrap)]
    fn step(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let len = leds.len() as i32;
        if len == 0 {
            return;
        }
        if !self.primed {
            self.pos_a = 0;
            self.pos_b = len - 1;
            self.primed = true;
        }

        clear(leds);

        self.pos_a += self.dir;
        self.pos_b -= self.dir;

        if self.pos_a >= len - 1 || self.pos_a <= 0 {
            self.dir = -self.dir;
            self.color_a = Self::shift(self.color_a);
            self.color_b = Self::shift(self.color_b);
        }

        set_px(leds, self.pos_a, self.color_a);
        set_px(leds, self.pos_b, self.color_b);
    }

    fn reset(&mut self) {
        self.primed = false;
        self.dir = 1;
    }
}
