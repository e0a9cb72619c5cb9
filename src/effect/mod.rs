//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait. The catalog binds stable
//! integer ids to effect constructors with their preset parameters;
//! divergent parameterizations of one implementation are distinct
//! presets with their own ids.

mod bounce;
mod breathe;
mod chase;
mod cylon;
mod fire;
mod halloween;
mod meteor;
mod pacifica;
mod rainbow;
mod running;
mod static_color;
mod twinkle;
mod wheel_scroll;
mod wipe;
mod xmas;

use embassy_time::Instant;

pub use bounce::{BouncingBallsEffect, ColorBounceEffect, MAX_BALLS};
pub use breathe::{BreatheEffect, StrobeEffect};
pub use chase::{TheaterChaseEffect, TheaterChaseRainbowEffect};
pub use cylon::CylonEffect;
pub use fire::{FireEffect, HeatMap};
pub use halloween::HalloweenScene;
pub use meteor::MeteorEffect;
pub use pacifica::PacificaEffect;
pub use rainbow::RainbowCycleEffect;
pub use running::RunningLightsEffect;
pub use static_color::StaticColorEffect;
pub use twinkle::{
    SnowSparkleEffect, SparkleEffect, TwinkleEffect, TwinkleRandomEffect,
};
pub use wheel_scroll::WheelScrollEffect;
pub use wipe::ColorWipeEffect;
pub use xmas::XmasScene;

use crate::color::Rgb;

const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
const SNOW_BASE: Rgb = Rgb {
    r: 16,
    g: 16,
    b: 16,
};

const EFFECT_NAME_BREATHE: &str = "breathe";
const EFFECT_NAME_PACIFICA: &str = "pacifica";
const EFFECT_NAME_WHEEL_SCROLL: &str = "wheel_scroll";
const EFFECT_NAME_HALLOWEEN: &str = "halloween";
const EFFECT_NAME_CYLON_NARROW: &str = "cylon_narrow";
const EFFECT_NAME_CYLON_WIDE: &str = "cylon_wide";
const EFFECT_NAME_TWINKLE: &str = "twinkle";
const EFFECT_NAME_TWINKLE_RANDOM: &str = "twinkle_random";
const EFFECT_NAME_SPARKLE: &str = "sparkle";
const EFFECT_NAME_SNOW_SPARKLE: &str = "snow_sparkle";
const EFFECT_NAME_RUNNING_LIGHTS: &str = "running_lights";
const EFFECT_NAME_COLOR_WIPE: &str = "color_wipe";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_THEATER_CHASE: &str = "theater_chase";
const EFFECT_NAME_THEATER_CHASE_RAINBOW: &str = "theater_chase_rainbow";
const EFFECT_NAME_FIRE: &str = "fire";
const EFFECT_NAME_BOUNCING_BALL: &str = "bouncing_ball";
const EFFECT_NAME_BOUNCING_BALLS: &str = "bouncing_balls";
const EFFECT_NAME_METEOR: &str = "meteor";
const EFFECT_NAME_XMAS: &str = "xmas";
const EFFECT_NAME_COLOR_BOUNCE: &str = "color_bounce";
const EFFECT_NAME_EMBER: &str = "ember";
const EFFECT_NAME_STROBE: &str = "strobe";

const EFFECT_ID_BREATHE: u8 = 0;
const EFFECT_ID_PACIFICA: u8 = 1;
const EFFECT_ID_WHEEL_SCROLL: u8 = 2;
const EFFECT_ID_HALLOWEEN: u8 = 3;
const EFFECT_ID_CYLON_NARROW: u8 = 4;
const EFFECT_ID_CYLON_WIDE: u8 = 5;
const EFFECT_ID_TWINKLE: u8 = 6;
const EFFECT_ID_TWINKLE_RANDOM: u8 = 7;
const EFFECT_ID_SPARKLE: u8 = 8;
const EFFECT_ID_SNOW_SPARKLE: u8 = 9;
const EFFECT_ID_RUNNING_LIGHTS: u8 = 10;
const EFFECT_ID_COLOR_WIPE: u8 = 11;
const EFFECT_ID_RAINBOW: u8 = 12;
const EFFECT_ID_THEATER_CHASE: u8 = 13;
const EFFECT_ID_THEATER_CHASE_RAINBOW: u8 = 14;
const EFFECT_ID_FIRE: u8 = 15;
const EFFECT_ID_BOUNCING_BALL: u8 = 16;
const EFFECT_ID_BOUNCING_BALLS: u8 = 17;
const EFFECT_ID_METEOR: u8 = 18;
const EFFECT_ID_XMAS: u8 = 19;
const EFFECT_ID_COLOR_BOUNCE: u8 = 20;
const EFFECT_ID_EMBER: u8 = 21;
const EFFECT_ID_STROBE: u8 = 22;

pub trait Effect {
    /// Render a single frame increment.
    ///
    /// One call is one tick; implementations never block, sleep or loop
    /// over frames internally.
    fn step(&mut self, now: Instant, leds: &mut [Rgb]);

    /// Reset effect state
    fn reset(&mut self) {}
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Whole-strip fade in and out
    Breathe(BreatheEffect),
    /// Layered ocean-wave synthesis
    Pacifica(PacificaEffect),
    /// Two-color gradient scroll
    WheelScroll(WheelScrollEffect),
    /// Pumpkin pursuit scene
    Halloween(HalloweenScene),
    /// Narrow sweeping eye
    CylonNarrow(CylonEffect),
    /// Wide sweeping eye
    CylonWide(CylonEffect),
    /// Random red twinkles
    Twinkle(TwinkleEffect),
    /// Random twinkles in random colors
    TwinkleRandom(TwinkleRandomEffect),
    /// Single white flash at a random pixel
    Sparkle(SparkleEffect),
    /// White glints over a dim base
    SnowSparkle(SnowSparkleEffect),
    /// Sine intensity wave
    RunningLights(RunningLightsEffect),
    /// One-shot fill, one pixel per tick
    ColorWipe(ColorWipeEffect),
    /// Rotating full-strip rainbow
    RainbowCycle(RainbowCycleEffect),
    /// Marching every-third-pixel chase
    TheaterChase(TheaterChaseEffect),
    /// Chase sampling the color wheel
    TheaterChaseRainbow(TheaterChaseRainbowEffect),
    /// Heat simulation, palette mapping
    Fire(FireEffect),
    /// Single bouncing ball
    BouncingBall(BouncingBallsEffect),
    /// Twenty bouncing balls
    BouncingBalls(BouncingBallsEffect),
    /// Bright head with decaying trail
    Meteor(MeteorEffect),
    /// Winter ensemble scene
    Xmas(XmasScene),
    /// Two pixels crossing and bouncing
    ColorBounce(ColorBounceEffect),
    /// Heat simulation, calm preset with ramp mapping
    Ember(FireEffect),
    /// Full-strip flash bursts
    Strobe(StrobeEffect),
}

/// Known effect ids that can be requested.
///
/// Ids are stable: next/previous wrap modulo the table size, and the
/// remote protocol addresses effects by these raw values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EffectId {
    Breathe = EFFECT_ID_BREATHE,
    Pacifica = EFFECT_ID_PACIFICA,
    WheelScroll = EFFECT_ID_WHEEL_SCROLL,
    Halloween = EFFECT_ID_HALLOWEEN,
    CylonNarrow = EFFECT_ID_CYLON_NARROW,
    CylonWide = EFFECT_ID_CYLON_WIDE,
    Twinkle = EFFECT_ID_TWINKLE,
    TwinkleRandom = EFFECT_ID_TWINKLE_RANDOM,
    Sparkle = EFFECT_ID_SPARKLE,
    SnowSparkle = EFFECT_ID_SNOW_SPARKLE,
    RunningLights = EFFECT_ID_RUNNING_LIGHTS,
    ColorWipe = EFFECT_ID_COLOR_WIPE,
    RainbowCycle = EFFECT_ID_RAINBOW,
    TheaterChase = EFFECT_ID_THEATER_CHASE,
    TheaterChaseRainbow = EFFECT_ID_THEATER_CHASE_RAINBOW,
    Fire = EFFECT_ID_FIRE,
    BouncingBall = EFFECT_ID_BOUNCING_BALL,
    BouncingBalls = EFFECT_ID_BOUNCING_BALLS,
    Meteor = EFFECT_ID_METEOR,
    Xmas = EFFECT_ID_XMAS,
    ColorBounce = EFFECT_ID_COLOR_BOUNCE,
    Ember = EFFECT_ID_EMBER,
    Strobe = EFFECT_ID_STROBE,
}

impl Default for EffectSlot {
    fn default() -> Self {
        Self::Breathe(BreatheEffect::new(RED))
    }
}

impl EffectId {
    /// Number of catalog entries.
    pub const COUNT: u8 = 23;

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_BREATHE => Self::Breathe,
            EFFECT_ID_PACIFICA => Self::Pacifica,
            EFFECT_ID_WHEEL_SCROLL => Self::WheelScroll,
            EFFECT_ID_HALLOWEEN => Self::Halloween,
            EFFECT_ID_CYLON_NARROW => Self::CylonNarrow,
            EFFECT_ID_CYLON_WIDE => Self::CylonWide,
            EFFECT_ID_TWINKLE => Self::Twinkle,
            EFFECT_ID_TWINKLE_RANDOM => Self::TwinkleRandom,
            EFFECT_ID_SPARKLE => Self::Sparkle,
            EFFECT_ID_SNOW_SPARKLE => Self::SnowSparkle,
            EFFECT_ID_RUNNING_LIGHTS => Self::RunningLights,
            EFFECT_ID_COLOR_WIPE => Self::ColorWipe,
            EFFECT_ID_RAINBOW => Self::RainbowCycle,
            EFFECT_ID_THEATER_CHASE => Self::TheaterChase,
            EFFECT_ID_THEATER_CHASE_RAINBOW => Self::TheaterChaseRainbow,
            EFFECT_ID_FIRE => Self::Fire,
            EFFECT_ID_BOUNCING_BALL => Self::BouncingBall,
            EFFECT_ID_BOUNCING_BALLS => Self::BouncingBalls,
            EFFECT_ID_METEOR => Self::Meteor,
            EFFECT_ID_XMAS => Self::Xmas,
            EFFECT_ID_COLOR_BOUNCE => Self::ColorBounce,
            EFFECT_ID_EMBER => Self::Ember,
            EFFECT_ID_STROBE => Self::Strobe,
            _ => return None,
        })
    }

    /// Next catalog entry, wrapping modulo the table size.
    pub fn next(self) -> Self {
        Self::from_raw((self as u8 + 1) % Self::COUNT).unwrap_or(Self::Breathe)
    }

    /// Previous catalog entry, wrapping modulo the table size.
    pub fn previous(self) -> Self {
        Self::from_raw((self as u8 + Self::COUNT - 1) % Self::COUNT)
            .unwrap_or(Self::Breathe)
    }

    /// Instantiate the effect state for this id with its bound preset
    /// parameters. `seed` feeds the effect's private PRNG where one is
    /// used.
    pub fn to_slot(self, seed: u32) -> EffectSlot {
        match self {
            Self::Breathe => EffectSlot::Breathe(BreatheEffect::new(RED)),
            Self::Pacifica => EffectSlot::Pacifica(PacificaEffect::new()),
            Self::WheelScroll => EffectSlot::WheelScroll(
                WheelScrollEffect::new(RED, GREEN).with_period(500),
            ),
            Self::Halloween => EffectSlot::Halloween(HalloweenScene::new(seed)),
            Self::CylonNarrow => EffectSlot::CylonNarrow(CylonEffect::new(RED, 4)),
            Self::CylonWide => EffectSlot::CylonWide(CylonEffect::new(RED, 8)),
            Self::Twinkle => {
                EffectSlot::Twinkle(TwinkleEffect::new(RED, false, seed))
            }
            Self::TwinkleRandom => {
                EffectSlot::TwinkleRandom(TwinkleRandomEffect::new(false, seed))
            }
            Self::Sparkle => EffectSlot::Sparkle(SparkleEffect::new(WHITE, seed)),
            Self::SnowSparkle => {
                EffectSlot::SnowSparkle(SnowSparkleEffect::new(SNOW_BASE, seed))
            }
            Self::RunningLights => {
                EffectSlot::RunningLights(RunningLightsEffect::new(RED))
            }
            Self::ColorWipe => EffectSlot::ColorWipe(ColorWipeEffect::new(GREEN)),
            Self::RainbowCycle => {
                EffectSlot::RainbowCycle(RainbowCycleEffect::new())
            }
            Self::TheaterChase => {
                EffectSlot::TheaterChase(TheaterChaseEffect::new(RED))
            }
            Self::TheaterChaseRainbow => {
                EffectSlot::TheaterChaseRainbow(TheaterChaseRainbowEffect::new())
            }
            Self::Fire => {
                EffectSlot::Fire(FireEffect::new(80, 220, HeatMap::Palette, seed))
            }
            Self::BouncingBall => {
                EffectSlot::BouncingBall(BouncingBallsEffect::solo())
            }
            Self::BouncingBalls => {
                EffectSlot::BouncingBalls(BouncingBallsEffect::crowd())
            }
            Self::Meteor => EffectSlot::Meteor(MeteorEffect::new(WHITE, seed)),
            Self::Xmas => EffectSlot::Xmas(XmasScene::new(seed)),
            Self::ColorBounce => {
                EffectSlot::ColorBounce(ColorBounceEffect::new(RED, BLUE))
            }
            Self::Ember => {
                EffectSlot::Ember(FireEffect::new(55, 120, HeatMap::Ramp, seed))
            }
            Self::Strobe => EffectSlot::Strobe(StrobeEffect::new(WHITE)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breathe => EFFECT_NAME_BREATHE,
            Self::Pacifica => EFFECT_NAME_PACIFICA,
            Self::WheelScroll => EFFECT_NAME_WHEEL_SCROLL,
            Self::Halloween => EFFECT_NAME_HALLOWEEN,
            Self::CylonNarrow => EFFECT_NAME_CYLON_NARROW,
            Self::CylonWide => EFFECT_NAME_CYLON_WIDE,
            Self::Twinkle => EFFECT_NAME_TWINKLE,
            Self::TwinkleRandom => EFFECT_NAME_TWINKLE_RANDOM,
            Self::Sparkle => EFFECT_NAME_SPARKLE,
            Self::SnowSparkle => EFFECT_NAME_SNOW_SPARKLE,
            Self::RunningLights => EFFECT_NAME_RUNNING_LIGHTS,
            Self::ColorWipe => EFFECT_NAME_COLOR_WIPE,
            Self::RainbowCycle => EFFECT_NAME_RAINBOW,
            Self::TheaterChase => EFFECT_NAME_THEATER_CHASE,
            Self::TheaterChaseRainbow => EFFECT_NAME_THEATER_CHASE_RAINBOW,
            Self::Fire => EFFECT_NAME_FIRE,
            Self::BouncingBall => EFFECT_NAME_BOUNCING_BALL,
            Self::BouncingBalls => EFFECT_NAME_BOUNCING_BALLS,
            Self::Meteor => EFFECT_NAME_METEOR,
            Self::Xmas => EFFECT_NAME_XMAS,
            Self::ColorBounce => EFFECT_NAME_COLOR_BOUNCE,
            Self::Ember => EFFECT_NAME_EMBER,
            Self::Strobe => EFFECT_NAME_STROBE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        (0..Self::COUNT)
            .filter_map(Self::from_raw)
            .find(|id| id.as_str() == s)
    }
}

impl EffectSlot {
    /// Step the current effect by one frame
    pub fn step(&mut self, now: Instant, leds: &mut [Rgb]) {
        match self {
            Self::Breathe(effect) => effect.step(now, leds),
            Self::Pacifica(effect) => effect.step(now, leds),
            Self::WheelScroll(effect) => effect.step(now, leds),
            Self::Halloween(effect) => effect.step(now, leds),
            Self::CylonNarrow(effect) | Self::CylonWide(effect) => {
                effect.step(now, leds);
            }
            Self::Twinkle(effect) => effect.step(now, leds),
            Self::TwinkleRandom(effect) => effect.step(now, leds),
            Self::Sparkle(effect) => effect.step(now, leds),
            Self::SnowSparkle(effect) => effect.step(now, leds),
            Self::RunningLights(effect) => effect.step(now, leds),
            Self::ColorWipe(effect) => effect.step(now, leds),
            Self::RainbowCycle(effect) => effect.step(now, leds),
            Self::TheaterChase(effect) => effect.step(now, leds),
            Self::TheaterChaseRainbow(effect) => effect.step(now, leds),
            Self::Fire(effect) | Self::Ember(effect) => effect.step(now, leds),
            Self::BouncingBall(effect) | Self::BouncingBalls(effect) => {
                effect.step(now, leds);
            }
            Self::Meteor(effect) => effect.step(now, leds),
            Self::Xmas(effect) => effect.step(now, leds),
            Self::ColorBounce(effect) => effect.step(now, leds),
            Self::Strobe(effect) => effect.step(now, leds),
        }
    }

    /// Reset the effect state
    pub fn reset(&mut self) {
        match self {
            Self::Breathe(effect) => Effect::reset(effect),
            Self::Pacifica(effect) => Effect::reset(effect),
            Self::WheelScroll(effect) => Effect::reset(effect),
            Self::Halloween(effect) => Effect::reset(effect),
            Self::CylonNarrow(effect) | Self::CylonWide(effect) => {
                Effect::reset(effect);
            }
            Self::Twinkle(effect) => Effect::reset(effect),
            Self::TwinkleRandom(effect) => Effect::reset(effect),
            Self::Sparkle(effect) => Effect::reset(effect),
            Self::SnowSparkle(effect) => Effect::reset(effect),
            Self::RunningLights(effect) => Effect::reset(effect),
            Self::ColorWipe(effect) => Effect::reset(effect),
            Self::RainbowCycle(effect) => Effect::reset(effect),
            Self::TheaterChase(effect) => Effect::reset(effect),
            Self::TheaterChaseRainbow(effect) => Effect::reset(effect),
            Self::Fire(effect) | Self::Ember(effect) => Effect::reset(effect),
            Self::BouncingBall(effect) | Self::BouncingBalls(effect) => {
                Effect::reset(effect);
            }
            Self::Meteor(effect) => Effect::reset(effect),
            Self::Xmas(effect) => Effect::reset(effect),
            Self::ColorBounce(effect) => Effect::reset(effect),
            Self::Strobe(effect) => Effect::reset(effect),
        }
    }

    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::Breathe(_) => EffectId::Breathe,
            Self::Pacifica(_) => EffectId::Pacifica,
            Self::WheelScroll(_) => EffectId::WheelScroll,
            Self::Halloween(_) => EffectId::Halloween,
            Self::CylonNarrow(_) => EffectId::CylonNarrow,
            Self::CylonWide(_) => EffectId::CylonWide,
            Self::Twinkle(_) => EffectId::Twinkle,
            Self::TwinkleRandom(_) => EffectId::TwinkleRandom,
            Self::Sparkle(_) => EffectId::Sparkle,
            Self::SnowSparkle(_) => EffectId::SnowSparkle,
            Self::RunningLights(_) => EffectId::RunningLights,
            Self::ColorWipe(_) => EffectId::ColorWipe,
            Self::RainbowCycle(_) => EffectId::RainbowCycle,
            Self::TheaterChase(_) => EffectId::TheaterChase,
            Self::TheaterChaseRainbow(_) => EffectId::TheaterChaseRainbow,
            Self::Fire(_) => EffectId::Fire,
            Self::BouncingBall(_) => EffectId::BouncingBall,
            Self::BouncingBalls(_) => EffectId::BouncingBalls,
            Self::Meteor(_) => EffectId::Meteor,
            Self::Xmas(_) => EffectId::Xmas,
            Self::ColorBounce(_) => EffectId::ColorBounce,
            Self::Ember(_) => EffectId::Ember,
            Self::Strobe(_) => EffectId::Strobe,
        }
    }
}
