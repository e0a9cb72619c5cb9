//! Frame scheduling, effect switchover and cooperative cancellation.
//!
//! Provides portable frame pacing without async/await or platform-specific
//! timers. The caller is responsible for sleeping/waiting between frames;
//! `tick` never sleeps and an in-progress tick is never interrupted.
//!
//! Exactly one effect is ever live: switching passes through
//! `RUNNING -> STOPPING -> IDLE -> STARTING -> RUNNING`, discarding the
//! old effect state and blacking the surface before the new effect's
//! reset. Repeated stop requests are no-ops.

use embassy_time::{Duration, Instant};

use crate::StripDriver;
use crate::cancel::CancelToken;
use crate::color::Rgb;
use crate::command::{Command, CommandReceiver, Mode};
use crate::effect::{Effect, EffectId, EffectSlot, StaticColorEffect};
use crate::random::Xorshift32;
use crate::surface::{DriverError, Surface};

/// Default target frame rate (50 FPS).
pub const DEFAULT_FPS: u32 = 50;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration =
    Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Master brightness step per up/down command.
const BRIGHTNESS_STEP: u8 = 20;

/// Default master brightness.
const DEFAULT_BRIGHTNESS: u8 = 100;

const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Scheduler lifecycle state.
///
/// `Starting` and `Stopping` exist so the only-one-effect invariant is
/// checkable: a selection arriving while a stop is in flight waits for
/// `Idle` before the new effect is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    /// No effect live; surface is black.
    Idle,
    /// A new effect is being constructed and reset.
    Starting,
    /// The active effect is stepped every tick.
    Running,
    /// The active effect is being torn down.
    Stopping,
}

/// Errors reported by scheduler operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// A raw effect id outside the catalog. The scheduler stays on the
    /// previously active effect.
    UnknownEffect(u8),
    /// The pixel driver failed fatally; the scheduler is now idle.
    Driver(DriverError),
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::UnknownEffect(raw) => {
                write!(f, "unknown effect id {raw}")
            }
            SchedulerError::Driver(err) => write!(f, "driver error: {err}"),
        }
    }
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (zero if behind schedule,
    /// never negative).
    pub sleep_duration: Duration,
}

/// Initial scheduler configuration.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Effect selected at startup.
    pub effect: EffectId,
    /// Initial master brightness.
    pub brightness: u8,
    /// Target frame period.
    pub frame_duration: Duration,
    /// Seed for per-effect PRNGs.
    pub seed: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            effect: EffectId::Breathe,
            brightness: DEFAULT_BRIGHTNESS,
            frame_duration: DEFAULT_FRAME_DURATION,
            seed: 1,
        }
    }
}

/// The frame scheduler: owns the surface, the single live effect and
/// the switchover protocol.
///
/// # Usage
///
/// ```ignore
/// static COMMANDS: CommandQueue<8> = CommandQueue::new();
/// static CANCEL: CancelToken = CancelToken::new();
///
/// let surface = Surface::new(driver, 300);
/// let mut scheduler = FrameScheduler::new(
///     surface,
///     COMMANDS.receiver(),
///     &CANCEL,
///     &SchedulerConfig::default(),
/// );
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()))?;
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, D: StripDriver, const MAX: usize, const CMD: usize> {
    surface: Surface<D, MAX>,
    commands: CommandReceiver<'a, CMD>,
    cancel: &'a CancelToken,

    state: SchedulerState,
    mode: Mode,
    powered: bool,
    selected: EffectId,
    pending: Option<EffectId>,
    slot: Option<EffectSlot>,
    static_color: StaticColorEffect,
    brightness: u8,
    seeds: Xorshift32,

    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, D: StripDriver, const MAX: usize, const CMD: usize>
    FrameScheduler<'a, D, MAX, CMD>
{
    /// Create a scheduler. The configured effect starts on the first
    /// tick.
    pub fn new(
        surface: Surface<D, MAX>,
        commands: CommandReceiver<'a, CMD>,
        cancel: &'a CancelToken,
        config: &SchedulerConfig,
    ) -> Self {
        Self {
            surface,
            commands,
            cancel,
            state: SchedulerState::Idle,
            mode: Mode::Animation,
            powered: true,
            selected: config.effect,
            pending: Some(config.effect),
            slot: None,
            static_color: StaticColorEffect::new(),
            brightness: config.brightness,
            seeds: Xorshift32::new(config.seed),
            next_frame: Instant::from_millis(0),
            frame_duration: config.frame_duration,
        }
    }

    /// Request a switch to `effect`: the current effect is stopped
    /// cooperatively and the new one starts after the stop-clear.
    ///
    /// The selection is recorded immediately so that repeated
    /// next/previous presses between ticks walk the catalog, not just
    /// re-request the same neighbor.
    pub fn select(&mut self, effect: EffectId) {
        self.selected = effect;
        self.pending = Some(effect);
        self.cancel.request();
    }

    /// [`select`](Self::select) by raw catalog id; unknown ids are
    /// reported and leave the active effect untouched.
    pub fn select_raw(&mut self, raw: u8) -> Result<EffectId, SchedulerError> {
        let effect =
            EffectId::from_raw(raw).ok_or(SchedulerError::UnknownEffect(raw))?;
        self.select(effect);
        Ok(effect)
    }

    /// Cancel the active effect and black the surface on the next tick.
    /// Idempotent; repeated stops are no-ops.
    pub fn stop(&mut self) {
        self.pending = None;
        self.cancel.request();
    }

    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// The currently selected catalog entry (also while stopped).
    pub const fn selected(&self) -> EffectId {
        self.selected
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn is_powered(&self) -> bool {
        self.powered
    }

    /// Read access to the surface, mainly for status reporting.
    pub const fn surface(&self) -> &Surface<D, MAX> {
        &self.surface
    }

    /// Process one frame and return timing information.
    ///
    /// Order per tick: drain commands, observe cancellation, complete a
    /// pending stop (discard effect state, black + flush), start a
    /// pending selection (clear, reset), step the live effect, flush,
    /// compute the next deadline.
    pub fn tick(&mut self, now: Instant) -> Result<FrameResult, SchedulerError> {
        // Drift correction: if we've fallen too far behind, reset to now.
        // This prevents catch-up bursts after long stalls.
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            self.next_frame = now;
        }

        while let Some(command) = self.commands.try_receive() {
            self.apply_command(command);
        }

        // Cancellation is observed only here, between ticks.
        if self.cancel.observe() && self.state == SchedulerState::Running {
            self.state = SchedulerState::Stopping;
        }

        if self.state == SchedulerState::Stopping {
            self.slot = None;
            self.surface.fill(BLACK);
            self.flush()?;
            self.state = SchedulerState::Idle;
        }

        if self.state == SchedulerState::Idle
            && self.powered
            && self.mode == Mode::Animation
        {
            if let Some(effect) = self.pending.take() {
                self.state = SchedulerState::Starting;
                // The stop-clear above handles effect switches; clear
                // again so a start out of static mode is also clean.
                self.surface.fill(BLACK);
                let mut slot = effect.to_slot(self.seeds.next_u32());
                slot.reset();
                self.selected = effect;
                self.slot = Some(slot);
                self.state = SchedulerState::Running;
            }
        }

        if self.powered {
            match self.mode {
                Mode::Animation => {
                    if self.state == SchedulerState::Running {
                        if let Some(slot) = &mut self.slot {
                            slot.step(now, self.surface.frame_mut());
                        }
                    }
                }
                Mode::Static => {
                    self.static_color.step(now, self.surface.frame_mut());
                }
            }
        } else {
            self.surface.fill(BLACK);
        }

        self.flush()?;

        self.next_frame += self.frame_duration;
        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        Ok(FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        })
    }

    /// Flush with the error policy from the design: transient failures
    /// drop the frame and keep running; fatal failures tear the effect
    /// down and propagate.
    fn flush(&mut self) -> Result<(), SchedulerError> {
        match self.surface.flush(self.brightness) {
            Ok(()) => Ok(()),
            Err(DriverError::Transient) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("transient driver failure, frame dropped");
                Ok(())
            }
            Err(err @ DriverError::Fatal) => {
                self.slot = None;
                self.pending = None;
                self.state = SchedulerState::Idle;
                Err(SchedulerError::Driver(err))
            }
        }
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::Next => match self.mode {
                Mode::Animation => self.select(self.selected.next()),
                Mode::Static => self.static_color.increase_hue(),
            },
            Command::Previous => match self.mode {
                Mode::Animation => self.select(self.selected.previous()),
                Mode::Static => self.static_color.decrease_hue(),
            },
            Command::Toggle => {
                self.powered = !self.powered;
                if self.powered {
                    if self.mode == Mode::Animation {
                        self.pending = Some(self.selected);
                    }
                } else {
                    self.stop();
                }
            }
            Command::ModeAnimation => {
                if self.mode != Mode::Animation {
                    self.mode = Mode::Animation;
                    self.pending = Some(self.selected);
                }
            }
            Command::ModeStatic => {
                if self.mode != Mode::Static {
                    self.mode = Mode::Static;
                    self.cancel.request();
                }
            }
            Command::BrightnessUp => {
                self.brightness = self.brightness.saturating_add(BRIGHTNESS_STEP);
            }
            Command::BrightnessDown => {
                self.brightness = self.brightness.saturating_sub(BRIGHTNESS_STEP);
            }
            Command::Select(raw) => {
                if let Err(_err) = self.select_raw(raw) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("ignoring {}", _err);
                }
            }
        }
    }
}
