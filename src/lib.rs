#![no_std]

pub mod beat;
pub mod cancel;
pub mod color;
pub mod command;
pub mod effect;
pub mod frame_scheduler;
pub mod math8;
pub mod ops;
pub mod random;
pub mod surface;

pub use cancel::CancelToken;
pub use command::{
    Command, CommandQueue, CommandReceiver, CommandSender, Debouncer, Mode,
};
pub use effect::{EffectId, EffectSlot};
pub use frame_scheduler::{
    FrameResult, FrameScheduler, SchedulerConfig, SchedulerError, SchedulerState,
};
pub use surface::{DriverError, Surface};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Upper bound on addressable pixels for statically sized effect state
/// (heat fields and the like). Surfaces may be shorter; anything beyond
/// this stays black.
pub const MAX_PIXELS: usize = 512;

/// Abstract LED strip driver trait
///
/// Implement this trait to support different hardware platforms.
/// The animation engine is generic over this trait.
///
/// A failed write is either [`DriverError::Transient`] (the frame is
/// dropped, the engine keeps running) or [`DriverError::Fatal`] (the
/// engine stops and reports the failure to the caller).
pub trait StripDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), DriverError>;
}
