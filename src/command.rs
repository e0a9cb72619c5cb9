//! Logical command input.
//!
//! The remote-input decoder translates raw codes into [`Command`] values
//! and pushes them into a bounded [`CommandQueue`]; the render loop
//! drains the queue between frames. The queue is backed by a
//! `heapless::Deque` behind a critical section, so any execution context
//! (including an interrupt handler) may send.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};
use heapless::Deque;

/// Input mode: which surface the next/previous/up/down keys act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Commands drive the animation catalog.
    #[default]
    Animation,
    /// Commands drive the static solid color.
    Static,
}

/// A discrete logical command from the control input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Advance to the next effect (or hue, in static mode).
    Next,
    /// Go back to the previous effect (or hue, in static mode).
    Previous,
    /// Toggle rendering on/off.
    Toggle,
    /// Switch to animation mode.
    ModeAnimation,
    /// Switch to static color mode.
    ModeStatic,
    /// Master brightness up.
    BrightnessUp,
    /// Master brightness down.
    BrightnessDown,
    /// Select an effect by raw catalog id.
    Select(u8),
}

/// Error returned when trying to send to a full queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub Command);

/// Bounded, thread-safe command queue.
pub struct CommandQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<Command, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this queue.
    ///
    /// Multiple senders can coexist; they share the same queue.
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { queue: self }
    }

    /// Get a receiver handle for this queue.
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { queue: self }
    }

    fn try_send(&self, command: Command) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(command).map_err(QueueFull)
        })
    }

    fn try_receive(&self) -> Option<Command> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front()
        })
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A lightweight, copyable sender handle for a [`CommandQueue`].
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    /// Try to send a command; returns it back if the queue is full.
    pub fn try_send(&self, command: Command) -> Result<(), QueueFull> {
        self.queue.try_send(command)
    }
}

/// A lightweight, copyable receiver handle for a [`CommandQueue`].
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    /// Pop the next pending command, if any (non-blocking).
    pub fn try_receive(&self) -> Option<Command> {
        self.queue.try_receive()
    }
}

/// Default minimum gap between accepted commands in animation mode.
pub const DEFAULT_ANIMATION_GAP: Duration = Duration::from_millis(200);

/// Mode-aware command debouncer.
///
/// Remote receivers repeat codes while a key is held; the input poller
/// runs accepted events through this filter before sending. Static mode
/// deliberately uses no gap so hue stepping stays responsive on held
/// keys.
pub struct Debouncer {
    animation_gap: Duration,
    static_gap: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    pub const fn new(animation_gap: Duration, static_gap: Duration) -> Self {
        Self {
            animation_gap,
            static_gap,
            last_accepted: None,
        }
    }

    /// Accept or reject an event at `now` under the given mode.
    pub fn accept(&mut self, now: Instant, mode: Mode) -> bool {
        let gap = match mode {
            Mode::Animation => self.animation_gap,
            Mode::Static => self.static_gap,
        };
        let ok = match self.last_accepted {
            None => true,
            Some(last) => now.as_millis().saturating_sub(last.as_millis()) >= gap.as_millis(),
        };
        if ok {
            self.last_accepted = Some(now);
        }
        ok
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_GAP, Duration::from_millis(0))
    }
}
