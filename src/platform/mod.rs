//! Platform abstraction layer
//!
//! Handles the pieces the simulation needs from its host:
//! - Input events (discrete, drained once per tick)
//! - Frame timing (frame cap and blocking pauses)

use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::consts::TICK_RATE;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
    Quit,
    SelectEasy,
    SelectNormal,
    SelectHard,
    /// Any other key (only meaningful as "press any key")
    Other,
}

/// One discrete input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close / interrupt
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// Mouse/touch press at a screen position
    PointerClick(Vec2),
}

/// Frame pacing and the blocking pauses used on life loss / game over
pub trait Clock {
    /// Block until the next frame is due
    fn end_frame(&mut self);

    /// Block the whole loop for a fixed duration
    fn pause(&mut self, duration: Duration);
}

/// Real-time clock throttling the loop to a fixed rate
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    next_frame: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl FrameClock {
    pub fn new(rate: u32) -> Self {
        let frame = Duration::from_nanos(1_000_000_000 / u64::from(rate.max(1)));
        Self {
            frame,
            next_frame: Instant::now() + frame,
        }
    }
}

impl Clock for FrameClock {
    fn end_frame(&mut self) {
        let now = Instant::now();
        if now < self.next_frame {
            thread::sleep(self.next_frame - now);
            self.next_frame += self.frame;
        } else {
            // Running behind: don't try to catch up
            self.next_frame = now + self.frame;
        }
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
        self.next_frame = Instant::now() + self.frame;
    }
}

/// Clock that never sleeps; counts frames and records pauses
#[derive(Debug, Default)]
pub struct ManualClock {
    pub frames: u64,
    pub pauses: Vec<Duration>,
}

impl ManualClock {
    /// Total time spent in pauses
    pub fn paused_for(&self) -> Duration {
        self.pauses.iter().sum()
    }
}

impl Clock for ManualClock {
    fn end_frame(&mut self) {
        self.frames += 1;
    }

    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}
