use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// Frame deadlines at a fixed interval.
///
/// When the loop falls behind by more than one frame, missed frames are dropped instead
/// of being replayed in a burst.
#[derive(Debug)]
pub(super) struct FrameClock {
    interval: Duration,
    next_frame: Instant,
}

impl FrameClock {
    /// Creates a clock whose first frame is due at `now`.
    pub(super) fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_frame: now,
        }
    }

    pub(super) fn interval(&self) -> Duration {
        self.interval
    }

    pub(super) fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Returns whether a frame is due at `now`, and schedules the next one if so.
    pub(super) fn poll_frame(&mut self, now: Instant) -> bool {
        if now < self.next_frame {
            return false;
        }
        self.next_frame += self.interval;
        if self.next_frame <= now {
            self.next_frame = now + self.interval;
        }
        true
    }

    /// Time left until the next frame.
    pub(super) fn timeout(&self, now: Instant) -> Duration {
        self.next_frame.saturating_duration_since(now)
    }
}

/// Event loop state management.
///
/// Returns the next event via `next()`: a frame when its deadline is reached, otherwise
/// the next crossterm event that arrives before it.
#[derive(Debug)]
pub(super) struct EventLoop {
    clock: FrameClock,
}

impl EventLoop {
    pub(super) fn new(frame_interval: Duration) -> Self {
        Self {
            clock: FrameClock::new(frame_interval, Instant::now()),
        }
    }

    pub(super) fn frame_interval(&self) -> Duration {
        self.clock.interval()
    }

    pub(super) fn set_frame_interval(&mut self, interval: Duration) {
        self.clock.set_interval(interval);
    }

    /// Returns the next event.
    ///
    /// Blocks until the next frame is due or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.clock.poll_frame(now) {
                return Ok(TuiEvent::Frame);
            }
            if event::poll(self.clock.timeout(now))? {
                return Ok(event::read()?.into());
            }
        }
    }
}
