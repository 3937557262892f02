use std::{io, time::Duration};

use crate::{App, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Runs a fixed frame-rate loop for applications that implement the `App` trait.
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub const DEFAULT_FRAME_RATE: f64 = 60.0;

    /// Creates a new Runtime running at [`Self::DEFAULT_FRAME_RATE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(Duration::from_secs_f64(1.0 / Self::DEFAULT_FRAME_RATE)),
        }
    }

    /// Sets the frame rate (Hz, frames per second).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.set_frame_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Sets the time between two frames.
    pub fn set_frame_interval(&mut self, interval: Duration) {
        self.events.set_frame_interval(interval);
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.events.frame_interval()
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - frame: calls `app.update()`, then `app.draw()`
    ///    - crossterm event: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Frame => {
                        app.update(&mut self);
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, event);
                    }
                }
            }
            Ok(())
        })
    }
}
