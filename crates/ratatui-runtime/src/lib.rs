//! Fixed frame-rate loop for ratatui applications.
//!
//! Each frame calls [`App::update`] followed by [`App::draw`]. Between frames the loop
//! waits for terminal input and hands it to [`App::handle_event`].

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
