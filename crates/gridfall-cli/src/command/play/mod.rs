use gridfall_engine::GameSession;
use ratatui_runtime::Runtime;

use crate::command::{config::SessionArgs, play::app::PlayApp};

mod app;
mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    session: SessionArgs,
    /// Display frames per second
    #[clap(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..=240))]
    fps: u64,
    /// Keep the final board on screen after game over until quit or restart
    #[clap(long)]
    hold_on_game_over: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            session: SessionArgs::default(),
            fps: 60,
            hold_on_game_over: false,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        session,
        fps,
        hold_on_game_over,
    } = arg;

    let config = session.resolve()?;
    let session = GameSession::new(config, *fps)?;
    let mut app = PlayApp::new(session, !*hold_on_game_over);

    Runtime::new().run(&mut app)?;

    let session = app.finish()?;
    let stats = session.stats();
    let duration = session.duration();
    eprintln!(
        "{}: {} pieces, {} rows cleared in {}.{:03}s (seed {})",
        if session.state().is_game_over() {
            "Game over"
        } else {
            "Quit"
        },
        stats.completed_pieces(),
        stats.total_cleared_rows(),
        duration.as_secs(),
        duration.subsec_millis(),
        session.seed().to_hex(),
    );
    let [_, singles, doubles, triples, quads] = *stats.row_cleared_counter();
    eprintln!("Clears: {singles} single, {doubles} double, {triples} triple, {quads} quad");

    Ok(())
}
