use std::path::PathBuf;

use anyhow::Context as _;
use gridfall_engine::{BoardSize, PieceSeed, SessionConfig};

use crate::util;

/// Session settings: an optional JSON file plus command-line overrides.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionArgs {
    /// JSON configuration file; missing fields use defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of board rows
    #[clap(long)]
    rows: Option<usize>,
    /// Number of board columns
    #[clap(long)]
    cols: Option<usize>,
    /// Piece sequence seed (32 hex digits)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Milliseconds between drops at the start
    #[clap(long)]
    initial_interval_ms: Option<u64>,
    /// Milliseconds removed from the drop interval at each speed-up
    #[clap(long)]
    interval_step_ms: Option<u64>,
    /// Shortest drop interval in milliseconds
    #[clap(long)]
    min_interval_ms: Option<u64>,
    /// Cleared rows needed for each speed-up
    #[clap(long)]
    rows_per_speedup: Option<usize>,
}

impl SessionArgs {
    /// Loads the configuration file (if any) and applies the overrides on top of it.
    pub(crate) fn resolve(&self) -> anyhow::Result<SessionConfig> {
        let mut config: SessionConfig = match &self.config {
            Some(path) => util::read_json_file("config", path)?,
            None => SessionConfig::default(),
        };

        if self.rows.is_some() || self.cols.is_some() {
            let rows = self.rows.unwrap_or(config.board.rows());
            let cols = self.cols.unwrap_or(config.board.cols());
            config.board = BoardSize::new(rows, cols).context("Invalid board size")?;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        let gravity = &mut config.gravity;
        if let Some(ms) = self.initial_interval_ms {
            gravity.initial_interval_ms = ms;
        }
        if let Some(ms) = self.interval_step_ms {
            gravity.interval_step_ms = ms;
        }
        if let Some(ms) = self.min_interval_ms {
            gravity.min_interval_ms = ms;
        }
        if let Some(rows) = self.rows_per_speedup {
            gravity.rows_per_speedup = rows;
        }
        gravity.validate()?;

        Ok(config)
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowConfigArg {
    #[clap(flatten)]
    session: SessionArgs,
    /// Output file (default: stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ShowConfigArg) -> anyhow::Result<()> {
    let ShowConfigArg { session, output } = arg;
    let config = session.resolve()?;
    util::Output::save_json(&config, output.clone())
}
