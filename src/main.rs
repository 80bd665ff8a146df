//! Terminal runner (default binary).
//!
//! Polls crossterm events until the next frame is due, dispatches every
//! translated action to the session, then advances it one frame. Rendering
//! goes through the framebuffer-based terminal front end.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::tty::IsTty;
use log::{error, info};

use tui_blockfall::config::{Cli, GameConfig};
use tui_blockfall::core::{Clock, MonotonicClock, RandomSource, Session};
use tui_blockfall::input::{EventTranslator, Translated};
use tui_blockfall::logging;
use tui_blockfall::term::{self, TerminalFrontend};
use tui_blockfall::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve()?;
    let log_path = logging::init(config.log_file.as_deref())?;
    info!("tui-blockfall starting, logging to {}", log_path.display());

    if !io::stdout().is_tty() {
        bail!("stdout is not a terminal");
    }

    let session_config = config.session_config()?;
    let mut session = Session::new(session_config, config.random_source())
        .context("invalid well dimensions")?;

    let mut frontend = TerminalFrontend::new()?;
    term::install_panic_hook();
    frontend.enter()?;

    let result = run(&mut session, &mut frontend, &config);

    // Always try to restore terminal state.
    let _ = frontend.exit();
    if let Err(err) = &result {
        error!("fatal: {:#}", err);
    }
    info!("exiting at score {}", session.score());
    result
}

fn run(
    session: &mut Session<Box<dyn RandomSource>>,
    frontend: &mut TerminalFrontend,
    config: &GameConfig,
) -> Result<()> {
    let clock = MonotonicClock::new();
    let mut translator = EventTranslator::new(config.touch_threshold_px);
    let frame_duration = Duration::from_millis(u64::from(TICK_MS));
    let restart_wired = session
        .config()
        .controls
        .actions
        .contains(GameAction::Restart);

    session
        .start(frontend)
        .context("failed to start the session")?;

    let mut next_frame = Instant::now();
    loop {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        let batch = translator
            .poll_batch(timeout, session.input_enabled())
            .context("failed to read terminal events")?;

        for event in batch {
            match event {
                Translated::Quit => return Ok(()),
                Translated::Resize { cols, rows } => frontend.resize(cols, rows),
                Translated::Action(GameAction::Restart) if session.is_game_over() => {
                    if !restart_wired {
                        continue;
                    }
                    if let Err(err) = session.reset(frontend) {
                        error!("restart failed: {}", err);
                    }
                }
                Translated::Action(action) => {
                    session.dispatch(action, frontend);
                }
            }
        }

        if Instant::now() >= next_frame {
            session.frame(clock.now_ms(), frontend);
            next_frame = Instant::now() + frame_duration;
        }
    }
}
