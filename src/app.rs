use std::path::PathBuf;

use crossterm::event::KeyEventKind;
use rand::Rng;
use ratatui::{backend::Backend, layout::Rect, Terminal};
use tracing::{error, info};

use crate::{
    config::Settings,
    engine::{EndReason, Engine},
    error::AppResult,
    geometry::Viewport,
    intake::{Intake, IntakeStep},
    report::ResultsWriter,
    runtime::{is_quit_key, GameEvent, GameEventSource, Runner, Ticker},
    session::{SessionConfig, SessionResult},
    ui::{charting::ResultsView, setup},
};

/// What a finished session produced, including whether saving worked.
#[derive(Debug)]
pub struct SessionOutcome {
    pub result: SessionResult,
    pub end_reason: EndReason,
    pub saved: AppResult<(PathBuf, PathBuf)>,
}

impl SessionOutcome {
    /// Console line for the finished session.
    pub fn summary(&self) -> String {
        match self.end_reason {
            EndReason::TimeUp => self.result.to_string(),
            EndReason::Quit => self.result.quit_summary(),
        }
    }
}

/// Full flow: setup prompts, the timed session, saving and the chart.
/// Returns `None` when the player quits during setup.
pub fn play<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    runner: &Runner<E, T>,
    settings: &Settings,
    seed: Option<u64>,
) -> AppResult<Option<SessionOutcome>> {
    let Some(config) = run_intake(terminal, runner)? else {
        return Ok(None);
    };

    let mut engine = Engine::new(config, seed);
    run_session(terminal, runner, &mut engine)?;

    let result = engine.result();
    let end_reason = engine.end_reason().unwrap_or(EndReason::Quit);
    let saved = ResultsWriter::new(&settings.results_dir).write(&result);
    let status = match &saved {
        Ok((player, _)) => format!("results saved to {}", player.display()),
        Err(e) => {
            error!(error = %e, "saving results failed");
            e.to_string()
        }
    };

    let view = ResultsView {
        result: &result,
        history: engine.metrics_history(),
        status: Some(status),
    };
    show_results(terminal, runner, &view)?;

    Ok(Some(SessionOutcome {
        result,
        end_reason,
        saved,
    }))
}

/// Blocks until all six prompts are answered, or `None` on quit.
pub fn run_intake<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    runner: &Runner<E, T>,
) -> AppResult<Option<SessionConfig>> {
    let mut intake = Intake::new();

    loop {
        terminal.draw(|f| {
            let area = f.area();
            f.render_widget(&intake, area);
            if let Some(pos) = setup::cursor_position(&intake, area) {
                f.set_cursor_position(pos);
            }
        })?;

        let key = match runner.step() {
            GameEvent::Key(key) => key,
            GameEvent::Closed => {
                info!("input closed during setup");
                return Ok(None);
            }
            _ => continue,
        };

        match intake.on_key(key) {
            IntakeStep::Pending => {}
            IntakeStep::Done(config) => {
                info!(?config, "setup complete");
                return Ok(Some(config));
            }
            IntakeStep::Quit => {
                info!("setup aborted");
                return Ok(None);
            }
        }
    }
}

/// Runs the tick loop until time is up or the player quits.
pub fn run_session<B: Backend, E: GameEventSource, T: Ticker, R: Rng>(
    terminal: &mut Terminal<B>,
    runner: &Runner<E, T>,
    engine: &mut Engine<R>,
) -> AppResult<()> {
    terminal.hide_cursor()?;

    loop {
        let size = terminal.size()?;
        let viewport = Viewport::new(Rect::new(0, 0, size.width, size.height));

        let mut clicks = Vec::new();
        let mut quit = false;
        for event in runner.frame() {
            match event {
                GameEvent::Click { column, row } => {
                    if let Some(point) = viewport.to_logical(column, row) {
                        clicks.push(point);
                    }
                }
                GameEvent::Key(key) if key.kind == KeyEventKind::Press && is_quit_key(&key) => {
                    quit = true;
                    break;
                }
                GameEvent::Closed => {
                    quit = true;
                    break;
                }
                _ => {}
            }
        }

        if quit {
            engine.quit(&clicks);
        } else {
            engine.tick(&clicks);
        }
        if engine.has_finished() {
            return Ok(());
        }

        terminal.draw(|f| f.render_widget(&*engine, f.area()))?;
    }
}

/// Shows the chart until any key is pressed.
pub fn show_results<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    runner: &Runner<E, T>,
    view: &ResultsView<'_>,
) -> AppResult<()> {
    terminal.draw(|f| f.render_widget(view, f.area()))?;

    loop {
        match runner.step() {
            GameEvent::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
            GameEvent::Closed => return Ok(()),
            GameEvent::Resize => {
                terminal.draw(|f| f.render_widget(view, f.area()))?;
            }
            _ => {}
        }
    }
}
