use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rectclick::{
    app::{self, SessionOutcome},
    app_dirs::AppDirs,
    config::{FileSettingsStore, Settings, SettingsOverrides, SettingsStore},
    error::AppResult,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
};
use std::{
    error::Error,
    io::{self, stdin, Stdout},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, warn};

/// click the rectangle before it moves
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A reaction-time terminal game: click the rectangle before it jumps away. Session parameters are asked for when the game starts; these flags only control where results go and how the game runs."
)]
pub struct Cli {
    /// directory for <name>_results.txt and all.txt
    #[clap(short = 'o', long)]
    results_dir: Option<PathBuf>,

    /// milliseconds per frame
    #[clap(long)]
    frame_ms: Option<u64>,

    /// seed for rectangle placement, for repeatable sessions
    #[clap(long)]
    seed: Option<u64>,

    /// write debug-level logs
    #[clap(short = 'v', long)]
    verbose: bool,

    /// remember --results-dir, --frame-ms and --verbose for next time
    #[clap(long)]
    save_settings: bool,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            results_dir: self.results_dir.clone(),
            frame_ms: self.frame_ms,
            verbose: self.verbose,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileSettingsStore::new();
    let settings = store.load().with_overrides(&cli.overrides());

    let log_path = AppDirs::log_path();
    if let Err(e) = logging::init(&log_path, settings.verbose) {
        eprintln!("logging disabled: {e}");
    }
    info!(?settings, "starting");

    if cli.save_settings {
        match store.save(&settings) {
            Ok(()) => info!(path = %store.path().display(), "settings saved"),
            Err(e) => warn!(error = %e, "could not save settings"),
        }
    }

    let mut terminal = setup_terminal()?;
    let outcome = run(&mut terminal, &settings, cli.seed);
    restore_terminal(&mut terminal)?;

    match outcome? {
        Some(outcome) => {
            println!("{}", outcome.summary());
            outcome.saved?;
        }
        None => info!("quit during setup"),
    }

    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &Settings,
    seed: Option<u64>,
) -> AppResult<Option<SessionOutcome>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(settings.frame_ms)),
    );
    app::play(terminal, &runner, settings, seed)
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()
}
