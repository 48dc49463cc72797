use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use rectclick::app;
use rectclick::config::Settings;
use rectclick::engine::{EndReason, Engine};
use rectclick::palette::Rgb;
use rectclick::session::SessionConfig;
use rectclick::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};

// Headless integration using the internal runtime + TestBackend without a TTY

fn key(code: KeyCode) -> GameEvent {
    GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send_str(tx: &Sender<GameEvent>, s: &str) {
    for c in s.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
}

fn send_backspaces(tx: &Sender<GameEvent>, n: usize) {
    for _ in 0..n {
        tx.send(key(KeyCode::Backspace)).unwrap();
    }
}

fn runner(rx: mpsc::Receiver<GameEvent>) -> Runner<TestEventSource, FixedTicker> {
    Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    )
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(90, 30)).unwrap()
}

/// Answers the six prompts: name, a 1 second session, defaults otherwise.
fn answer_setup(tx: &Sender<GameEvent>, name: &str) {
    send_backspaces(tx, 4);
    send_str(tx, name);
    tx.send(key(KeyCode::Enter)).unwrap();
    send_backspaces(tx, 2);
    send_str(tx, "1");
    for _ in 0..5 {
        tx.send(key(KeyCode::Enter)).unwrap();
    }
}

#[test]
fn intake_collects_config_from_key_events() {
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);
    let mut terminal = terminal();

    answer_setup(&tx, "ada");

    let config = app::run_intake(&mut terminal, &runner)
        .unwrap()
        .expect("setup should complete");
    assert_eq!(config.player_name, "ada");
    assert_eq!(config.duration_secs, 1);
    assert_eq!((config.rect_width, config.rect_height), (100, 50));
    assert_eq!(config.rect_color, Rgb(0, 0, 0));
    assert_eq!(config.background_color, Rgb(255, 255, 255));
}

#[test]
fn intake_quit_returns_none() {
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);
    let mut terminal = terminal();

    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Esc)).unwrap();

    assert!(app::run_intake(&mut terminal, &runner).unwrap().is_none());
}

#[test]
fn one_second_session_runs_to_completion_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        results_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);
    let mut terminal = terminal();

    answer_setup(&tx, "ada");
    // Bottom-right cell is on the counter panel: always a misclick.
    tx.send(GameEvent::Click { column: 89, row: 29 }).unwrap();

    // Dismiss the chart once the session is over.
    let closer = tx.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(1500));
        closer.send(key(KeyCode::Char('q'))).unwrap();
    });

    let outcome = app::play(&mut terminal, &runner, &settings, Some(11))
        .unwrap()
        .expect("session should run");
    handle.join().unwrap();

    assert_eq!(outcome.end_reason, EndReason::TimeUp);
    assert!(outcome.summary().starts_with("Time's up! ada's final score: Clicks - 1"));

    let result = outcome.result;
    assert_eq!(result.player_name, "ada");
    assert_eq!(result.clicks, 1);
    assert_eq!(result.misclicks, 1);
    assert_eq!(result.score, 0);

    let (player, master) = outcome.saved.unwrap();
    let text = std::fs::read_to_string(player).unwrap();
    assert!(text.starts_with("User: ada\nScore: 0\nClicks: 1\nMisclicks: 1\nTimeouts: "));
    let all = std::fs::read_to_string(master).unwrap();
    assert!(all.ends_with("----------\n"));
}

#[test]
fn quitting_mid_session_still_reports_tallies() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        results_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);
    let mut terminal = terminal();

    send_backspaces(&tx, 4);
    send_str(&tx, "bob");
    for _ in 0..6 {
        tx.send(key(KeyCode::Enter)).unwrap();
    }

    let feeder = tx.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        feeder.send(key(KeyCode::Esc)).unwrap();
        thread::sleep(Duration::from_millis(200));
        feeder.send(key(KeyCode::Enter)).unwrap();
    });

    let outcome = app::play(&mut terminal, &runner, &settings, Some(3))
        .unwrap()
        .expect("session should run");
    handle.join().unwrap();

    assert_eq!(outcome.result.player_name, "bob");
    assert_eq!(outcome.result.clicks, 0);
    assert_eq!(outcome.end_reason, EndReason::Quit);
    assert!(outcome.summary().starts_with("bob quit early: Clicks - 0"));
    assert!(dir.path().join("bob_results.txt").exists());
}

#[test]
fn clicks_in_the_same_frame_as_a_quit_are_counted() {
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);
    let mut terminal = terminal();
    let mut engine = Engine::new(SessionConfig::default(), Some(5));

    // Both cells are on the counter panel, so both are misclicks.
    tx.send(GameEvent::Click { column: 89, row: 29 }).unwrap();
    tx.send(GameEvent::Click { column: 89, row: 28 }).unwrap();
    tx.send(key(KeyCode::Esc)).unwrap();

    app::run_session(&mut terminal, &runner, &mut engine).unwrap();

    let result = engine.result();
    assert_eq!(engine.end_reason(), Some(EndReason::Quit));
    assert_eq!(result.clicks, 2);
    assert_eq!(result.misclicks, 2);
    assert_eq!(result.score, 0);
}

#[test]
fn closed_input_ends_setup_and_session() {
    let (tx, rx) = mpsc::channel();
    drop(tx);
    let runner = runner(rx);
    let mut terminal = terminal();

    assert!(app::run_intake(&mut terminal, &runner).unwrap().is_none());

    let mut engine = Engine::new(SessionConfig::default(), Some(5));
    app::run_session(&mut terminal, &runner, &mut engine).unwrap();
    assert_eq!(engine.end_reason(), Some(EndReason::Quit));
}
