use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind,
};

/// Unified event type consumed by the game loops
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Key(KeyEvent),
    /// Left mouse button pressed at a terminal cell.
    Click { column: u16, row: u16 },
    Resize,
    Tick,
    /// The event source hung up; no more input will arrive.
    Closed,
}

/// Esc and Ctrl+C stand in for closing the window.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait GameEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;

    /// Return an already queued event without blocking.
    fn try_recv(&self) -> Result<GameEvent, TryRecvError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => Some(GameEvent::Key(key)),
                Ok(CtEvent::Mouse(mouse)) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => Some(GameEvent::Click {
                        column: mouse.column,
                        row: mouse.row,
                    }),
                    _ => None,
                },
                Ok(CtEvent::Resize(_, _)) => Some(GameEvent::Resize),
                Ok(_) => None,
                Err(_) => break,
            };

            if let Some(evt) = evt {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn try_recv(&self) -> Result<GameEvent, TryRecvError> {
        self.rx.try_recv()
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed event source for tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn try_recv(&self) -> Result<GameEvent, TryRecvError> {
        self.rx.try_recv()
    }
}

/// Runner that paces the loops one event or frame at a time
pub struct Runner<E: GameEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: GameEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, Tick on
    /// timeout, or Closed once the source has hung up.
    pub fn step(&self) -> GameEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => GameEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => GameEvent::Closed,
        }
    }

    /// Waits up to one tick interval, then drains every pending event.
    pub fn frame(&self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.step() {
            GameEvent::Tick => {}
            first => events.push(first),
        }
        while let Ok(ev) = self.event_source.try_recv() {
            events.push(ev);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        assert_eq!(runner.step(), GameEvent::Tick);
    }

    #[test]
    fn step_reports_closed_after_source_hangs_up() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Resize).unwrap();
        drop(tx);
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );

        assert_eq!(runner.step(), GameEvent::Resize);
        assert_eq!(runner.step(), GameEvent::Closed);
        assert_eq!(runner.frame(), vec![GameEvent::Closed]);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        assert_eq!(runner.step(), GameEvent::Resize);
    }

    #[test]
    fn frame_drains_all_pending_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Click { column: 1, row: 2 }).unwrap();
        tx.send(GameEvent::Click { column: 3, row: 4 }).unwrap();
        tx.send(GameEvent::Resize).unwrap();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(5)),
        );

        let events = runner.frame();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], GameEvent::Click { column: 1, row: 2 });
        assert!(runner.frame().is_empty());
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_key(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
