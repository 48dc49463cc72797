use std::time::{Duration, Instant};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::geometry::{Placement, Point};
use crate::session::{LevelSpec, SessionConfig, SessionResult, LEVELS};
use crate::time_series::MetricsSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Ending,
}

/// Why a session left [`Phase::Running`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    Quit,
}

/// Mutable state of a session. Only the [`Engine`] writes to it.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub score: u32,
    pub click_count: u32,
    pub misclick_count: u32,
    pub timeout_count: u32,
    pub current_level: usize,
    /// Offset from session start of the last hit, miss or timeout.
    pub last_reset: Duration,
    pub remaining_secs: f64,
    pub rectangle: Placement,
    pub metrics_history: Vec<MetricsSnapshot>,
}

impl SessionState {
    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            score: self.score,
            clicks: self.click_count,
            misclicks: self.misclick_count,
            timeouts: self.timeout_count,
        }
    }

    fn penalize(&mut self) {
        self.score = self.score.saturating_sub(1);
    }
}

/// The timed click-the-rectangle game loop, without any rendering.
#[derive(Debug)]
pub struct Engine<R: Rng = StdRng> {
    pub config: SessionConfig,
    pub state: SessionState,
    phase: Phase,
    end_reason: Option<EndReason>,
    started_at: Instant,
    rng: R,
}

impl Engine<StdRng> {
    pub fn new(config: SessionConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: SessionConfig, mut rng: R) -> Self {
        let mut rectangle = Placement::new(config.rect_width, config.rect_height);
        rectangle.relocate(&mut rng);

        let state = SessionState {
            score: 0,
            click_count: 0,
            misclick_count: 0,
            timeout_count: 0,
            current_level: 0,
            last_reset: Duration::ZERO,
            remaining_secs: config.duration_secs as f64,
            rectangle,
            metrics_history: Vec::new(),
        };

        info!(
            player = %config.player_name,
            duration_secs = config.duration_secs,
            "session started"
        );

        Self {
            config,
            state,
            phase: Phase::Running,
            end_reason: None,
            started_at: Instant::now(),
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Ending
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn level(&self) -> LevelSpec {
        LEVELS[self.state.current_level]
    }

    /// Advances one tick against the wall clock.
    pub fn tick(&mut self, clicks: &[Point]) -> Phase {
        self.tick_at(self.started_at.elapsed(), clicks)
    }

    /// Advances one tick as if `elapsed` time has passed since the start.
    pub fn tick_at(&mut self, elapsed: Duration, clicks: &[Point]) -> Phase {
        if self.has_finished() {
            return self.phase;
        }

        let duration = self.config.duration_secs as f64;
        let remaining = (duration - elapsed.as_secs_f64()).max(0.0);
        self.state.remaining_secs = remaining;

        if remaining <= 0.0 {
            self.finish(EndReason::TimeUp);
            return self.phase;
        }

        for &click in clicks {
            self.on_click(click, elapsed);
        }

        if (elapsed.saturating_sub(self.state.last_reset)).as_secs_f64()
            >= self.level().timeout_secs
        {
            self.state.timeout_count += 1;
            self.state.penalize();
            debug!(timeouts = self.state.timeout_count, "timeout");
            self.reset_target(elapsed);
        }

        let snapshot = self.state.snapshot();
        self.state.metrics_history.push(snapshot);

        // The second guard is looser than the first; level 3 follows
        // level 2 on the next tick.
        if remaining <= duration / 3.0 && self.state.current_level == 0 {
            self.state.current_level = 1;
            info!("Level 2");
        } else if remaining <= duration / 3.0 * 2.0 && self.state.current_level == 1 {
            self.state.current_level = 2;
            info!("Level 3");
        }

        self.phase
    }

    /// Player quit against the wall clock. See [`Engine::quit_at`].
    pub fn quit(&mut self, clicks: &[Point]) {
        self.quit_at(self.started_at.elapsed(), clicks)
    }

    /// Runs a last tick for the clicks that came before the quit, then ends
    /// the session. A session that ran out of time on that tick stays
    /// [`EndReason::TimeUp`].
    pub fn quit_at(&mut self, elapsed: Duration, clicks: &[Point]) {
        self.tick_at(elapsed, clicks);
        if !self.has_finished() {
            info!("session quit by player");
            self.finish(EndReason::Quit);
        }
    }

    pub fn result(&self) -> SessionResult {
        SessionResult {
            player_name: self.config.player_name.clone(),
            score: self.state.score,
            clicks: self.state.click_count,
            misclicks: self.state.misclick_count,
            timeouts: self.state.timeout_count,
        }
    }

    pub fn metrics_history(&self) -> &[MetricsSnapshot] {
        &self.state.metrics_history
    }

    fn on_click(&mut self, click: Point, elapsed: Duration) {
        self.state.click_count += 1;
        if self.state.rectangle.contains(click) {
            self.state.score += 1;
            debug!(x = click.x, y = click.y, score = self.state.score, "hit");
        } else {
            self.state.misclick_count += 1;
            self.state.penalize();
            debug!(x = click.x, y = click.y, score = self.state.score, "misclick");
        }
        self.reset_target(elapsed);
    }

    fn reset_target(&mut self, elapsed: Duration) {
        self.state.rectangle.relocate(&mut self.rng);
        self.state.last_reset = elapsed;
    }

    fn finish(&mut self, reason: EndReason) {
        self.phase = Phase::Ending;
        self.end_reason = Some(reason);
        info!(?reason, "{}", self.result());
    }
}
