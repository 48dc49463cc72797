use std::fmt;

use crate::palette::{Rgb, BACKGROUND_PALETTE, RECT_PALETTE};

pub const DEFAULT_PLAYER_NAME: &str = "User";
pub const DEFAULT_DURATION_SECS: u32 = 60;
pub const DEFAULT_RECT_WIDTH: u32 = 100;
pub const DEFAULT_RECT_HEIGHT: u32 = 50;

/// Parameters gathered before a session starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub player_name: String,
    pub duration_secs: u32,
    pub rect_width: u32,
    pub rect_height: u32,
    pub rect_color: Rgb,
    pub background_color: Rgb,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            duration_secs: DEFAULT_DURATION_SECS,
            rect_width: DEFAULT_RECT_WIDTH,
            rect_height: DEFAULT_RECT_HEIGHT,
            rect_color: RECT_PALETTE.default_color(),
            background_color: BACKGROUND_PALETTE.default_color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSpec {
    /// Not applied to rectangle motion yet.
    pub relative_speed: f64,
    pub timeout_secs: f64,
}

pub const LEVELS: [LevelSpec; 3] = [
    LevelSpec {
        relative_speed: 1.0,
        timeout_secs: 1.0,
    },
    LevelSpec {
        relative_speed: 2.0,
        timeout_secs: 0.8,
    },
    LevelSpec {
        relative_speed: 3.0,
        timeout_secs: 0.6,
    },
];

/// Final tallies handed to the reporting side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub player_name: String,
    pub score: u32,
    pub clicks: u32,
    pub misclicks: u32,
    pub timeouts: u32,
}

impl SessionResult {
    /// Console line for a session the player left before time ran out.
    pub fn quit_summary(&self) -> String {
        format!(
            "{} quit early: Clicks - {}, Misclicks - {}, Timeouts - {}",
            self.player_name, self.clicks, self.misclicks, self.timeouts
        )
    }
}

impl fmt::Display for SessionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time's up! {}'s final score: Clicks - {}, Misclicks - {}, Timeouts - {}",
            self.player_name, self.clicks, self.misclicks, self.timeouts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_prompt_defaults() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.player_name, "User");
        assert_eq!(cfg.duration_secs, 60);
        assert_eq!((cfg.rect_width, cfg.rect_height), (100, 50));
        assert_eq!(cfg.rect_color, Rgb::BLACK);
        assert_eq!(cfg.background_color, Rgb::WHITE);
    }

    #[test]
    fn level_timeouts_strictly_decrease() {
        assert!(LEVELS
            .windows(2)
            .all(|w| w[1].timeout_secs < w[0].timeout_secs));
        assert_eq!(LEVELS[2].timeout_secs, 0.6);
    }

    #[test]
    fn summary_line() {
        let result = SessionResult {
            player_name: "ada".into(),
            score: 3,
            clicks: 7,
            misclicks: 2,
            timeouts: 4,
        };
        assert_eq!(
            result.to_string(),
            "Time's up! ada's final score: Clicks - 7, Misclicks - 2, Timeouts - 4"
        );
        assert_eq!(
            result.quit_summary(),
            "ada quit early: Clicks - 7, Misclicks - 2, Timeouts - 4"
        );
    }
}
