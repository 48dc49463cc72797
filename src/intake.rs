use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::debug;

use crate::palette::{Palette, Rgb, BACKGROUND_PALETTE, RECT_PALETTE};
use crate::runtime::is_quit_key;
use crate::session::{
    SessionConfig, DEFAULT_DURATION_SECS, DEFAULT_PLAYER_NAME, DEFAULT_RECT_HEIGHT,
    DEFAULT_RECT_WIDTH,
};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text { default: String },
    Number { default: u32 },
    Color { palette: Palette },
}

impl FieldKind {
    fn seed(&self) -> String {
        match self {
            FieldKind::Text { default } => default.clone(),
            FieldKind::Number { default } => default.to_string(),
            FieldKind::Color { palette } => palette.default_code().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(u32),
    Color(Rgb),
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Pending,
    Commit(FieldValue),
    Quit,
}

/// One prompt with its line-edit buffer.
#[derive(Debug, Clone)]
pub struct PromptInput {
    prompt: String,
    kind: FieldKind,
    buffer: String,
}

impl PromptInput {
    pub fn new(prompt: impl Into<String>, kind: FieldKind) -> Self {
        let buffer = kind.seed();
        Self {
            prompt: prompt.into(),
            kind,
            buffer,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn display_line(&self) -> String {
        format!("{} ({})", self.prompt, self.buffer)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Pending;
        }
        if is_quit_key(&key) {
            return KeyOutcome::Quit;
        }

        match key.code {
            KeyCode::Enter => match self.commit() {
                Some(value) => KeyOutcome::Commit(value),
                None => KeyOutcome::Pending,
            },
            KeyCode::Backspace => {
                self.buffer.pop();
                KeyOutcome::Pending
            }
            KeyCode::Char(c) => {
                let accepted = match &self.kind {
                    FieldKind::Color { palette } => palette.accepts(c),
                    _ => true,
                };
                if accepted {
                    self.buffer.push(c);
                }
                KeyOutcome::Pending
            }
            _ => KeyOutcome::Pending,
        }
    }

    /// Resolves the buffer to a value, or `None` while it is empty.
    ///
    /// Malformed input never fails: it falls back to the field default.
    pub fn commit(&self) -> Option<FieldValue> {
        if self.buffer.is_empty() {
            return None;
        }

        let value = match &self.kind {
            FieldKind::Text { default } => FieldValue::Text(self.resolve_text(default)),
            FieldKind::Number { default } => FieldValue::Number(self.resolve_number(*default)),
            FieldKind::Color { palette } => FieldValue::Color(self.resolve_color(palette)),
        };
        Some(value)
    }

    fn resolve_text(&self, default: &str) -> String {
        let trimmed = self.buffer.trim();
        if trimmed.is_empty() {
            default.to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn resolve_number(&self, default: u32) -> u32 {
        if !self.buffer.chars().all(|c| c.is_ascii_digit()) {
            return default;
        }
        self.buffer
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(default)
    }

    fn resolve_color(&self, palette: &Palette) -> Rgb {
        self.buffer
            .chars()
            .last()
            .and_then(|c| palette.get(c))
            .unwrap_or_else(|| palette.default_color())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    PlayerName,
    Duration,
    RectWidth,
    RectHeight,
    RectColor,
    BackgroundColor,
}

impl Target {
    const ALL: [Target; 6] = [
        Target::PlayerName,
        Target::Duration,
        Target::RectWidth,
        Target::RectHeight,
        Target::RectColor,
        Target::BackgroundColor,
    ];

    fn prompt(self) -> String {
        match self {
            Target::PlayerName => "Please enter your name:".to_string(),
            Target::Duration => "Enter timer duration in seconds:".to_string(),
            Target::RectWidth => "Enter rectangle width:".to_string(),
            Target::RectHeight => "Enter rectangle height:".to_string(),
            Target::RectColor => format!("Enter rectangle color ({}):", RECT_PALETTE.codes()),
            Target::BackgroundColor => {
                "Choose background color (w=white, l=light gray, d=dark gray):".to_string()
            }
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Target::PlayerName => FieldKind::Text {
                default: DEFAULT_PLAYER_NAME.to_string(),
            },
            Target::Duration => FieldKind::Number {
                default: DEFAULT_DURATION_SECS,
            },
            Target::RectWidth => FieldKind::Number {
                default: DEFAULT_RECT_WIDTH,
            },
            Target::RectHeight => FieldKind::Number {
                default: DEFAULT_RECT_HEIGHT,
            },
            Target::RectColor => FieldKind::Color {
                palette: RECT_PALETTE,
            },
            Target::BackgroundColor => FieldKind::Color {
                palette: BACKGROUND_PALETTE,
            },
        }
    }

    /// Writes the committed buffer into its config field.
    fn apply(self, input: &PromptInput, config: &mut SessionConfig) {
        match self {
            Target::PlayerName => config.player_name = input.resolve_text(DEFAULT_PLAYER_NAME),
            Target::Duration => config.duration_secs = input.resolve_number(DEFAULT_DURATION_SECS),
            Target::RectWidth => config.rect_width = input.resolve_number(DEFAULT_RECT_WIDTH),
            Target::RectHeight => config.rect_height = input.resolve_number(DEFAULT_RECT_HEIGHT),
            Target::RectColor => config.rect_color = input.resolve_color(&RECT_PALETTE),
            Target::BackgroundColor => {
                config.background_color = input.resolve_color(&BACKGROUND_PALETTE)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntakeStep {
    Pending,
    Done(SessionConfig),
    Quit,
}

/// The six pre-game prompts, answered in order.
#[derive(Debug, Clone)]
pub struct Intake {
    fields: Vec<(Target, PromptInput)>,
    position: usize,
    config: SessionConfig,
}

impl Default for Intake {
    fn default() -> Self {
        Self::new()
    }
}

impl Intake {
    pub fn new() -> Self {
        let fields = Target::ALL
            .into_iter()
            .map(|target| (target, PromptInput::new(target.prompt(), target.kind())))
            .collect();

        Self {
            fields,
            position: 0,
            config: SessionConfig::default(),
        }
    }

    pub fn current(&self) -> Option<&PromptInput> {
        self.fields.get(self.position).map(|(_, input)| input)
    }

    /// 1-based index of the active prompt and the total count.
    pub fn progress(&self) -> (usize, usize) {
        ((self.position + 1).min(self.fields.len()), self.fields.len())
    }

    pub fn on_key(&mut self, key: KeyEvent) -> IntakeStep {
        let Some((target, input)) = self.fields.get_mut(self.position) else {
            return IntakeStep::Done(self.config.clone());
        };

        match input.on_key(key) {
            KeyOutcome::Pending => IntakeStep::Pending,
            KeyOutcome::Quit => IntakeStep::Quit,
            KeyOutcome::Commit(value) => {
                debug!(field = ?target, ?value, "field committed");
                target.apply(input, &mut self.config);
                self.position += 1;
                if self.position == self.fields.len() {
                    IntakeStep::Done(self.config.clone())
                } else {
                    IntakeStep::Pending
                }
            }
        }
    }
}
