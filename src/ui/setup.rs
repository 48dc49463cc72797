use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::intake::Intake;

const MARGIN: u16 = 1;

fn prompt_area(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(MARGIN)
        .constraints([
            Constraint::Length(3), // prompt box
            Constraint::Min(0),
            Constraint::Length(1), // keys
        ])
        .split(area)[0]
}

/// Where the terminal cursor sits: just before the closing parenthesis.
pub fn cursor_position(intake: &Intake, area: Rect) -> Option<Position> {
    let input = intake.current()?;
    let inner = prompt_area(area).inner(ratatui::layout::Margin::new(1, 1));
    if inner.is_empty() {
        return None;
    }
    let width = format!("{} ({}", input.prompt(), input.buffer()).width() as u16;
    if width >= inner.width {
        return None;
    }
    Some(Position::new(inner.x + width, inner.y))
}

impl Widget for &Intake {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(input) = self.current() else {
            return;
        };
        let text_style = Style::default().fg(Color::Black).bg(Color::White);
        buf.set_style(area, text_style);

        let (step, total) = self.progress();
        let prompt = Paragraph::new(Line::from(input.display_line()))
            .style(text_style.add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Session setup {step}/{total} ")),
            );
        prompt.render(prompt_area(area), buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(MARGIN)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        Paragraph::new(Span::styled(
            "(enter) confirm / (backspace) delete / (esc)ape",
            text_style.add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[1], buf);
    }
}
