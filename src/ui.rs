pub mod charting;
pub mod setup;

use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::{
    engine::Engine,
    geometry::{Viewport, PLAYFIELD_WIDTH},
    palette::Rgb,
};

const PANEL_LEFT_PADDING: u16 = 1;

impl<R: Rng> Widget for &Engine<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let viewport = Viewport::new(area);
        let background = Color::from(self.config.background_color);
        let rect_color = Color::from(self.config.rect_color);
        let panel_color = Color::from(Rgb::PANEL_GRAY);
        let rectangle = self.state.rectangle;

        for row in area.top()..area.bottom() {
            for column in area.left()..area.right() {
                let Some(p) = viewport.to_logical(column, row) else {
                    continue;
                };
                let color = if p.x >= PLAYFIELD_WIDTH as i32 {
                    panel_color
                } else if rectangle.contains(p) {
                    rect_color
                } else {
                    background
                };
                if let Some(cell) = buf.cell_mut((column, row)) {
                    cell.set_symbol(" ");
                    cell.set_bg(color);
                }
            }
        }

        let text_style = Style::default()
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);

        let panel = viewport.side_panel();
        let counters = Paragraph::new(vec![
            Line::from(format!("Score: {}", self.state.score)),
            Line::default(),
            Line::from(format!("Clicks: {}", self.state.click_count)),
            Line::default(),
            Line::from(format!("Misclicks: {}", self.state.misclick_count)),
            Line::default(),
            Line::from(format!("Timeouts: {}", self.state.timeout_count)),
        ])
        .style(text_style.bg(panel_color));
        counters.render(
            Rect {
                x: panel.x + PANEL_LEFT_PADDING.min(panel.width),
                y: panel.y,
                width: panel.width.saturating_sub(PANEL_LEFT_PADDING),
                height: panel.height,
            },
            buf,
        );

        // Bottom-left of the playfield.
        let timer = Paragraph::new(format!(
            "Time left: {}s",
            self.state.remaining_secs.trunc() as u64
        ))
        .style(text_style.bg(background));
        timer.render(
            Rect::new(
                area.x + 1.min(area.width),
                area.bottom() - 1,
                panel.x.saturating_sub(area.x + 1),
                1,
            ),
            buf,
        );
    }
}
