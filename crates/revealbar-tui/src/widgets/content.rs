use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

/// Scrollable content region beneath the header
pub struct ContentWidget;

impl ContentWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let query = app.search_query.to_lowercase();
        let padding = app.content_padding_rows() as usize;

        let mut lines: Vec<Line> = Vec::with_capacity(padding + app.lines.len());
        lines.extend(std::iter::repeat_with(Line::default).take(padding));
        lines.extend(app.lines.iter().map(|text| {
            let style = if text.starts_with("Section") {
                Style::default().fg(theme.blue)
            } else if !query.is_empty() && text.to_lowercase().contains(&query) {
                Style::default().fg(theme.yellow)
            } else {
                Style::default().fg(theme.fg0)
            };
            Line::from(Span::styled(text.as_str(), style))
        }));

        let paragraph = Paragraph::new(lines)
            .style(Style::default().bg(theme.bg0))
            .scroll((app.first_visible_row(), 0));
        frame.render_widget(paragraph, area);
    }
}
