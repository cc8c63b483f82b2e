use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use revealbar_core::Direction;

use crate::app::{App, Mode};
use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Search => "SEARCH",
            Mode::Help => "HELP",
        };

        let icon = match app.settle_icon {
            Direction::Up => "▲",
            Direction::Down => "▼",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | {} {} | offset {:>6.1}px | scroll {:>7.1}px",
                mode_str,
                icon,
                app.state(),
                app.header.offset(),
                app.header.scroll_signal(),
            )
        };

        let help_hint = " q:quit j/k:scroll s:snap v/x:show/hide /:search ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.chars().count());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
