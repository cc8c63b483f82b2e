use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::app::{App, Mode, BORDER_ROWS, SHELL_ROWS};
use crate::theme::{blend, Theme};

const TABS: [&str; 4] = ["Home", "Modules", "Sessions", "Saved"];

/// Shell strip, sliding reveal bar and the border beneath them
pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        if area.height == 0 {
            return;
        }

        let opacity = app.header.opacity();
        let reveal_rows = app
            .reveal_rows()
            .min(area.height.saturating_sub(SHELL_ROWS + BORDER_ROWS));

        // Reveal bar slides up behind the shell: keep its bottom rows
        let bar = reveal_lines(app, theme, opacity.content);
        let skip = bar.len().saturating_sub(reveal_rows as usize);
        let reveal_area = Rect {
            x: area.x,
            y: area.y + SHELL_ROWS,
            width: area.width,
            height: reveal_rows,
        };
        frame.render_widget(Clear, reveal_area);
        frame.render_widget(
            Paragraph::new(bar.into_iter().skip(skip).collect::<Vec<_>>())
                .style(Style::default().bg(theme.reveal)),
            reveal_area,
        );

        let border_area = Rect {
            x: area.x,
            y: reveal_area.y + reveal_rows,
            width: area.width,
            height: BORDER_ROWS.min(area.height.saturating_sub(SHELL_ROWS + reveal_rows)),
        };
        let border_color = blend(theme.border, theme.bg0, opacity.border);
        frame.render_widget(Clear, border_area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "─".repeat(area.width as usize),
                Style::default().fg(border_color).bg(theme.bg0),
            ))),
            border_area,
        );

        // Shell last so it always sits on top
        let shell_area = Rect {
            height: SHELL_ROWS.min(area.height),
            ..area
        };
        frame.render_widget(shell_line(app, theme), shell_area);
    }
}

fn shell_line<'a>(app: &'a App, theme: &Theme) -> Paragraph<'a> {
    let mut spans = vec![Span::styled(
        format!(" revealbar · {} ", app.config.header.variant),
        Style::default()
            .fg(theme.fg0)
            .add_modifier(Modifier::BOLD),
    )];

    if app.mode == Mode::Search {
        spans.push(Span::styled(
            format!(" / {}▏", app.search_query),
            Style::default().fg(theme.yellow).bg(theme.bg2),
        ));
    } else if !app.search_query.is_empty() {
        spans.push(Span::styled(
            format!(" / {}", app.search_query),
            Style::default().fg(theme.grey2),
        ));
    }

    Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.shell))
}

fn reveal_lines(app: &App, theme: &Theme, content_opacity: f64) -> Vec<Line<'static>> {
    let text = blend(theme.fg0, theme.reveal, content_opacity);
    let active = blend(theme.accent, theme.reveal, content_opacity);
    let dim = blend(theme.grey0, theme.reveal, content_opacity);

    let mut tabs = vec![Span::raw(" ")];
    for (i, tab) in TABS.iter().enumerate() {
        let style = if i == 0 {
            Style::default().fg(active).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text)
        };
        tabs.push(Span::styled(format!(" {} ", tab), style));
    }

    let rows = app.reveal_rows_max() as usize;
    let mut lines = Vec::with_capacity(rows);
    lines.push(Line::from(tabs));
    if rows > 1 {
        lines.push(Line::from(Span::styled(
            format!("  {} lines", app.lines.len()),
            Style::default().fg(dim),
        )));
    }
    while lines.len() < rows {
        lines.push(Line::default());
    }
    lines.truncate(rows);
    lines
}
