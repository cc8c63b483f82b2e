use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};

use revealbar_core::AppConfig;
use revealbar_tui::{
    app::{App, Mode, SHELL_ROWS},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{ContentWidget, HeaderWidget, PopupWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("revealbar"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
) -> Result<()> {
    let event_handler =
        EventHandler::with_animation_tick(config.ui.tick_rate_ms, config.ui.animation_tick());
    let theme = Theme::default();
    let mut app = App::new(config);

    tracing::debug!(
        variant = %app.config.header.variant,
        slide_range = app.header.controller().slide_range(),
        "Header screen started"
    );

    // Measure once before the first frame so metrics are never stale
    let size = terminal.size()?;
    app.set_viewport_rows(content_rows(size.height));

    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| draw(frame, &app, &theme))?;

        if app.should_quit {
            break;
        }

        // Check the flag after drawing so an animation started this frame
        // gets sampled at animation rate on the next one
        let fast = app.needs_fast_update();

        match event_handler.next(fast)? {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, &app);
                app.apply_action(action, Instant::now());
            }
            Some(AppEvent::Mouse(mouse)) => {
                let action = handle_mouse_event(mouse, &app);
                app.apply_action(action, Instant::now());
            }
            Some(AppEvent::Resize(_, h)) => {
                app.set_viewport_rows(content_rows(h));
            }
            Some(AppEvent::Tick) | None => {}
        }
    }

    Ok(())
}

/// Rows left for content once the shell and status bar are taken
fn content_rows(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(SHELL_ROWS + 1)
}

fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());
    let screen = chunks[0];

    // Content sits under the shell; the reveal bar overlays its top rows
    let content_area = Rect {
        y: screen.y + SHELL_ROWS.min(screen.height),
        height: screen.height.saturating_sub(SHELL_ROWS),
        ..screen
    };
    ContentWidget::render(frame, content_area, app, theme);
    HeaderWidget::render(frame, screen, app, theme);
    StatusBarWidget::render(frame, chunks[1], app, theme);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, theme);
    }
}
