use std::time::Instant;

use revealbar_core::{
    AppConfig, CollapsingHeader, ContentMetrics, Direction, HeaderEvent, Rail, RevealState,
};

use crate::input::Action;

/// Rows taken by the fixed shell strip
pub const SHELL_ROWS: u16 = 1;
/// Rows taken by the border under the header
pub const BORDER_ROWS: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Help,
}

/// Header screen state: the composition root for the collapsing header
pub struct App {
    pub config: AppConfig,
    pub header: CollapsingHeader,
    /// Filler content lines
    pub lines: Vec<String>,
    /// Scroll position of the content region in px
    pub scroll_px: f64,
    /// Rows available to the content region (under the shell)
    pub viewport_rows: u16,
    pub mode: Mode,
    pub search_query: String,
    /// Icon state kept in sync from settle notifications
    pub settle_icon: Direction,
    pub last_rail: Option<Rail>,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let header = CollapsingHeader::new(config.header.resolve(), config.tracker);
        let lines = demo_lines(config.ui.content_lines);

        Self {
            config,
            header,
            lines,
            scroll_px: 0.0,
            viewport_rows: 0,
            mode: Mode::Normal,
            search_query: String::new(),
            settle_icon: Direction::Up,
            last_rail: None,
            status_message: None,
            should_quit: false,
        }
    }

    #[inline]
    pub fn px_per_row(&self) -> f64 {
        self.config.ui.px_per_row.max(1) as f64
    }

    /// Rows the reveal bar occupies when fully shown
    pub fn reveal_rows_max(&self) -> u16 {
        (self.header.controller().slide_range() / self.px_per_row()).ceil() as u16
    }

    /// Rows of the reveal bar currently visible below the shell
    pub fn reveal_rows(&self) -> u16 {
        let visible = self.header.controller().slide_range() + self.header.offset();
        (visible / self.px_per_row()).round().max(0.0) as u16
    }

    /// Blank rows at the top of the content so the expanded header
    /// never covers the first line
    pub fn content_padding_rows(&self) -> u16 {
        self.reveal_rows_max() + BORDER_ROWS
    }

    pub fn content_rows(&self) -> usize {
        self.content_padding_rows() as usize + self.lines.len()
    }

    pub fn metrics(&self) -> ContentMetrics {
        let px = self.px_per_row();
        ContentMetrics::new(
            self.viewport_rows as f64 * px,
            self.content_rows() as f64 * px,
            (SHELL_ROWS + self.reveal_rows_max()) as f64 * px,
        )
    }

    pub fn max_scroll_px(&self) -> f64 {
        self.metrics().max_scroll()
    }

    /// First content row shown at the top of the viewport
    pub fn first_visible_row(&self) -> u16 {
        (self.scroll_px / self.px_per_row()).floor() as u16
    }

    pub fn is_input_mode(&self) -> bool {
        self.mode == Mode::Search
    }

    /// Record a new content viewport height (terminal resize)
    pub fn set_viewport_rows(&mut self, rows: u16) {
        if self.viewport_rows == rows {
            return;
        }
        self.viewport_rows = rows;
        let metrics = self.metrics();
        tracing::debug!(
            rows,
            viewport_px = metrics.viewport_height,
            content_px = metrics.content_height,
            "Content viewport resized"
        );
        self.header.set_metrics(metrics);
        self.scroll_px = self.scroll_px.min(self.max_scroll_px());
    }

    pub fn scroll_by(&mut self, delta_px: f64, now: Instant) {
        let target = (self.scroll_px + delta_px).clamp(0.0, self.max_scroll_px());
        self.scroll_to(target, now);
    }

    pub fn scroll_to(&mut self, offset_px: f64, now: Instant) {
        self.scroll_px = offset_px.clamp(0.0, self.max_scroll_px());
        let metrics = self.metrics();
        self.header.on_scroll_with(self.scroll_px, &metrics, now);
    }

    fn half_page_px(&self) -> f64 {
        (self.viewport_rows / 2).max(1) as f64 * self.px_per_row()
    }

    /// Advance animations and settle timers for this frame
    pub fn tick(&mut self, now: Instant) {
        for event in self.header.tick(now) {
            match event {
                HeaderEvent::Settled(direction) => {
                    self.settle_icon = direction;
                }
                HeaderEvent::RailReached(rail) => {
                    self.last_rail = Some(rail);
                }
            }
        }
    }

    /// Whether the event loop should run at animation frame rate
    pub fn needs_fast_update(&self) -> bool {
        self.header.needs_update()
    }

    pub fn state(&self) -> RevealState {
        self.header.state()
    }

    pub fn apply_action(&mut self, action: Action, now: Instant) {
        self.status_message = None;
        let step = self.config.ui.scroll_step_px;

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_by(step, now),
            Action::ScrollUp => self.scroll_by(-step, now),
            Action::ScrollHalfPageDown => self.scroll_by(self.half_page_px(), now),
            Action::ScrollHalfPageUp => self.scroll_by(-self.half_page_px(), now),
            Action::JumpToTop => self.scroll_to(0.0, now),
            Action::JumpToBottom => self.scroll_to(self.max_scroll_px(), now),
            Action::ShowBar => {
                if !self.header.show_reveal_bar(now) {
                    self.status_message = Some(format!("Header is {}", self.state()));
                }
            }
            Action::HideBar => {
                if !self.header.hide_reveal_bar(now) {
                    self.status_message = Some(format!("Header is {}", self.state()));
                }
            }
            Action::Snap => match self.header.snap_to_nearest(now) {
                Some(Rail::Shown) => self.settle_icon = Direction::Up,
                Some(Rail::Hidden) => self.settle_icon = Direction::Down,
                None => self.status_message = Some(format!("Header is {}", self.state())),
            },
            Action::StartSearch => {
                self.mode = Mode::Search;
                self.header.set_search_focused(true);
            }
            Action::InputChar(c) => self.search_query.push(c),
            Action::Backspace => {
                self.search_query.pop();
            }
            Action::Confirm | Action::Cancel => {
                if action == Action::Cancel {
                    self.search_query.clear();
                }
                self.mode = Mode::Normal;
                self.header.set_search_focused(false);
            }
            Action::ToggleHelp => {
                self.mode = if self.mode == Mode::Help {
                    Mode::Normal
                } else {
                    Mode::Help
                };
            }
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
    }
}

fn demo_lines(count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| match i % 5 {
            0 => String::new(),
            1 => format!("Section {}", i / 5 + 1),
            _ => format!("  Line {:>4}  scroll to watch the header slide away", i),
        })
        .collect()
}
