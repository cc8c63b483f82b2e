//! Collapsing header coordinator
//!
//! Wires a [`ScrollTracker`] to a [`RevealController`] so a screen only has
//! to forward scroll samples, layout metrics, search focus and frame ticks.
//! One instance lives for the lifetime of a screen.

use std::time::Instant;

use serde::Serialize;

use crate::config::{HeaderSettings, TrackerConfig};
use crate::reveal::{HeaderOpacity, Rail, RevealController, RevealState};
use crate::tracker::{ContentMetrics, Direction, ScrollTracker};

/// Notifications for the host, returned from [`CollapsingHeader::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum HeaderEvent {
    /// Scrolling went quiet and the bar was sent in this direction
    Settled(Direction),
    /// An animation finished on this rail
    RailReached(Rail),
}

#[derive(Debug, Clone)]
pub struct CollapsingHeader {
    tracker: ScrollTracker,
    controller: RevealController,
    metrics: ContentMetrics,
    search_focused: bool,
}

impl Default for CollapsingHeader {
    fn default() -> Self {
        Self::new(HeaderSettings::default(), TrackerConfig::default())
    }
}

impl CollapsingHeader {
    pub fn new(settings: HeaderSettings, tracker: TrackerConfig) -> Self {
        Self {
            tracker: ScrollTracker::new(tracker),
            controller: RevealController::new(settings),
            metrics: ContentMetrics::default(),
            search_focused: false,
        }
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn controller(&self) -> &RevealController {
        &self.controller
    }

    pub fn metrics(&self) -> &ContentMetrics {
        &self.metrics
    }

    /// Record new layout measurements; used by subsequent scroll samples
    pub fn set_metrics(&mut self, metrics: ContentMetrics) {
        self.metrics = metrics;
    }

    pub fn scroll_signal(&self) -> f64 {
        self.tracker.scroll_signal()
    }

    pub fn offset(&self) -> f64 {
        self.controller.offset()
    }

    pub fn state(&self) -> RevealState {
        self.controller.state()
    }

    pub fn opacity(&self) -> HeaderOpacity {
        self.controller.opacity()
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    /// True while the host should run at animation frame rate
    pub fn needs_update(&self) -> bool {
        self.controller.is_animating() || self.tracker.has_pending_settle()
    }

    /// Forward a raw scroll offset using the last recorded metrics
    pub fn on_scroll(&mut self, offset_y: f64, now: Instant) {
        let metrics = self.metrics;
        self.on_scroll_with(offset_y, &metrics, now);
    }

    /// Forward a raw scroll offset with explicit metrics
    pub fn on_scroll_with(&mut self, offset_y: f64, metrics: &ContentMetrics, now: Instant) {
        self.metrics = *metrics;
        if let Some(update) = self.tracker.on_scroll(offset_y, metrics, now) {
            self.controller
                .apply_continuous_tracking(update.previous, update.current);
        }
    }

    pub fn set_search_focused(&mut self, focused: bool) {
        if self.search_focused == focused {
            return;
        }
        self.search_focused = focused;
        tracing::debug!(focused, "Search focus changed");
        self.controller.set_search_focus_override(focused);
    }

    pub fn show_reveal_bar(&mut self, now: Instant) -> bool {
        self.controller.show_reveal_bar(now)
    }

    pub fn hide_reveal_bar(&mut self, now: Instant) -> bool {
        self.controller.hide_reveal_bar(now)
    }

    pub fn snap_to_nearest(&mut self, now: Instant) -> Option<Rail> {
        self.controller.snap_to_nearest(now)
    }

    /// Advance one frame: step the animation, then resolve any settle
    /// decision whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Vec<HeaderEvent> {
        let mut events = Vec::new();

        if let Some(rail) = self.controller.tick(now) {
            events.push(HeaderEvent::RailReached(rail));
        }

        if let Some(decision) = self.tracker.poll_settle(now) {
            match decision {
                _ if self.controller.is_locked() => {
                    tracing::trace!(?decision, "Settle suppressed by search lock");
                }
                Some(direction) => {
                    match direction {
                        Direction::Up => self.controller.show_reveal_bar(now),
                        Direction::Down => self.controller.hide_reveal_bar(now),
                    };
                    events.push(HeaderEvent::Settled(direction));
                }
                None => {}
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderVariant;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn header(variant: HeaderVariant) -> CollapsingHeader {
        let mut header =
            CollapsingHeader::new(HeaderSettings::for_variant(variant), TrackerConfig::default());
        header.set_metrics(ContentMetrics::new(800.0, 5000.0, 100.0));
        header
    }

    /// Tick every 16ms from `from` to `to` inclusive, collecting events
    fn run_frames(
        header: &mut CollapsingHeader,
        start: Instant,
        from: u64,
        to: u64,
    ) -> Vec<HeaderEvent> {
        let mut events = Vec::new();
        let mut t = from;
        while t <= to {
            events.extend(header.tick(start + ms(t)));
            t += 16;
        }
        events
    }

    #[test]
    fn test_drag_down_then_settle_down() {
        let start = Instant::now();
        let mut header = header(HeaderVariant::Compact);

        header.on_scroll(20.0, start);
        header.on_scroll(35.0, start + ms(16));
        header.on_scroll(45.0, start + ms(32));
        assert_eq!(header.offset(), -45.0);

        // Nothing fires inside the quiet window
        assert!(header.tick(start + ms(100)).is_empty());

        let events = header.tick(start + ms(182));
        assert_eq!(events, vec![HeaderEvent::Settled(Direction::Down)]);
        assert_eq!(header.state(), RevealState::Animating);

        let events = header.tick(start + ms(182 + 160));
        assert_eq!(events, vec![HeaderEvent::RailReached(Rail::Hidden)]);
        assert_eq!(header.offset(), -60.0);
        assert!(!header.needs_update());
    }

    #[test]
    fn test_drag_past_range_clamps() {
        let start = Instant::now();
        let mut header = header(HeaderVariant::Compact);
        let mut y = 0.0;
        for i in 0..10 {
            y += 20.0;
            header.on_scroll(y, start + ms(i * 16));
        }
        assert_eq!(header.offset(), -60.0);
    }

    #[test]
    fn test_bounce_samples_do_not_move_bar() {
        let start = Instant::now();
        let mut header = header(HeaderVariant::Compact);
        header.on_scroll(-30.0, start);
        header.on_scroll(2.0, start + ms(16));
        assert_eq!(header.offset(), 0.0);
        assert_eq!(header.scroll_signal(), 0.0);
        assert!(!header.needs_update());
    }

    #[test]
    fn test_scroll_up_settles_shown() {
        let start = Instant::now();
        let mut header = header(HeaderVariant::Tall);
        header.on_scroll(300.0, start);
        assert_eq!(header.offset(), -80.0);
        header.on_scroll(280.0, start + ms(16));
        assert_eq!(header.offset(), -60.0);

        let events = run_frames(&mut header, start, 32, 600);
        assert_eq!(
            events,
            vec![
                HeaderEvent::Settled(Direction::Up),
                HeaderEvent::RailReached(Rail::Shown),
            ]
        );
        assert_eq!(header.offset(), 0.0);
    }

    #[test]
    fn test_bottom_zone_overrides_upward_drag() {
        let start = Instant::now();
        let mut header = header(HeaderVariant::Compact);
        let metrics = ContentMetrics::new(800.0, 2000.0, 100.0);
        header.on_scroll_with(1210.0, &metrics, start);
        header.on_scroll_with(1200.0, &metrics, start + ms(16));
        assert_eq!(header.offset(), -50.0);

        let events = run_frames(&mut header, start, 32, 600);
        assert_eq!(
            events,
            vec![
                HeaderEvent::Settled(Direction::Down),
                HeaderEvent::RailReached(Rail::Hidden),
            ]
        );
    }

    #[test]
    fn test_at_bottom_scrolling_down_emits_nothing() {
        let start = Instant::now();
        let mut header = header(HeaderVariant::Compact);
        let metrics = ContentMetrics::new(800.0, 2000.0, 100.0);
        header.on_scroll_with(1180.0, &metrics, start);
        header.on_scroll_with(1195.0, &metrics, start + ms(16));

        let events = run_frames(&mut header, start, 32, 600);
        assert!(events.is_empty());
        assert_eq!(header.offset(), -60.0);
    }

    #[test]
    fn test_search_focus_mid_animation_pins_lock_position() {
        let start = Instant::now();
        let mut header = header(HeaderVariant::Tall);
        header.on_scroll(200.0, start);
        header.tick(start + ms(300));
        header.tick(start + ms(500));
        assert_eq!(header.offset(), -80.0);

        assert!(header.show_reveal_bar(start + ms(600)));
        header.tick(start + ms(650));
        header.set_search_focused(true);

        assert_eq!(header.state(), RevealState::Locked);
        assert_eq!(header.offset(), -80.0);
        assert!(run_frames(&mut header, start, 660, 1000).is_empty());
        assert_eq!(header.offset(), -80.0);
    }

    #[test]
    fn test_lock_blocks_scroll_and_settle() {
        let start = Instant::now();
        let mut header = header(HeaderVariant::Compact);
        header.set_search_focused(true);

        header.on_scroll(100.0, start);
        header.on_scroll(200.0, start + ms(16));
        assert_eq!(header.offset(), 0.0);
        // The tracker still follows the content
        assert_eq!(header.scroll_signal(), 200.0);

        assert!(run_frames(&mut header, start, 32, 600).is_empty());
        assert_eq!(header.offset(), 0.0);

        header.set_search_focused(false);
        header.on_scroll(230.0, start + ms(700));
        assert_eq!(header.offset(), -30.0);
    }

    #[test]
    fn test_snap_passthrough_reports_rail() {
        let start = Instant::now();
        let mut header = header(HeaderVariant::Compact);
        header.on_scroll(40.0, start);
        // Let the settle fire and finish first
        run_frames(&mut header, start, 0, 600);
        assert_eq!(header.offset(), -60.0);

        header.on_scroll(30.0, start + ms(700));
        assert_eq!(header.offset(), -50.0);
        assert_eq!(header.snap_to_nearest(start + ms(701)), Some(Rail::Hidden));
        let events = header.tick(start + ms(861));
        assert!(events.contains(&HeaderEvent::RailReached(Rail::Hidden)));
    }

    #[test]
    fn test_repeated_focus_is_idempotent() {
        let mut header = header(HeaderVariant::Compact);
        header.set_search_focused(false);
        assert_eq!(header.state(), RevealState::IdleShown);
        header.set_search_focused(true);
        header.set_search_focused(true);
        assert!(header.is_search_focused());
        assert_eq!(header.state(), RevealState::Locked);
    }
}
