//! Scroll tracking
//!
//! Classifies raw scroll offsets into a live scroll signal plus a debounced,
//! direction-aware "settled" decision. Bounce samples (negative offsets from
//! elastic overscroll) and jitter below `min_delta` are dropped without
//! touching any state.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::TrackerConfig;

/// Scroll direction inferred from consecutive real samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Content moving back toward the top; the bar should reveal
    Up,
    /// Content moving toward the end; the bar should collapse
    Down,
}

/// Layout measurements forwarded by the host screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentMetrics {
    #[serde(default)]
    pub viewport_height: f64,
    #[serde(default)]
    pub content_height: f64,
    #[serde(default)]
    pub header_height: f64,
}

impl ContentMetrics {
    pub fn new(viewport_height: f64, content_height: f64, header_height: f64) -> Self {
        Self {
            viewport_height,
            content_height,
            header_height,
        }
    }

    /// Largest reachable scroll offset, zero when the content fits
    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

/// Scroll signal change produced by a real sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUpdate {
    pub previous: f64,
    pub current: f64,
}

impl ScrollUpdate {
    #[inline]
    pub fn delta(&self) -> f64 {
        self.current - self.previous
    }
}

/// Edge flags captured from the most recent real sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Edges {
    at_top: bool,
    at_bottom: bool,
    in_bottom_zone: bool,
}

#[derive(Debug, Clone)]
pub struct ScrollTracker {
    config: TrackerConfig,
    /// Offset of the last accepted sample
    last_offset: f64,
    /// Bounce-clamped scroll position
    scroll_signal: f64,
    last_direction: Option<Direction>,
    edges: Edges,
    /// Pending settle deadline; replaced, never stacked
    settle_deadline: Option<Instant>,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl ScrollTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            last_offset: 0.0,
            scroll_signal: 0.0,
            last_direction: None,
            edges: Edges {
                at_top: true,
                ..Edges::default()
            },
            settle_deadline: None,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Current bounce-clamped scroll offset
    #[inline]
    pub fn scroll_signal(&self) -> f64 {
        self.scroll_signal
    }

    #[inline]
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    pub fn is_at_top(&self) -> bool {
        self.edges.at_top
    }

    pub fn is_at_bottom(&self) -> bool {
        self.edges.at_bottom
    }

    pub fn is_in_bottom_zone(&self) -> bool {
        self.edges.in_bottom_zone
    }

    /// True while a settle decision is waiting for the quiet period to pass
    #[inline]
    pub fn has_pending_settle(&self) -> bool {
        self.settle_deadline.is_some()
    }

    pub fn settle_deadline(&self) -> Option<Instant> {
        self.settle_deadline
    }

    /// Feed one raw scroll sample.
    ///
    /// Returns the signal change when the sample counts as real scrolling,
    /// `None` when it was filtered as bounce or jitter.
    pub fn on_scroll(
        &mut self,
        offset_y: f64,
        metrics: &ContentMetrics,
        now: Instant,
    ) -> Option<ScrollUpdate> {
        if !offset_y.is_finite() {
            tracing::trace!("Dropping non-finite scroll sample: {}", offset_y);
            return None;
        }

        let delta = offset_y - self.last_offset;
        if delta.abs() <= self.config.min_delta || offset_y < 0.0 {
            tracing::trace!(offset_y, delta, "Filtered scroll sample");
            return None;
        }

        let previous = self.scroll_signal;
        self.last_offset = offset_y;
        self.scroll_signal = offset_y.max(0.0);
        self.edges = self.classify(offset_y, metrics);
        self.last_direction = Some(if delta > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        });
        self.settle_deadline = Some(now + self.config.debounce());

        Some(ScrollUpdate {
            previous,
            current: self.scroll_signal,
        })
    }

    fn classify(&self, offset_y: f64, metrics: &ContentMetrics) -> Edges {
        let viewport = metrics.viewport_height;
        let content = metrics.content_height;

        let at_bottom =
            content > 0.0 && offset_y + viewport >= content - self.config.bottom_tolerance;

        // Unmeasured layouts never enter the dead zone. Content shorter than
        // the viewport has a negative threshold, so any real sample is in it.
        let in_bottom_zone = content > 0.0
            && viewport > 0.0
            && offset_y >= (content - viewport) * self.config.bottom_zone_ratio;

        Edges {
            at_top: offset_y <= 0.0,
            at_bottom,
            in_bottom_zone,
        }
    }

    /// Check the debounce timer.
    ///
    /// Returns `Some(decision)` exactly once per quiet period, where the
    /// decision itself may be `None` when the bar should be left alone.
    pub fn poll_settle(&mut self, now: Instant) -> Option<Option<Direction>> {
        match self.settle_deadline {
            Some(deadline) if now >= deadline => {
                self.settle_deadline = None;
                let decision = self.settle_decision();
                tracing::debug!(?decision, edges = ?self.edges, "Scroll settled");
                Some(decision)
            }
            _ => None,
        }
    }

    /// Drop any pending settle decision
    pub fn cancel_settle(&mut self) {
        self.settle_deadline = None;
    }

    fn settle_decision(&self) -> Option<Direction> {
        let Edges {
            at_top,
            at_bottom,
            in_bottom_zone,
        } = self.edges;

        if at_top {
            return Some(Direction::Up);
        }
        if in_bottom_zone {
            return Some(Direction::Down);
        }
        match (at_bottom, self.last_direction) {
            (true, Some(Direction::Up)) => Some(Direction::Up),
            // 1:1 tracking already holds the bar hidden
            (true, Some(Direction::Down)) => None,
            (_, direction) => direction,
        }
    }
}
