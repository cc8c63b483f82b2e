//! Scroll trace replay
//!
//! A trace is a JSON recording of what a screen fed the header: scroll
//! offsets, layout changes, search focus and explicit commands, each
//! stamped with milliseconds since the start of the recording. Replaying
//! drives a [`CollapsingHeader`] on a simulated clock and records every
//! frame, which makes traces usable both as regression fixtures and as a
//! debugging aid from the command line.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::{HeaderSettings, HeaderVariant, TrackerConfig};
use crate::header::{CollapsingHeader, HeaderEvent};
use crate::reveal::RevealState;
use crate::tracker::ContentMetrics;
use crate::{Error, Result};

/// How long replay keeps ticking after the last recorded event
const SETTLE_TAIL_MS: u64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollTrace {
    /// Overrides the configured variant's slide range and lock position
    #[serde(default)]
    pub variant: Option<HeaderVariant>,
    /// Simulated frame interval
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Layout at the start of the recording
    #[serde(default)]
    pub metrics: ContentMetrics,
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: TraceAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceAction {
    Scroll {
        offset_y: f64,
    },
    Metrics {
        viewport_height: f64,
        content_height: f64,
        #[serde(default)]
        header_height: f64,
    },
    SearchFocus {
        active: bool,
    },
    Show,
    Hide,
    Snap,
}

fn default_frame_ms() -> u64 {
    16
}

impl ScrollTrace {
    pub fn from_json(json: &str) -> Result<Self> {
        let trace: Self = serde_json::from_str(json)?;
        trace.validate()?;
        Ok(trace)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_ms == 0 {
            return Err(Error::Trace("frame_ms must be at least 1".to_string()));
        }
        if let Some(pair) = self.events.windows(2).find(|w| w[1].at_ms < w[0].at_ms) {
            return Err(Error::Trace(format!(
                "events out of order: {}ms follows {}ms",
                pair[1].at_ms, pair[0].at_ms
            )));
        }
        Ok(())
    }

    /// Apply the trace's variant, if any, on top of `base`
    pub fn settings(&self, base: HeaderSettings) -> HeaderSettings {
        match self.variant {
            Some(variant) => HeaderSettings {
                slide_range: variant.slide_range(),
                lock_position: variant.lock_position(),
                ..base
            },
            None => base,
        }
    }

    fn end_ms(&self) -> u64 {
        self.events.last().map(|e| e.at_ms).unwrap_or(0) + SETTLE_TAIL_MS
    }
}

/// Header state sampled after one simulated frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplayFrame {
    pub at_ms: u64,
    pub scroll_signal: f64,
    pub offset: f64,
    pub state: RevealState,
    pub border: f64,
    pub content: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    pub event: HeaderEvent,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    pub frames: Vec<ReplayFrame>,
    pub events: Vec<TimedEvent>,
}

impl ReplayReport {
    pub fn final_frame(&self) -> Option<&ReplayFrame> {
        self.frames.last()
    }

    /// Frame closest to, but not after, `at_ms`
    pub fn frame_at(&self, at_ms: u64) -> Option<&ReplayFrame> {
        self.frames.iter().take_while(|f| f.at_ms <= at_ms).last()
    }
}

/// Run a trace to completion on a simulated clock
pub fn replay(
    trace: &ScrollTrace,
    settings: HeaderSettings,
    tracker: TrackerConfig,
) -> ReplayReport {
    let mut header = CollapsingHeader::new(trace.settings(settings), tracker);
    header.set_metrics(trace.metrics);

    let base = Instant::now();
    let at = |ms: u64| base + Duration::from_millis(ms);

    let mut report = ReplayReport::default();
    let mut pending = trace.events.iter().peekable();
    let end = trace.end_ms();
    let mut t = 0;

    tracing::debug!(events = trace.events.len(), end_ms = end, "Replaying scroll trace");

    while t <= end {
        while let Some(event) = pending.next_if(|e| e.at_ms <= t) {
            apply(&mut header, &event.action, at(event.at_ms));
        }

        for event in header.tick(at(t)) {
            report.events.push(TimedEvent { at_ms: t, event });
        }

        let opacity = header.opacity();
        report.frames.push(ReplayFrame {
            at_ms: t,
            scroll_signal: header.scroll_signal(),
            offset: header.offset(),
            state: header.state(),
            border: opacity.border,
            content: opacity.content,
        });

        t += trace.frame_ms;
    }

    report
}

fn apply(header: &mut CollapsingHeader, action: &TraceAction, now: Instant) {
    match *action {
        TraceAction::Scroll { offset_y } => header.on_scroll(offset_y, now),
        TraceAction::Metrics {
            viewport_height,
            content_height,
            header_height,
        } => header.set_metrics(ContentMetrics::new(
            viewport_height,
            content_height,
            header_height,
        )),
        TraceAction::SearchFocus { active } => header.set_search_focused(active),
        TraceAction::Show => {
            header.show_reveal_bar(now);
        }
        TraceAction::Hide => {
            header.hide_reveal_bar(now);
        }
        TraceAction::Snap => {
            header.snap_to_nearest(now);
        }
    }
}
