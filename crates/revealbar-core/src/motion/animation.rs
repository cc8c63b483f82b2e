//! Reveal bar tween
//!
//! Combines easing functions and timing utilities into a single from/to
//! animation. The controller owns at most one of these at a time.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// One in-flight offset animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetAnimation {
    /// Animation start time
    start: Instant,
    /// Starting offset
    from: f64,
    /// Target offset
    to: f64,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
}

impl OffsetAnimation {
    pub fn new(from: f64, to: f64, start: Instant, duration: Duration, easing: EasingType) -> Self {
        Self {
            start,
            from,
            to,
            duration,
            easing,
        }
    }

    /// Target offset
    #[inline]
    pub fn target(&self) -> f64 {
        self.to
    }

    #[inline]
    pub fn is_complete(&self, now: Instant) -> bool {
        is_complete(self.start, self.duration, now)
    }

    /// Interpolated offset at `now`; exactly `to` once complete
    pub fn sample(&self, now: Instant) -> f64 {
        if self.is_complete(now) {
            return self.to;
        }
        let t = progress(self.start, self.duration, now);
        lerp(self.from, self.to, self.easing.apply(t))
    }
}
