//! Time calculation utilities for reveal bar animations
//!
//! Provides pure functions for calculating animation progress and interpolation.

use std::time::{Duration, Instant};

/// Calculate animation progress (0.0 to 1.0) at `now`
///
/// # Arguments
/// * `start` - Animation start time
/// * `duration` - Total animation duration
/// * `now` - Current frame time
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete at `now`
#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor [0.0, 1.0]
///
/// # Returns
/// Interpolated value
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, -60.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, -60.0, 0.5) + 30.0).abs() < 0.001);
        assert!((lerp(0.0, -60.0, 1.0) + 60.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, Duration::ZERO, start) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_midway() {
        let start = Instant::now();
        let duration = Duration::from_millis(160);
        let p = progress(start, duration, start + Duration::from_millis(80));
        assert!((p - 0.5).abs() < 1e-9);
        assert!(!is_complete(start, duration, start + Duration::from_millis(159)));
        assert!(is_complete(start, duration, start + duration));
    }

    #[test]
    fn test_progress_before_start_is_zero() {
        let now = Instant::now();
        let start = now + Duration::from_millis(10);
        assert_eq!(progress(start, Duration::from_millis(100), now), 0.0);
    }
}
