//! Reveal bar controller
//!
//! Owns the vertical offset of the reveal bar, clamped to
//! `[-slide_range, 0]`. Three paths can move it:
//!
//! - continuous 1:1 tracking of scroll deltas (idle only)
//! - explicit show/hide/snap animations (one at a time, never queued)
//! - the search lock, which cancels any animation and pins the offset
//!
//! The host drives animations by calling [`RevealController::tick`] once
//! per frame with the current time.

use std::time::Instant;

use serde::Serialize;

use super::opacity::{derive_opacity, HeaderOpacity};
use crate::config::HeaderSettings;
use crate::motion::OffsetAnimation;

/// Resting position of the reveal bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rail {
    /// offset == 0
    Shown,
    /// offset == -slide_range
    Hidden,
}

/// Observable controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    IdleShown,
    IdleHidden,
    IdlePartial,
    Animating,
    Locked,
}

impl std::fmt::Display for RevealState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RevealState::IdleShown => "shown",
            RevealState::IdleHidden => "hidden",
            RevealState::IdlePartial => "partial",
            RevealState::Animating => "animating",
            RevealState::Locked => "locked",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Animating { animation: OffsetAnimation, rail: Rail },
    Locked,
}

#[derive(Debug, Clone)]
pub struct RevealController {
    settings: HeaderSettings,
    offset: f64,
    phase: Phase,
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new(HeaderSettings::default())
    }
}

impl RevealController {
    pub fn new(settings: HeaderSettings) -> Self {
        Self {
            settings,
            offset: 0.0,
            phase: Phase::Idle,
        }
    }

    pub fn settings(&self) -> &HeaderSettings {
        &self.settings
    }

    #[inline]
    pub fn slide_range(&self) -> f64 {
        self.settings.slide_range.max(0.0)
    }

    /// Current offset in `[-slide_range, 0]`
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.phase == Phase::Locked
    }

    pub fn state(&self) -> RevealState {
        match self.phase {
            Phase::Animating { .. } => RevealState::Animating,
            Phase::Locked => RevealState::Locked,
            Phase::Idle => {
                if self.offset >= 0.0 {
                    RevealState::IdleShown
                } else if self.offset <= -self.slide_range() {
                    RevealState::IdleHidden
                } else {
                    RevealState::IdlePartial
                }
            }
        }
    }

    /// Border and content opacity for the current offset
    pub fn opacity(&self) -> HeaderOpacity {
        derive_opacity(self.offset, self.slide_range())
    }

    fn rail_offset(&self, rail: Rail) -> f64 {
        match rail {
            Rail::Shown => 0.0,
            Rail::Hidden => -self.slide_range(),
        }
    }

    /// Move the bar exactly as far as the content scrolled.
    ///
    /// Returns `false` when the move was suppressed by an animation or
    /// the search lock.
    pub fn apply_continuous_tracking(&mut self, previous: f64, current: f64) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }

        let delta = current - previous;
        if delta > 0.0 {
            self.offset = (self.offset - delta.abs()).max(-self.slide_range());
        } else if delta < 0.0 {
            self.offset = (self.offset + delta.abs()).min(0.0);
        }
        true
    }

    pub fn show_reveal_bar(&mut self, now: Instant) -> bool {
        self.animate_to(Rail::Shown, now)
    }

    pub fn hide_reveal_bar(&mut self, now: Instant) -> bool {
        self.animate_to(Rail::Hidden, now)
    }

    /// Animate to whichever rail is nearer. Exactly halfway resolves to
    /// shown. Returns the chosen rail, or `None` when guarded.
    pub fn snap_to_nearest(&mut self, now: Instant) -> Option<Rail> {
        if self.phase != Phase::Idle {
            return None;
        }

        let threshold = self.slide_range() / 2.0;
        let rail = if self.offset > -threshold {
            Rail::Shown
        } else {
            Rail::Hidden
        };
        self.animate_to(rail, now).then_some(rail)
    }

    fn animate_to(&mut self, rail: Rail, now: Instant) -> bool {
        if self.phase != Phase::Idle {
            tracing::trace!(?rail, phase = ?self.phase, "Ignoring reveal command");
            return false;
        }

        let target = self.rail_offset(rail);
        let animation = OffsetAnimation::new(
            self.offset,
            target,
            now,
            self.settings.animation_duration,
            self.settings.easing,
        );
        tracing::debug!(?rail, from = self.offset, to = target, "Starting reveal animation");
        self.phase = Phase::Animating { animation, rail };
        true
    }

    /// Advance the in-flight animation to `now`.
    ///
    /// Returns the rail reached when an animation completes on this frame.
    pub fn tick(&mut self, now: Instant) -> Option<Rail> {
        let Phase::Animating { animation, rail } = self.phase else {
            return None;
        };

        let sampled = animation.sample(now);
        self.offset = sampled.clamp(-self.slide_range(), 0.0);

        if animation.is_complete(now) {
            self.offset = animation.target();
            self.phase = Phase::Idle;
            tracing::debug!(?rail, "Reveal animation complete");
            Some(rail)
        } else {
            None
        }
    }

    /// Engage or release the search lock.
    ///
    /// Engaging cancels any in-flight animation (its partial progress is
    /// discarded) and pins the offset at the configured lock position.
    /// Releasing leaves the bar where it is; the next scroll or explicit
    /// command resumes normal behaviour.
    pub fn set_search_focus_override(&mut self, active: bool) {
        match (active, self.phase) {
            (true, phase) => {
                if let Phase::Animating { rail, .. } = phase {
                    tracing::debug!(?rail, "Search lock cancelled reveal animation");
                }
                self.offset = self.settings.locked_offset().clamp(-self.slide_range(), 0.0);
                self.phase = Phase::Locked;
            }
            (false, Phase::Locked) => {
                self.phase = Phase::Idle;
            }
            (false, _) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HeaderVariant, LockPosition};
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn compact() -> RevealController {
        RevealController::new(HeaderSettings::for_variant(HeaderVariant::Compact))
    }

    fn tall() -> RevealController {
        RevealController::new(HeaderSettings::for_variant(HeaderVariant::Tall))
    }

    #[test]
    fn test_initial_state_is_shown() {
        let controller = compact();
        assert_eq!(controller.offset(), 0.0);
        assert_eq!(controller.state(), RevealState::IdleShown);
    }

    #[test]
    fn test_tracking_is_one_to_one_and_clamped() {
        let mut controller = compact();

        controller.apply_continuous_tracking(0.0, 20.0);
        assert_eq!(controller.offset(), -20.0);
        assert_eq!(controller.state(), RevealState::IdlePartial);

        controller.apply_continuous_tracking(20.0, 100.0);
        assert_eq!(controller.offset(), -60.0);
        assert_eq!(controller.state(), RevealState::IdleHidden);

        controller.apply_continuous_tracking(100.0, 90.0);
        assert_eq!(controller.offset(), -50.0);

        controller.apply_continuous_tracking(90.0, 0.0);
        assert_eq!(controller.offset(), 0.0);
    }

    #[test]
    fn test_bounds_hold_for_any_delta_sequence() {
        let mut controller = tall();
        let mut signal = 0.0;
        // Deterministic pseudo-random walk
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..2000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let step = (seed % 301) as f64 - 150.0;
            let next = signal + step;
            controller.apply_continuous_tracking(signal, next);
            signal = next;
            assert!(
                (-80.0..=0.0).contains(&controller.offset()),
                "offset escaped: {}",
                controller.offset()
            );
        }
    }

    #[test]
    fn test_show_twice_runs_one_animation() {
        let start = Instant::now();
        let mut controller = compact();
        controller.apply_continuous_tracking(0.0, 60.0);

        assert!(controller.show_reveal_bar(start));
        assert!(!controller.show_reveal_bar(start));
        assert!(!controller.hide_reveal_bar(start + ms(10)));
        assert!(controller.is_animating());

        assert_eq!(controller.tick(start + ms(80)), None);
        assert!(controller.offset() > -60.0 && controller.offset() < 0.0);
        assert_eq!(controller.tick(start + ms(160)), Some(Rail::Shown));
        assert_eq!(controller.offset(), 0.0);
        assert_eq!(controller.state(), RevealState::IdleShown);
        assert_eq!(controller.tick(start + ms(200)), None);
    }

    #[test]
    fn test_tracking_suppressed_while_animating() {
        let start = Instant::now();
        let mut controller = compact();
        controller.hide_reveal_bar(start);

        assert!(!controller.apply_continuous_tracking(0.0, 30.0));
        controller.tick(start + ms(160));
        assert_eq!(controller.offset(), -60.0);
    }

    #[test]
    fn test_snap_exact_half_resolves_shown() {
        let start = Instant::now();
        let mut controller = compact();
        controller.apply_continuous_tracking(0.0, 30.0);
        assert_eq!(controller.offset(), -30.0);

        assert_eq!(controller.snap_to_nearest(start), Some(Rail::Shown));
        assert_eq!(controller.tick(start + ms(160)), Some(Rail::Shown));
        assert_eq!(controller.offset(), 0.0);
    }

    #[test]
    fn test_snap_past_half_resolves_hidden() {
        let start = Instant::now();
        let mut controller = tall();
        controller.apply_continuous_tracking(0.0, 41.0);

        assert_eq!(controller.snap_to_nearest(start), Some(Rail::Hidden));
        assert_eq!(controller.tick(start + ms(160)), Some(Rail::Hidden));
        assert_eq!(controller.offset(), -80.0);
    }

    #[test]
    fn test_snap_guarded_while_animating() {
        let start = Instant::now();
        let mut controller = compact();
        controller.hide_reveal_bar(start);
        assert_eq!(controller.snap_to_nearest(start + ms(5)), None);
    }

    #[test]
    fn test_lock_cancels_animation_and_pins_hidden() {
        let start = Instant::now();
        let mut controller = tall();
        controller.apply_continuous_tracking(0.0, 80.0);

        controller.show_reveal_bar(start);
        controller.tick(start + ms(40));
        controller.set_search_focus_override(true);

        assert_eq!(controller.state(), RevealState::Locked);
        assert_eq!(controller.offset(), -80.0);
        // The cancelled animation never resumes
        assert_eq!(controller.tick(start + ms(200)), None);
        assert_eq!(controller.offset(), -80.0);
    }

    #[test]
    fn test_lock_pins_shown_for_compact() {
        let mut controller = compact();
        controller.apply_continuous_tracking(0.0, 45.0);
        controller.set_search_focus_override(true);
        assert_eq!(controller.offset(), 0.0);
    }

    #[test]
    fn test_locked_controller_ignores_everything() {
        let start = Instant::now();
        let mut controller = compact();
        controller.set_search_focus_override(true);

        assert!(!controller.apply_continuous_tracking(0.0, 500.0));
        assert!(!controller.hide_reveal_bar(start));
        assert_eq!(controller.snap_to_nearest(start), None);
        assert_eq!(controller.offset(), 0.0);
    }

    #[test]
    fn test_unlock_resumes_tracking_without_resnap() {
        let mut controller = RevealController::new(HeaderSettings {
            lock_position: LockPosition::Hidden,
            ..HeaderSettings::for_variant(HeaderVariant::Compact)
        });
        controller.set_search_focus_override(true);
        controller.set_search_focus_override(false);

        assert_eq!(controller.state(), RevealState::IdleHidden);
        assert_eq!(controller.offset(), -60.0);

        controller.apply_continuous_tracking(100.0, 85.0);
        assert_eq!(controller.offset(), -45.0);
    }

    #[test]
    fn test_release_without_lock_is_noop() {
        let start = Instant::now();
        let mut controller = compact();
        controller.hide_reveal_bar(start);
        controller.set_search_focus_override(false);
        assert!(controller.is_animating());
    }

    #[test]
    fn test_opacity_tracks_offset() {
        let mut controller = compact();
        assert_eq!(controller.opacity().content, 1.0);
        controller.apply_continuous_tracking(0.0, 60.0);
        assert_eq!(controller.opacity().content, 0.0);
        assert!((controller.opacity().border - 1.0).abs() < 1e-9);
    }
}
