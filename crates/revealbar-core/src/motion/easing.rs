//! Easing curves for show/hide/snap
//!
//! A curve maps the linear progress of a reveal bar animation to the
//! fraction of the distance between its start offset and its rail.

pub use crate::config::EasingType;

pub trait EasingTypeExt {
    /// Fraction of the travel covered at progress `t`. Input outside
    /// [0, 1] is clamped, and every curve ends exactly on 1 so the bar
    /// lands on its rail.
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => step(t),
            EasingType::Linear => t,
            EasingType::Cubic => ease_out_pow(t, 3),
            EasingType::Quintic => ease_out_pow(t, 5),
            EasingType::EaseOut => ease_out_expo(t),
            EasingType::EaseInOut => ease_in_out_cubic(t),
        }
    }
}

/// Bar stays put until the final frame
#[inline]
fn step(t: f64) -> f64 {
    if t < 1.0 {
        0.0
    } else {
        1.0
    }
}

/// 1 - (1-t)^n
#[inline]
fn ease_out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// 1 - 2^(-10t), forced to 1 at the end
#[inline]
fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

/// 4t^3 up to the midpoint, mirrored after it
#[inline]
fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t.powi(3)
    } else {
        1.0 - (2.0 - 2.0 * t).powi(3) / 2.0
    }
}
