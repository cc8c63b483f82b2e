//! Motion primitives for the reveal bar
//!
//! ## Atoms
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation against an explicit clock
//!
//! ## Molecules
//! - `animation` - A single from/to tween sampled by the host frame loop
//!
//! Nothing here reads the wall clock. Every call takes the `Instant` the
//! host considers "now", which keeps the controller deterministic under test.

pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::OffsetAnimation;
pub use easing::EasingTypeExt;
