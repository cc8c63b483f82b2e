//! Reveal bar state
//!
//! - `controller` - bounded offset, animation arbitration and the search lock
//! - `opacity` - border/content opacity derived from the offset on read

pub mod controller;
pub mod opacity;

pub use controller::{Rail, RevealController, RevealState};
pub use opacity::{collapse_progress, derive_opacity, HeaderOpacity};
