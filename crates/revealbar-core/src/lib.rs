pub mod config;
pub mod error;
pub mod header;
pub mod motion;
pub mod reveal;
pub mod trace;
pub mod tracker;

pub use config::{
    AppConfig, EasingType, HeaderSettings, HeaderVariant, LockPosition, TrackerConfig,
};
pub use error::{Error, Result};
pub use header::{CollapsingHeader, HeaderEvent};
pub use reveal::{derive_opacity, HeaderOpacity, Rail, RevealController, RevealState};
pub use trace::{replay, ReplayReport, ScrollTrace};
pub use tracker::{ContentMetrics, Direction, ScrollTracker, ScrollUpdate};
