use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Header layout variant. Each variant carries its own reveal-bar height
/// and the position the bar is pinned to while search is focused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderVariant {
    /// 60px reveal bar, stays shown while searching
    #[default]
    Compact,
    /// 80px reveal bar, tucks away while searching
    Tall,
}

impl HeaderVariant {
    pub fn slide_range(&self) -> f64 {
        match self {
            HeaderVariant::Compact => 60.0,
            HeaderVariant::Tall => 80.0,
        }
    }

    pub fn lock_position(&self) -> LockPosition {
        match self {
            HeaderVariant::Compact => LockPosition::Shown,
            HeaderVariant::Tall => LockPosition::Hidden,
        }
    }
}

impl std::fmt::Display for HeaderVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderVariant::Compact => write!(f, "compact"),
            HeaderVariant::Tall => write!(f, "tall"),
        }
    }
}

impl std::str::FromStr for HeaderVariant {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(HeaderVariant::Compact),
            "tall" => Ok(HeaderVariant::Tall),
            other => Err(crate::Error::Config(format!(
                "unknown header variant '{}' (expected 'compact' or 'tall')",
                other
            ))),
        }
    }
}

/// Where the reveal bar is pinned while the search override is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockPosition {
    Shown,
    Hidden,
}

/// Easing curve used for show/hide/snap animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the target on the last frame
    None,
    Linear,
    /// 1 - (1-t)^3
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// Symmetric cubic ease-in-out
    #[default]
    EaseInOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Header variant ("compact" or "tall")
    #[serde(default)]
    pub variant: HeaderVariant,
    /// Override for the reveal bar height in px
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_range: Option<f64>,
    /// Override for the search lock position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<LockPosition>,
    /// Duration of show/hide/snap animations
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve for animations
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            variant: HeaderVariant::default(),
            slide_range: None,
            lock: None,
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
        }
    }
}

/// Fully resolved controller parameters for one screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderSettings {
    pub slide_range: f64,
    pub lock_position: LockPosition,
    pub animation_duration: Duration,
    pub easing: EasingType,
}

impl HeaderSettings {
    /// Settings for a variant with the stock 160ms animation
    pub fn for_variant(variant: HeaderVariant) -> Self {
        Self {
            slide_range: variant.slide_range(),
            lock_position: variant.lock_position(),
            animation_duration: Duration::from_millis(default_animation_duration()),
            easing: EasingType::default(),
        }
    }

    /// Offset the bar is pinned to while locked
    pub fn locked_offset(&self) -> f64 {
        match self.lock_position {
            LockPosition::Shown => 0.0,
            LockPosition::Hidden => -self.slide_range,
        }
    }
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self::for_variant(HeaderVariant::default())
    }
}

impl HeaderConfig {
    /// Apply overrides on top of the variant defaults
    pub fn resolve(&self) -> HeaderSettings {
        let mut settings = HeaderSettings::for_variant(self.variant);
        if let Some(range) = self.slide_range {
            settings.slide_range = range;
        }
        if let Some(lock) = self.lock {
            settings.lock_position = lock;
        }
        settings.animation_duration = Duration::from_millis(self.animation_duration_ms);
        settings.easing = self.easing;
        settings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Minimum |delta| in px for a sample to count as real scrolling
    #[serde(default = "default_min_delta")]
    pub min_delta: f64,
    /// Quiet period before a settle decision is made
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
    /// Distance from the content end that still counts as "at bottom"
    #[serde(default = "default_bottom_tolerance")]
    pub bottom_tolerance: f64,
    /// Fraction of the scrollable extent past which the bar never reveals
    #[serde(default = "default_bottom_zone_ratio")]
    pub bottom_zone_ratio: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_delta: default_min_delta(),
            debounce_ms: default_debounce(),
            bottom_tolerance: default_bottom_tolerance(),
            bottom_zone_ratio: default_bottom_zone_ratio(),
        }
    }
}

impl TrackerConfig {
    #[inline]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while the header is animating or settling
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Pixels represented by one terminal row
    #[serde(default = "default_px_per_row")]
    pub px_per_row: u16,
    /// Pixels scrolled per key press or wheel notch
    #[serde(default = "default_scroll_step")]
    pub scroll_step_px: f64,
    /// Number of filler lines in the demo content
    #[serde(default = "default_content_lines")]
    pub content_lines: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            px_per_row: default_px_per_row(),
            scroll_step_px: default_scroll_step(),
            content_lines: default_content_lines(),
        }
    }
}

impl UiConfig {
    /// Frame interval while animating
    pub fn animation_tick(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_animation_duration() -> u64 {
    160
}

fn default_min_delta() -> f64 {
    3.0
}

fn default_debounce() -> u64 {
    150
}

fn default_bottom_tolerance() -> f64 {
    10.0
}

fn default_bottom_zone_ratio() -> f64 {
    0.9999
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_px_per_row() -> u16 {
    20
}

fn default_scroll_step() -> f64 {
    20.0
}

fn default_content_lines() -> usize {
    200
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config = Self::from_toml(&content)?;
            tracing::debug!("Loaded configuration from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/revealbar/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("revealbar")
            .join("config.toml")
    }

    /// Log file used while the header screen owns the terminal
    pub fn log_path() -> PathBuf {
        Self::config_path().with_file_name("revealbar.log")
    }

    /// Reject values the controller cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(range) = self.header.slide_range {
            if !range.is_finite() || range <= 0.0 {
                return Err(crate::Error::Config(format!(
                    "header.slide_range must be a positive number, got {}",
                    range
                )));
            }
        }
        if !self.tracker.min_delta.is_finite() || self.tracker.min_delta < 0.0 {
            return Err(crate::Error::Config(format!(
                "tracker.min_delta must be non-negative, got {}",
                self.tracker.min_delta
            )));
        }
        if self.ui.px_per_row == 0 {
            return Err(crate::Error::Config(
                "ui.px_per_row must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.header.variant, HeaderVariant::Compact);
        assert_eq!(config.header.animation_duration_ms, 160);
        assert_eq!(config.tracker.min_delta, 3.0);
        assert_eq!(config.tracker.debounce(), Duration::from_millis(150));
        assert_eq!(config.tracker.bottom_tolerance, 10.0);
        assert_eq!(config.ui.animation_fps, 60);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [header]
            variant = "tall"

            [tracker]
            debounce_ms = 200
            "#,
        )
        .unwrap();

        assert_eq!(config.header.variant, HeaderVariant::Tall);
        assert_eq!(config.tracker.debounce_ms, 200);
        assert_eq!(config.tracker.min_delta, 3.0);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_variant_settings() {
        let compact = HeaderSettings::for_variant(HeaderVariant::Compact);
        assert_eq!(compact.slide_range, 60.0);
        assert_eq!(compact.locked_offset(), 0.0);

        let tall = HeaderSettings::for_variant(HeaderVariant::Tall);
        assert_eq!(tall.slide_range, 80.0);
        assert_eq!(tall.locked_offset(), -80.0);
    }

    #[test]
    fn test_resolve_overrides() {
        let header = HeaderConfig {
            variant: HeaderVariant::Tall,
            slide_range: Some(100.0),
            lock: Some(LockPosition::Shown),
            animation_duration_ms: 250,
            easing: EasingType::Linear,
        };
        let settings = header.resolve();
        assert_eq!(settings.slide_range, 100.0);
        assert_eq!(settings.lock_position, LockPosition::Shown);
        assert_eq!(settings.animation_duration, Duration::from_millis(250));
        assert_eq!(settings.easing, EasingType::Linear);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let err = AppConfig::from_toml("[header]\nslide_range = -5.0\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));

        let err = AppConfig::from_toml("[ui]\npx_per_row = 0\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_log_path_sits_next_to_config() {
        let log = AppConfig::log_path();
        assert_eq!(log.file_name().and_then(|n| n.to_str()), Some("revealbar.log"));
        assert_eq!(log.parent(), AppConfig::config_path().parent());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("TALL".parse::<HeaderVariant>().unwrap(), HeaderVariant::Tall);
        assert!("wide".parse::<HeaderVariant>().is_err());
    }

    #[test]
    fn test_toml_roundtrip_keeps_variant() {
        let mut config = AppConfig::default();
        config.header.variant = HeaderVariant::Tall;
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.header.variant, HeaderVariant::Tall);
    }
}
