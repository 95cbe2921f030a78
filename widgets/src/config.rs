//! Page configuration parsed from an optional inline JSON block.
//!
//! Every field has a default, so an empty object (or no block at all) yields
//! the stock behavior. Sections mirror the controllers they feed.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub press_feedback_ms: u32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { storage_key: consts::THEME_STORAGE_KEY.to_owned(), press_feedback_ms: consts::THEME_PRESS_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Whether the auto-advance timer runs at all.
    pub auto_advance: bool,
    pub auto_advance_ms: u32,
    pub settle_ms: u32,
    pub press_feedback_ms: u32,
    pub swipe_threshold_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance: true,
            auto_advance_ms: consts::AUTO_ADVANCE_MS,
            settle_ms: consts::SLIDE_SETTLE_MS,
            press_feedback_ms: consts::NAV_PRESS_MS,
            swipe_threshold_px: consts::SWIPE_THRESHOLD_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    pub header_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { header_offset_px: consts::HEADER_OFFSET_PX }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillsConfig {
    pub visibility_threshold: f64,
    pub fill_delay_ms: u32,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self { visibility_threshold: consts::SKILL_VISIBILITY_THRESHOLD, fill_delay_ms: consts::SKILL_FILL_DELAY_MS }
    }
}

/// Full page configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub theme: ThemeConfig,
    pub carousel: CarouselConfig,
    pub scroll: ScrollConfig,
    pub skills: SkillsConfig,
    pub fade_in_ms: u32,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            carousel: CarouselConfig::default(),
            scroll: ScrollConfig::default(),
            skills: SkillsConfig::default(),
            fade_in_ms: consts::PAGE_FADE_IN_MS,
            log_level: "info".to_owned(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config block.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controllers cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.storage_key.trim().is_empty() {
            return Err(invalid("theme.storage_key", "must not be empty"));
        }
        if self.carousel.auto_advance_ms == 0 {
            return Err(invalid("carousel.auto_advance_ms", "must be positive"));
        }
        if !self.carousel.swipe_threshold_px.is_finite() || self.carousel.swipe_threshold_px < 0.0 {
            return Err(invalid("carousel.swipe_threshold_px", "must be a non-negative number"));
        }
        if !self.scroll.header_offset_px.is_finite() {
            return Err(invalid("scroll.header_offset_px", "must be a finite number"));
        }
        if !(0.0..=1.0).contains(&self.skills.visibility_threshold) {
            return Err(invalid("skills.visibility_threshold", "must be within [0, 1]"));
        }
        self.log_level_filter()?;
        Ok(())
    }

    /// The configured log level.
    pub fn log_level_filter(&self) -> Result<log::Level, ConfigError> {
        self.log_level
            .parse::<log::Level>()
            .map_err(|_| invalid("log_level", &format!("unknown level {:?}", self.log_level)))
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.to_owned() }
}
