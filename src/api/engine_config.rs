use serde::{Deserialize, Serialize};

use crate::core::{Margins, PlotArea};
use crate::error::{DashboardError, DashboardResult};
use crate::filter::FilterConfig;
use crate::interaction::DEFAULT_THROTTLE_INTERVAL_SECONDS;
use crate::viewport::{DEFAULT_DOMAIN_PADDING_RATIO, DEFAULT_TRANSITION_SECONDS, ScaleLimits};

/// Public dashboard bootstrap configuration.
///
/// This type is serializable so host applications can load their dashboard
/// layout and initial filter from a file. It is not a session store: selection
/// and viewport state are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_scatter_area")]
    pub scatter_area: PlotArea,
    #[serde(default = "default_profiles_area")]
    pub profiles_area: PlotArea,
    #[serde(default = "default_landmark_area")]
    pub landmark_area: PlotArea,
    #[serde(default)]
    pub scale_limits: ScaleLimits,
    #[serde(default = "default_domain_padding_ratio")]
    pub domain_padding_ratio: f64,
    #[serde(default = "default_transition_seconds")]
    pub auto_zoom_transition_seconds: f64,
    #[serde(default = "default_throttle_interval_seconds")]
    pub gesture_throttle_seconds: f64,
    #[serde(default)]
    pub initial_filter: FilterConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            scatter_area: default_scatter_area(),
            profiles_area: default_profiles_area(),
            landmark_area: default_landmark_area(),
            scale_limits: ScaleLimits::default(),
            domain_padding_ratio: default_domain_padding_ratio(),
            auto_zoom_transition_seconds: default_transition_seconds(),
            gesture_throttle_seconds: default_throttle_interval_seconds(),
            initial_filter: FilterConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Sets the landmark map plot area.
    #[must_use]
    pub fn with_landmark_area(mut self, area: PlotArea) -> Self {
        self.landmark_area = area;
        self
    }

    /// Sets the scatter plot area.
    #[must_use]
    pub fn with_scatter_area(mut self, area: PlotArea) -> Self {
        self.scatter_area = area;
        self
    }

    #[must_use]
    pub fn with_profiles_area(mut self, area: PlotArea) -> Self {
        self.profiles_area = area;
        self
    }

    #[must_use]
    pub fn with_scale_limits(mut self, limits: ScaleLimits) -> Self {
        self.scale_limits = limits;
        self
    }

    /// Sets the auto-zoom animation duration; `0` applies transforms at once.
    #[must_use]
    pub fn with_auto_zoom_transition_seconds(mut self, seconds: f64) -> Self {
        self.auto_zoom_transition_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_gesture_throttle_seconds(mut self, seconds: f64) -> Self {
        self.gesture_throttle_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_initial_filter(mut self, filter: FilterConfig) -> Self {
        self.initial_filter = filter;
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        self.scatter_area.validate()?;
        self.profiles_area.validate()?;
        self.landmark_area.validate()?;
        self.scale_limits.validate()?;
        if !self.domain_padding_ratio.is_finite() || self.domain_padding_ratio < 0.0 {
            return Err(DashboardError::InvalidData(
                "domain padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.auto_zoom_transition_seconds.is_finite() || self.auto_zoom_transition_seconds < 0.0
        {
            return Err(DashboardError::InvalidData(
                "auto-zoom transition duration must be finite and >= 0".to_owned(),
            ));
        }
        if !self.gesture_throttle_seconds.is_finite() || self.gesture_throttle_seconds < 0.0 {
            return Err(DashboardError::InvalidData(
                "gesture throttle interval must be finite and >= 0".to_owned(),
            ));
        }
        self.initial_filter.validate()
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}

fn default_scatter_area() -> PlotArea {
    PlotArea::new(100.0, 120.0, 500.0, 500.0)
}

fn default_profiles_area() -> PlotArea {
    PlotArea::from_margins(720.0, 420.0, Margins::new(20.0, 30.0, 50.0, 60.0))
}

fn default_landmark_area() -> PlotArea {
    PlotArea::from_margins(1000.0, 700.0, Margins::new(60.0, 320.0, 60.0, 60.0))
}

fn default_domain_padding_ratio() -> f64 {
    DEFAULT_DOMAIN_PADDING_RATIO
}

fn default_transition_seconds() -> f64 {
    DEFAULT_TRANSITION_SECONDS
}

fn default_throttle_interval_seconds() -> f64 {
    DEFAULT_THROTTLE_INTERVAL_SECONDS
}
