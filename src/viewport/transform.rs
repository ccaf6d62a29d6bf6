use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{DashboardError, DashboardResult};

const IDENTITY_EPSILON: f64 = 1e-9;

/// Allowed zoom factors for the pan/zoom transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 20.0,
        }
    }
}

impl ScaleLimits {
    pub fn validate(self) -> DashboardResult<Self> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min <= 0.0 {
            return Err(DashboardError::InvalidData(
                "scale limits must be finite and > 0".to_owned(),
            ));
        }
        if self.min > self.max {
            return Err(DashboardError::InvalidData(
                "scale limit min must be <= max".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

/// Pan/zoom applied on top of the base projection:
/// `screen = scale * base + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportTransform {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    #[must_use]
    pub const fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self.translate_x.abs() <= IDENTITY_EPSILON
            && self.translate_y.abs() <= IDENTITY_EPSILON
            && (self.scale - 1.0).abs() <= IDENTITY_EPSILON
    }

    #[must_use]
    pub fn apply(self, pixel: DataPoint) -> DataPoint {
        DataPoint::new(
            self.scale * pixel.x + self.translate_x,
            self.scale * pixel.y + self.translate_y,
        )
    }

    #[must_use]
    pub fn invert(self, pixel: DataPoint) -> DataPoint {
        DataPoint::new(
            (pixel.x - self.translate_x) / self.scale,
            (pixel.y - self.translate_y) / self.scale,
        )
    }

    /// Multiplies the scale by `factor` while keeping `anchor` fixed on screen.
    ///
    /// The resulting scale is clamped to `limits`; the anchor stays fixed for
    /// the clamped scale too.
    #[must_use]
    pub fn zoomed_about(self, anchor: DataPoint, factor: f64, limits: ScaleLimits) -> Self {
        let scale = limits.clamp(self.scale * factor);
        let ratio = scale / self.scale;
        Self {
            translate_x: anchor.x - (anchor.x - self.translate_x) * ratio,
            translate_y: anchor.y - (anchor.y - self.translate_y) * ratio,
            scale,
        }
    }

    #[must_use]
    pub fn panned_by(self, dx: f64, dy: f64) -> Self {
        Self {
            translate_x: self.translate_x + dx,
            translate_y: self.translate_y + dy,
            scale: self.scale,
        }
    }

    /// Transform that shows `focus` (pre-transform pixels) at `center` with
    /// `scale`: translate to center, scale, translate back by focus.
    #[must_use]
    pub fn centered_on(focus: DataPoint, center: DataPoint, scale: f64) -> Self {
        Self {
            translate_x: center.x - scale * focus.x,
            translate_y: center.y - scale * focus.y,
            scale,
        }
    }

    /// Componentwise interpolation, `t` in `[0, 1]`.
    #[must_use]
    pub fn interpolate(self, target: Self, t: f64) -> Self {
        let lerp = |from: f64, to: f64| from + (to - from) * t;
        Self {
            translate_x: lerp(self.translate_x, target.translate_x),
            translate_y: lerp(self.translate_y, target.translate_y),
            scale: lerp(self.scale, target.scale),
        }
    }
}
