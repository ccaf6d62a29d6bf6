use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// Pixel rectangle that a view plots into, already inset by its margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds the inner plot area of a `width x height` canvas.
    #[must_use]
    pub fn from_margins(width: f64, height: f64, margins: Margins) -> Self {
        Self {
            left: margins.left,
            top: margins.top,
            width: width - margins.left - margins.right,
            height: height - margins.top - margins.bottom,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn validate(self) -> DashboardResult<Self> {
        if !self.is_valid() {
            return Err(DashboardError::InvalidPlotArea {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(self) -> DataPoint {
        DataPoint::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Canvas margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle with normalized bounds (`min <= max` on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataRect {
    /// Builds a rectangle from two opposite corners given in any order.
    #[must_use]
    pub fn from_corners(a: DataPoint, b: DataPoint) -> Self {
        Self {
            x_min: a.x.min(b.x),
            x_max: a.x.max(b.x),
            y_min: a.y.min(b.y),
            y_max: a.y.max(b.y),
        }
    }

    /// Bounding box of all finite points, or `None` when there are none.
    #[must_use]
    pub fn bounding<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DataPoint>,
    {
        points
            .into_iter()
            .filter(|point| point.is_finite())
            .fold(None, |acc: Option<Self>, point| {
                Some(match acc {
                    None => Self {
                        x_min: point.x,
                        x_max: point.x,
                        y_min: point.y,
                        y_max: point.y,
                    },
                    Some(rect) => Self {
                        x_min: rect.x_min.min(point.x),
                        x_max: rect.x_max.max(point.x),
                        y_min: rect.y_min.min(point.y),
                        y_max: rect.y_max.max(point.y),
                    },
                })
            })
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y_max - self.y_min
    }

    #[must_use]
    pub fn center(self) -> DataPoint {
        DataPoint::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Inclusive containment test. Non-finite points are never contained.
    #[must_use]
    pub fn contains(self, point: DataPoint) -> bool {
        point.x >= self.x_min
            && point.x <= self.x_max
            && point.y >= self.y_min
            && point.y <= self.y_max
    }
}

/// Identifies one of the linked views sharing filter and selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    /// Normalized disc area against profile spread.
    Scatter,
    /// Gaussian gradient-profile curves.
    GradientProfiles,
    /// Landmark coordinates with pan/zoom.
    LandmarkMap,
}

impl ViewKind {
    pub const ALL: [Self; 3] = [Self::Scatter, Self::GradientProfiles, Self::LandmarkMap];
}
