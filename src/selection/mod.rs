//! Shared highlight state across linked views.
//!
//! The coordinator owns one [`SelectionSet`]; views only ever read it and decide
//! their own emphasis. Brushes are retained in data space so the selection can
//! be re-derived when the visible set changes under it.

mod coordinator;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, LinearScale, SpecimenId};

pub use coordinator::{SelectionCoordinator, SelectionOrigin};

/// Ordered set of highlighted specimen IDs.
///
/// The revision only advances when the contents actually change, so consumers
/// can skip work by comparing revisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    ids: BTreeSet<SpecimenId>,
    revision: u64,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &SpecimenId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecimenId> {
        self.ids.iter()
    }

    #[must_use]
    pub fn ids(&self) -> &BTreeSet<SpecimenId> {
        &self.ids
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the contents; returns `false` (and keeps the revision) when the
    /// new set equals the current one.
    fn replace(&mut self, ids: BTreeSet<SpecimenId>) -> bool {
        if ids == self.ids {
            return false;
        }
        self.ids = ids;
        self.revision += 1;
        true
    }
}

/// Brush rectangle in screen pixels, as drawn (corners in any order).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }

    #[must_use]
    pub fn start(self) -> DataPoint {
        DataPoint::new(self.x0, self.y0)
    }

    #[must_use]
    pub fn end(self) -> DataPoint {
        DataPoint::new(self.x1, self.y1)
    }
}

/// Screen-to-data inversion used to bring a brush into data space.
pub trait AxisScales {
    fn invert_x(&self, pixel: f64) -> f64;
    fn invert_y(&self, pixel: f64) -> f64;

    fn screen_to_data(&self, pixel: DataPoint) -> DataPoint {
        DataPoint::new(self.invert_x(pixel.x), self.invert_y(pixel.y))
    }
}

/// Independent x/y linear scales of a plain chart (no pan/zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScalePair {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl AxisScalePair {
    #[must_use]
    pub const fn new(x: LinearScale, y: LinearScale) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn project(&self, point: DataPoint) -> DataPoint {
        DataPoint::new(
            self.x.domain_to_pixel(point.x),
            self.y.domain_to_pixel(point.y),
        )
    }
}

impl AxisScales for AxisScalePair {
    fn invert_x(&self, pixel: f64) -> f64 {
        self.x.pixel_to_domain(pixel)
    }

    fn invert_y(&self, pixel: f64) -> f64 {
        self.y.pixel_to_domain(pixel)
    }
}
