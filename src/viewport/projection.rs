use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, DataRect, LinearScale, PlotArea};
use crate::error::{DashboardError, DashboardResult};
use crate::selection::AxisScales;

use super::ViewportTransform;

/// Default padding added around the data extent, as a share of its span.
pub const DEFAULT_DOMAIN_PADDING_RATIO: f64 = 0.05;

/// Expands `extent` so one data unit covers the same number of pixels on both
/// axes of `area`.
///
/// Each axis is padded by `padding_ratio` of its span first (a zero span counts
/// as 1), then the axis with fewer data units per pixel is widened around its
/// center until both ratios match.
pub fn aspect_preserving_domain(
    extent: DataRect,
    area: PlotArea,
    padding_ratio: f64,
) -> DashboardResult<DataRect> {
    let area = area.validate()?;
    if !padding_ratio.is_finite() || padding_ratio < 0.0 {
        return Err(DashboardError::InvalidData(
            "domain padding ratio must be finite and >= 0".to_owned(),
        ));
    }
    if ![extent.x_min, extent.x_max, extent.y_min, extent.y_max]
        .iter()
        .all(|value| value.is_finite())
    {
        return Err(DashboardError::InvalidData(
            "data extent must be finite".to_owned(),
        ));
    }

    let (x_start, x_end) = padded_axis(extent.x_min, extent.x_max, padding_ratio);
    let (y_start, y_end) = padded_axis(extent.y_min, extent.y_max, padding_ratio);

    let units_per_px_x = (x_end - x_start) / area.width;
    let units_per_px_y = (y_end - y_start) / area.height;
    let units_per_px = units_per_px_x.max(units_per_px_y);

    let (x_start, x_end) = widen_axis(x_start, x_end, units_per_px * area.width);
    let (y_start, y_end) = widen_axis(y_start, y_end, units_per_px * area.height);

    Ok(DataRect {
        x_min: x_start,
        x_max: x_end,
        y_min: y_start,
        y_max: y_end,
    })
}

fn padded_axis(min: f64, max: f64, padding_ratio: f64) -> (f64, f64) {
    let (min, max) = if max - min > 0.0 {
        (min, max)
    } else {
        let center = (min + max) / 2.0;
        (center - 0.5, center + 0.5)
    };
    let pad = (max - min) * padding_ratio;
    (min - pad, max + pad)
}

fn widen_axis(start: f64, end: f64, span: f64) -> (f64, f64) {
    if span <= end - start {
        return (start, end);
    }
    let center = (start + end) / 2.0;
    (center - span / 2.0, center + span / 2.0)
}

/// Untransformed data-to-screen scales of a zoomable view.
///
/// Built once per data extent / plot area change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseScales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub area: PlotArea,
}

impl BaseScales {
    /// Fits `extent` into `area` with a uniform data-per-pixel ratio.
    pub fn fit(extent: DataRect, area: PlotArea, padding_ratio: f64) -> DashboardResult<Self> {
        let domain = aspect_preserving_domain(extent, area, padding_ratio)?;
        Ok(Self {
            x: LinearScale::new(domain.x_min, domain.x_max, area.left, area.right())?,
            y: LinearScale::new(domain.y_min, domain.y_max, area.bottom(), area.top)?,
            area,
        })
    }

    #[must_use]
    pub fn project(&self, point: DataPoint) -> DataPoint {
        DataPoint::new(
            self.x.domain_to_pixel(point.x),
            self.y.domain_to_pixel(point.y),
        )
    }

    #[must_use]
    pub fn invert(&self, pixel: DataPoint) -> DataPoint {
        DataPoint::new(
            self.x.pixel_to_domain(pixel.x),
            self.y.pixel_to_domain(pixel.y),
        )
    }

    /// Full `(x, y)` domain spans.
    #[must_use]
    pub fn domain_spans(&self) -> (f64, f64) {
        (self.x.domain_span(), self.y.domain_span())
    }
}

/// Base scales composed with the current pan/zoom transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportProjection {
    pub base: BaseScales,
    pub transform: ViewportTransform,
}

impl ViewportProjection {
    #[must_use]
    pub fn project(&self, point: DataPoint) -> DataPoint {
        self.transform.apply(self.base.project(point))
    }

    #[must_use]
    pub fn invert(&self, pixel: DataPoint) -> DataPoint {
        self.base.invert(self.transform.invert(pixel))
    }
}

impl AxisScales for ViewportProjection {
    fn invert_x(&self, pixel: f64) -> f64 {
        self.base
            .x
            .pixel_to_domain((pixel - self.transform.translate_x) / self.transform.scale)
    }

    fn invert_y(&self, pixel: f64) -> f64 {
        self.base
            .y
            .pixel_to_domain((pixel - self.transform.translate_y) / self.transform.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::{BaseScales, aspect_preserving_domain};
    use crate::core::{DataPoint, DataRect, PlotArea};

    #[test]
    fn wide_area_widens_x_domain() {
        let extent = DataRect::from_corners(DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 10.0));
        let domain =
            aspect_preserving_domain(extent, PlotArea::new(0.0, 0.0, 200.0, 100.0), 0.0)
                .expect("domain");
        assert_eq!(domain.y_min, 0.0);
        assert_eq!(domain.y_max, 10.0);
        assert_eq!(domain.x_min, -5.0);
        assert_eq!(domain.x_max, 15.0);
    }

    #[test]
    fn base_scales_use_uniform_units() {
        let extent = DataRect::from_corners(DataPoint::new(-3.0, 2.0), DataPoint::new(7.0, 4.0));
        let scales =
            BaseScales::fit(extent, PlotArea::new(60.0, 60.0, 920.0, 700.0), 0.05).expect("fit");
        let origin = scales.project(DataPoint::new(0.0, 0.0));
        let unit = scales.project(DataPoint::new(1.0, 1.0));
        let px_per_unit_x = unit.x - origin.x;
        let px_per_unit_y = origin.y - unit.y;
        assert!((px_per_unit_x - px_per_unit_y).abs() <= 1e-9);
    }
}
