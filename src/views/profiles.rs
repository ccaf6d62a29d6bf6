use indexmap::IndexMap;
use tracing::debug;

use crate::core::{
    DataPoint, DataRect, LinearScale, PlotArea, RecordStore, Specimen, SpecimenId, ViewKind,
    normalize_raw_profile, sample_gaussian_profile,
};
use crate::error::DashboardResult;
use crate::render::{PolylinePrimitive, RenderFrame};
use crate::selection::AxisScalePair;

use super::{FrameCache, ViewInput, palette};

const CURVE_WIDTH: f64 = 1.0;
const SELECTED_CURVE_WIDTH: f64 = 2.0;

/// Gradient-profile line chart.
///
/// Curves come from the fitted Gaussian parameters unless a raw measured
/// profile was attached for the specimen, which then takes precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilesView {
    area: PlotArea,
    raw_curves: IndexMap<SpecimenId, Vec<DataPoint>>,
    scales: Option<AxisScalePair>,
    cache: FrameCache,
}

impl ProfilesView {
    pub fn new(store: &RecordStore, area: PlotArea) -> DashboardResult<Self> {
        let area = area.validate()?;
        let raw_curves = IndexMap::new();
        Ok(Self {
            area,
            scales: Self::fit_scales(store, &raw_curves, area)?,
            raw_curves,
            cache: FrameCache::default(),
        })
    }

    #[must_use]
    pub fn area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn scales(&self) -> Option<&AxisScalePair> {
        self.scales.as_ref()
    }

    /// Attaches a raw `(distance, intensity)` profile, normalized by its max.
    ///
    /// Returns whether a usable curve was stored; unusable input removes any
    /// previous raw curve so the fitted one is shown again.
    pub fn set_raw_profile(
        &mut self,
        store: &RecordStore,
        id: SpecimenId,
        samples: &[DataPoint],
    ) -> DashboardResult<bool> {
        let curve = normalize_raw_profile(samples);
        let stored = !curve.is_empty();
        if stored {
            self.raw_curves.insert(id, curve);
        } else {
            debug!(id = %id, "raw profile has no usable samples");
            self.raw_curves.shift_remove(&id);
        }
        self.rebuild(store, self.area)?;
        Ok(stored)
    }

    fn curve_for(raw_curves: &IndexMap<SpecimenId, Vec<DataPoint>>, specimen: &Specimen) -> Vec<DataPoint> {
        if let Some(curve) = raw_curves.get(specimen.id()) {
            return curve.clone();
        }
        specimen
            .profile()
            .map(sample_gaussian_profile)
            .unwrap_or_default()
    }

    fn fit_scales(
        store: &RecordStore,
        raw_curves: &IndexMap<SpecimenId, Vec<DataPoint>>,
        area: PlotArea,
    ) -> DashboardResult<Option<AxisScalePair>> {
        let bounds = DataRect::bounding(
            store
                .iter()
                .flat_map(|specimen| Self::curve_for(raw_curves, specimen)),
        );
        let Some(bounds) = bounds else {
            return Ok(None);
        };
        let (x_start, x_end) = if bounds.width() > 0.0 {
            (bounds.x_min, bounds.x_max)
        } else {
            (bounds.x_min - 0.5, bounds.x_max + 0.5)
        };
        Ok(Some(AxisScalePair::new(
            LinearScale::new(x_start, x_end, area.left, area.right())?,
            LinearScale::new(
                bounds.y_min.min(0.0),
                bounds.y_max.max(1.0),
                area.bottom(),
                area.top,
            )?,
        )))
    }

    /// Refits the scales after the store, raw curves or plot area changed.
    pub fn rebuild(&mut self, store: &RecordStore, area: PlotArea) -> DashboardResult<()> {
        let area = area.validate()?;
        self.scales = Self::fit_scales(store, &self.raw_curves, area)?;
        self.area = area;
        self.cache.reset();
        Ok(())
    }

    /// Unselected curves first, faded when a selection exists; selected curves
    /// are drawn last, thicker and opaque.
    #[must_use]
    pub fn build_frame(&self, input: ViewInput<'_>) -> RenderFrame {
        let mut frame = RenderFrame::new(ViewKind::GradientProfiles, self.area);
        let Some(scales) = self.scales else {
            return frame;
        };
        let background_opacity = if input.selection.is_empty() {
            palette::CURVE_IDLE_OPACITY
        } else {
            palette::CURVE_BACKGROUND_OPACITY
        };

        let mut selected = Vec::new();
        for specimen in input.visible_specimens() {
            let curve = Self::curve_for(&self.raw_curves, specimen);
            if curve.len() < 2 {
                continue;
            }
            let pixels: Vec<DataPoint> = curve.into_iter().map(|point| scales.project(point)).collect();
            let color = palette::condition_color(specimen.condition());
            if input.selection.contains(specimen.id()) {
                selected.push(PolylinePrimitive::new(
                    pixels,
                    SELECTED_CURVE_WIDTH,
                    color.with_alpha(palette::CURVE_SELECTED_OPACITY),
                    specimen.id().as_str(),
                ));
            } else {
                frame.polylines.push(PolylinePrimitive::new(
                    pixels,
                    CURVE_WIDTH,
                    color.with_alpha(background_opacity),
                    specimen.id().as_str(),
                ));
            }
        }
        frame.polylines.extend(selected);
        frame
    }

    /// Builds the frame and returns it only when it differs from the last one.
    pub fn render_frame(&mut self, input: ViewInput<'_>) -> Option<&RenderFrame> {
        let frame = self.build_frame(input);
        self.cache.submit(frame)
    }
}
