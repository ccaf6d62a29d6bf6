use std::collections::BTreeSet;

use crate::core::{DataPoint, LinearScale, PlotArea, RecordStore, SizeRange, Specimen, SpecimenId, ViewKind};
use crate::error::DashboardResult;
use crate::render::{CirclePrimitive, RenderFrame};
use crate::selection::AxisScalePair;

use super::{FrameCache, SelectionEmphasis, ViewInput, palette};

pub const SCATTER_POINT_RADIUS: f64 = 4.0;

/// Scatter position of a specimen: globally normalized disc area against the
/// profile width `D`. Specimens without a finite profile have none.
#[must_use]
pub fn scatter_position(specimen: &Specimen, area_range: Option<SizeRange>) -> Option<DataPoint> {
    let profile = specimen.profile().filter(|profile| profile.is_finite())?;
    let x = area_range?.normalize(profile.area)?;
    Some(DataPoint::new(x, profile.d))
}

/// Normalized area vs. profile width scatter plot.
///
/// Scales span every specimen in the store so they stay put while filters
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterView {
    area: PlotArea,
    scales: Option<AxisScalePair>,
    cache: FrameCache,
}

impl ScatterView {
    pub fn new(store: &RecordStore, area: PlotArea) -> DashboardResult<Self> {
        let area = area.validate()?;
        Ok(Self {
            area,
            scales: Self::fit_scales(store, area)?,
            cache: FrameCache::default(),
        })
    }

    fn fit_scales(store: &RecordStore, area: PlotArea) -> DashboardResult<Option<AxisScalePair>> {
        let area_range = store.area_range();
        let widths = SizeRange::from_values(
            store
                .iter()
                .filter_map(|specimen| scatter_position(specimen, area_range))
                .map(|position| position.y),
        );
        let Some(widths) = widths else {
            return Ok(None);
        };
        let (y_start, y_end) = if widths.span() > 0.0 {
            (widths.min, widths.max)
        } else {
            (widths.min - 0.5, widths.max + 0.5)
        };
        Ok(Some(AxisScalePair::new(
            LinearScale::new(0.0, 1.0, area.left, area.right())?,
            LinearScale::new(y_start, y_end, area.bottom(), area.top)?,
        )))
    }

    /// Refits the scales after the store or plot area changed.
    pub fn rebuild(&mut self, store: &RecordStore, area: PlotArea) -> DashboardResult<()> {
        let area = area.validate()?;
        self.scales = Self::fit_scales(store, area)?;
        self.area = area;
        self.cache.reset();
        Ok(())
    }

    #[must_use]
    pub fn area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn scales(&self) -> Option<&AxisScalePair> {
        self.scales.as_ref()
    }

    /// Data-space positions of the visible specimens, used for brushing.
    #[must_use]
    pub fn positions<'a>(
        &self,
        store: &'a RecordStore,
        visible: &BTreeSet<SpecimenId>,
    ) -> Vec<(&'a SpecimenId, DataPoint)> {
        let area_range = store.area_range();
        store
            .iter()
            .filter(|specimen| visible.contains(specimen.id()))
            .filter_map(|specimen| {
                scatter_position(specimen, area_range).map(|position| (specimen.id(), position))
            })
            .collect()
    }

    #[must_use]
    pub fn build_frame(&self, input: ViewInput<'_>) -> RenderFrame {
        let mut frame = RenderFrame::new(ViewKind::Scatter, self.area);
        let Some(scales) = self.scales else {
            return frame;
        };
        let area_range = input.store.area_range();
        for specimen in input.visible_specimens() {
            let Some(position) = scatter_position(specimen, area_range) else {
                continue;
            };
            let emphasis = SelectionEmphasis::of(input.selection, specimen.id());
            let fill =
                palette::condition_color(specimen.condition()).with_alpha(emphasis.marker_opacity());
            let stroke = if emphasis == SelectionEmphasis::Selected {
                palette::black()
            } else {
                palette::white()
            };
            frame.circles.push(
                CirclePrimitive::new(
                    scales.project(position),
                    SCATTER_POINT_RADIUS,
                    fill,
                    specimen.id().as_str(),
                )
                .with_stroke(stroke),
            );
        }
        frame
    }

    /// Builds the frame and returns it only when it differs from the last one.
    pub fn render_frame(&mut self, input: ViewInput<'_>) -> Option<&RenderFrame> {
        let frame = self.build_frame(input);
        self.cache.submit(frame)
    }
}
