use std::collections::BTreeSet;

use crate::core::{
    DataPoint, DataRect, LANDMARK_CONNECTIONS, PlotArea, RecordStore, SpecimenId, ViewKind,
};
use crate::render::{CirclePrimitive, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};
use crate::viewport::ViewportProjection;

use super::{FrameCache, SelectionEmphasis, ViewInput, palette};

pub const LANDMARK_POINT_RADIUS: f64 = 6.0;

const SKELETON_WIDTH: f64 = 2.0;
const SKELETON_OPACITY: f64 = 0.7;
const LETTER_FONT_SIZE_PX: f64 = 10.0;

/// Extent of every landmark in the store, visible or not.
#[must_use]
pub fn landmark_extent(store: &RecordStore) -> Option<DataRect> {
    DataRect::bounding(
        store
            .iter()
            .flat_map(|specimen| specimen.landmarks().iter().map(|point| point.position())),
    )
}

/// Data-space landmark positions of the visible specimens, one entry per
/// landmark, used for brushing.
#[must_use]
pub fn landmark_positions<'a>(
    store: &'a RecordStore,
    visible: &BTreeSet<SpecimenId>,
) -> Vec<(&'a SpecimenId, DataPoint)> {
    store
        .iter()
        .filter(|specimen| visible.contains(specimen.id()))
        .flat_map(|specimen| {
            specimen
                .landmarks()
                .iter()
                .map(move |point| (specimen.id(), point.position()))
        })
        .collect()
}

/// Visible landmarks labelled `letter`.
#[must_use]
pub fn landmark_cluster(
    store: &RecordStore,
    visible: &BTreeSet<SpecimenId>,
    letter: char,
) -> Vec<DataPoint> {
    store
        .iter()
        .filter(|specimen| visible.contains(specimen.id()))
        .flat_map(|specimen| specimen.landmarks().iter())
        .filter(|point| point.letter() == letter)
        .map(|point| point.position())
        .collect()
}

/// Zoomable landmark coordinate map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkMapView {
    cache: FrameCache,
}

impl LandmarkMapView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.cache.reset();
    }

    /// Skeletons of selected specimens below size-colored landmark markers.
    #[must_use]
    pub fn build_frame(
        &self,
        input: ViewInput<'_>,
        area: PlotArea,
        projection: Option<&ViewportProjection>,
    ) -> RenderFrame {
        let mut frame = RenderFrame::new(ViewKind::LandmarkMap, area);
        let Some(projection) = projection else {
            return frame;
        };
        let size_range = input.store.size_range();

        for specimen in input.visible_specimens() {
            if !input.selection.contains(specimen.id()) {
                continue;
            }
            let color = palette::condition_color(specimen.condition()).with_alpha(SKELETON_OPACITY);
            for &(from, to) in &LANDMARK_CONNECTIONS {
                let (Some(from), Some(to)) = (specimen.landmark(from), specimen.landmark(to)) else {
                    continue;
                };
                let from = projection.project(from.position());
                let to = projection.project(to.position());
                if !from.is_finite() || !to.is_finite() {
                    continue;
                }
                frame.lines.push(LinePrimitive::new(
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    SKELETON_WIDTH,
                    color,
                ));
            }
        }

        for specimen in input.visible_specimens() {
            let emphasis = SelectionEmphasis::of(input.selection, specimen.id());
            let opacity = emphasis.marker_opacity();
            let normalized = size_range
                .and_then(|range| range.normalize(specimen.centroid_size()))
                .unwrap_or(0.5);
            let fill = palette::gradient_color(specimen.condition(), normalized).with_alpha(opacity);
            let stroke = if emphasis == SelectionEmphasis::Selected {
                palette::black()
            } else {
                palette::white()
            };
            for point in specimen.landmarks() {
                let center = projection.project(point.position());
                if !center.is_finite() {
                    continue;
                }
                frame.circles.push(
                    CirclePrimitive::new(
                        center,
                        LANDMARK_POINT_RADIUS,
                        fill,
                        format!("{}:{}", specimen.id(), point.letter()),
                    )
                    .with_stroke(stroke.with_alpha(opacity)),
                );
                frame.texts.push(TextPrimitive::new(
                    point.letter().to_string(),
                    center.x,
                    center.y,
                    LETTER_FONT_SIZE_PX,
                    palette::white().with_alpha(opacity),
                    TextHAlign::Center,
                ));
            }
        }
        frame
    }

    /// Builds the frame and returns it only when it differs from the last one.
    pub fn render_frame(
        &mut self,
        input: ViewInput<'_>,
        area: PlotArea,
        projection: Option<&ViewportProjection>,
    ) -> Option<&RenderFrame> {
        let frame = self.build_frame(input, area, projection);
        self.cache.submit(frame)
    }
}
