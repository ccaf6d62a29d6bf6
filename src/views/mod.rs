//! Per-view frame builders.
//!
//! Each view turns the visible and selected specimens into a backend-agnostic
//! [`RenderFrame`](crate::render::RenderFrame) and keeps the previous frame so
//! unchanged output is never re-sent to the renderer.

mod frame_cache;
mod landmark_map;
pub mod palette;
mod profiles;
mod scatter;

pub use frame_cache::FrameCache;
pub use landmark_map::{
    LANDMARK_POINT_RADIUS, LandmarkMapView, landmark_cluster, landmark_extent, landmark_positions,
};
pub use profiles::ProfilesView;
pub use scatter::{SCATTER_POINT_RADIUS, ScatterView, scatter_position};

use std::collections::BTreeSet;

use crate::core::{RecordStore, Specimen, SpecimenId};
use crate::selection::SelectionSet;

/// How one specimen is emphasized relative to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEmphasis {
    /// Nothing is selected.
    Neutral,
    Selected,
    /// Something else is selected.
    Dimmed,
}

impl SelectionEmphasis {
    #[must_use]
    pub fn of(selection: &SelectionSet, id: &SpecimenId) -> Self {
        if selection.is_empty() {
            Self::Neutral
        } else if selection.contains(id) {
            Self::Selected
        } else {
            Self::Dimmed
        }
    }

    #[must_use]
    pub fn marker_opacity(self) -> f64 {
        match self {
            Self::Neutral => palette::LANDMARK_NEUTRAL_OPACITY,
            Self::Selected => palette::LANDMARK_SELECTED_OPACITY,
            Self::Dimmed => palette::LANDMARK_DIMMED_OPACITY,
        }
    }
}

/// Shared read-only input of every frame builder.
#[derive(Debug, Clone, Copy)]
pub struct ViewInput<'a> {
    pub store: &'a RecordStore,
    pub visible: &'a BTreeSet<SpecimenId>,
    pub selection: &'a SelectionSet,
}

impl<'a> ViewInput<'a> {
    /// Visible specimens in store order.
    pub fn visible_specimens(self) -> impl Iterator<Item = &'a Specimen> {
        let visible = self.visible;
        self.store
            .iter()
            .filter(move |specimen| visible.contains(specimen.id()))
    }
}
