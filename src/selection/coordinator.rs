use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{DataPoint, DataRect, SpecimenId, ViewKind};

use super::{AxisScales, BrushRect, SelectionSet};

/// Where the current selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum SelectionOrigin {
    #[default]
    None,
    /// Brush retained in the data space of the view it was drawn on.
    Brush { rect: DataRect, source: ViewKind },
    /// Individually toggled points.
    Points,
}

/// Owns the highlighted-entity set and its brush/click mutators.
#[derive(Debug, Clone, Default)]
pub struct SelectionCoordinator {
    selection: SelectionSet,
    origin: SelectionOrigin,
}

impl SelectionCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub fn origin(&self) -> SelectionOrigin {
        self.origin
    }

    /// Selects every visible position inside `rect`.
    ///
    /// The screen corners are inverse-projected through `scales` and
    /// normalized per axis, so the draw direction does not matter. `None` or a
    /// non-finite rectangle clears the selection. Returns whether the published
    /// set changed.
    pub fn set_from_brush<'a, S, I>(
        &mut self,
        rect: Option<BrushRect>,
        scales: &S,
        visible_positions: I,
        source: ViewKind,
    ) -> bool
    where
        S: AxisScales + ?Sized,
        I: IntoIterator<Item = (&'a SpecimenId, DataPoint)>,
    {
        let Some(rect) = rect.filter(|rect| rect.is_finite()) else {
            return self.clear();
        };

        let data_rect = DataRect::from_corners(
            scales.screen_to_data(rect.start()),
            scales.screen_to_data(rect.end()),
        );
        self.origin = SelectionOrigin::Brush {
            rect: data_rect,
            source,
        };
        let ids = ids_inside(data_rect, visible_positions);
        trace!(count = ids.len(), ?source, "brush selection");
        self.selection.replace(ids)
    }

    /// Flips membership of one ID without touching the rest of the selection.
    pub fn toggle(&mut self, id: &SpecimenId) -> bool {
        let mut ids = self.selection.ids().clone();
        if !ids.remove(id) {
            ids.insert(id.clone());
        }
        self.origin = if ids.is_empty() {
            SelectionOrigin::None
        } else {
            SelectionOrigin::Points
        };
        self.selection.replace(ids)
    }

    pub fn clear(&mut self) -> bool {
        self.origin = SelectionOrigin::None;
        self.selection.replace(BTreeSet::new())
    }

    /// Source view of the retained brush, if the selection came from one.
    #[must_use]
    pub fn brush_source(&self) -> Option<ViewKind> {
        match self.origin {
            SelectionOrigin::Brush { source, .. } => Some(source),
            SelectionOrigin::None | SelectionOrigin::Points => None,
        }
    }

    /// Re-derives the selection after the visible set changed.
    ///
    /// A retained brush is intersected with `brush_positions` (the visible
    /// positions of the brush's source view); a click selection keeps only IDs
    /// still in `visible_ids`. Publishes only when the sorted ID set differs.
    pub fn refresh_for_visible<'a, I>(
        &mut self,
        visible_ids: &BTreeSet<SpecimenId>,
        brush_positions: I,
    ) -> bool
    where
        I: IntoIterator<Item = (&'a SpecimenId, DataPoint)>,
    {
        let ids = match self.origin {
            SelectionOrigin::None => return false,
            SelectionOrigin::Brush { rect, .. } => ids_inside(rect, brush_positions)
                .into_iter()
                .filter(|id| visible_ids.contains(id))
                .collect(),
            SelectionOrigin::Points => self
                .selection
                .ids()
                .intersection(visible_ids)
                .cloned()
                .collect(),
        };
        let changed = self.selection.replace(ids);
        if changed {
            debug!(
                count = self.selection.len(),
                revision = self.selection.revision(),
                "selection narrowed by visibility change"
            );
        }
        changed
    }
}

fn ids_inside<'a, I>(rect: DataRect, positions: I) -> BTreeSet<SpecimenId>
where
    I: IntoIterator<Item = (&'a SpecimenId, DataPoint)>,
{
    positions
        .into_iter()
        .filter(|(_, position)| rect.contains(*position))
        .map(|(id, _)| id.clone())
        .collect()
}
