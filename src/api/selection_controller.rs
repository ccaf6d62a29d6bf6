use crate::core::{DataPoint, SpecimenId, ViewKind};
use crate::error::{DashboardError, DashboardResult};
use crate::interaction::InteractionMode;
use crate::render::Renderer;
use crate::selection::BrushRect;
use crate::views::landmark_positions;

use super::{DashboardEngine, DashboardEvent};

impl<R: Renderer> DashboardEngine<R> {
    /// Starts a rectangle brush on `view` at a screen position.
    ///
    /// Any in-flight viewport animation is cancelled.
    pub fn brush_start(&mut self, view: ViewKind, anchor: DataPoint) -> DashboardResult<()> {
        validate_brush_view(view)?;
        validate_screen_point(anchor)?;
        self.viewport.interrupt_transition();
        self.interaction.on_brush_start(view, anchor);
        self.emit_event(DashboardEvent::BrushStarted { view });
        Ok(())
    }

    /// Moves the brush corner. Updates are throttled; returns whether the
    /// selection changed.
    pub fn brush_move(&mut self, cursor: DataPoint, now_seconds: f64) -> DashboardResult<bool> {
        validate_screen_point(cursor)?;
        let InteractionMode::Brushing(view) = self.interaction.mode() else {
            return Ok(false);
        };
        let Some(anchor) = self.interaction.brush_anchor() else {
            return Ok(false);
        };
        let Some(cursor) = self.interaction.on_brush_move(cursor, now_seconds) else {
            return Ok(false);
        };
        self.set_brush_selection(view, Some(brush_between(anchor, cursor)))
    }

    /// Releases the brush, applying the last throttled corner if any.
    pub fn brush_end(&mut self) -> DashboardResult<bool> {
        let Some((view, anchor, last)) = self.interaction.on_brush_end() else {
            return Ok(false);
        };
        let changed = match last {
            Some(cursor) => self.set_brush_selection(view, Some(brush_between(anchor, cursor)))?,
            None => false,
        };
        self.emit_event(DashboardEvent::BrushEnded { view });
        Ok(changed)
    }

    /// Replaces the selection with every visible point of `view` inside the
    /// screen rectangle. `None` clears the selection.
    pub fn set_brush_selection(
        &mut self,
        view: ViewKind,
        rect: Option<BrushRect>,
    ) -> DashboardResult<bool> {
        validate_brush_view(view)?;
        let changed = match view {
            ViewKind::Scatter => match self.scatter.scales() {
                Some(scales) => {
                    let positions = self.scatter.positions(&self.store, &self.visible);
                    self.selection
                        .set_from_brush(rect, scales, positions, view)
                }
                None => self.selection.clear(),
            },
            ViewKind::LandmarkMap => match self.viewport.projection() {
                Some(projection) => {
                    let positions = landmark_positions(&self.store, &self.visible);
                    self.selection
                        .set_from_brush(rect, &projection, positions, view)
                }
                None => self.selection.clear(),
            },
            ViewKind::GradientProfiles => false,
        };
        if changed {
            self.publish_selection_change();
        }
        Ok(changed)
    }

    /// Click toggle of one specimen.
    ///
    /// Hidden specimens that are not selected cannot be added.
    pub fn toggle_selection(&mut self, id: &SpecimenId) -> DashboardResult<bool> {
        if !self.store.contains(id) {
            return Err(DashboardError::UnknownSpecimen(id.to_string()));
        }
        if !self.visible.contains(id) && !self.selection.selection().contains(id) {
            return Ok(false);
        }
        let changed = self.selection.toggle(id);
        if changed {
            self.publish_selection_change();
        }
        Ok(changed)
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.publish_selection_change();
        }
        changed
    }
}

fn brush_between(anchor: DataPoint, cursor: DataPoint) -> BrushRect {
    BrushRect::new(anchor.x, anchor.y, cursor.x, cursor.y)
}

fn validate_brush_view(view: ViewKind) -> DashboardResult<()> {
    if view == ViewKind::GradientProfiles {
        return Err(DashboardError::InvalidData(
            "gradient profiles do not support brushing".to_owned(),
        ));
    }
    Ok(())
}

fn validate_screen_point(point: DataPoint) -> DashboardResult<()> {
    if !point.is_finite() {
        return Err(DashboardError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}
