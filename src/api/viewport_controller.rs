use tracing::debug;

use crate::core::{DataPoint, PlotArea, SpecimenId};
use crate::error::{DashboardError, DashboardResult};
use crate::render::Renderer;
use crate::viewport::{AutoZoomRequest, AutoZoomState, ViewportTransform};
use crate::views::landmark_cluster;

use super::{DashboardEngine, DashboardEvent, InvalidationTopic, InvalidationTopics};

impl<R: Renderer> DashboardEngine<R> {
    #[must_use]
    pub fn viewport_transform(&self) -> ViewportTransform {
        self.viewport.transform()
    }

    #[must_use]
    pub fn auto_zoom_state(&self) -> AutoZoomState {
        self.viewport.auto_zoom()
    }

    #[must_use]
    pub fn is_viewport_animating(&self) -> bool {
        self.viewport.transition().is_some()
    }

    /// Screen position of landmark `index` (1..=15) of a specimen under the
    /// current pan/zoom. `None` when the index is out of range or no landmark
    /// extent is known yet.
    pub fn project_landmark(&self, id: &SpecimenId, index: u8) -> DashboardResult<Option<DataPoint>> {
        let specimen = self
            .store
            .get(id)
            .ok_or_else(|| DashboardError::UnknownSpecimen(id.to_string()))?;
        let Some(projection) = self.viewport.projection() else {
            return Ok(None);
        };
        Ok(specimen
            .landmark(index)
            .map(|point| projection.project(point.position())))
    }

    /// Wheel zoom on the landmark map around a screen anchor.
    pub fn wheel_zoom(&mut self, anchor: DataPoint, factor: f64) -> DashboardResult<ViewportTransform> {
        let transform = self.viewport.wheel_zoom(anchor, factor)?;
        self.publish_viewport_change();
        Ok(transform)
    }

    /// Pans the landmark map by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> DashboardResult<ViewportTransform> {
        let transform = self.viewport.pan_by(dx, dy)?;
        self.publish_viewport_change();
        Ok(transform)
    }

    /// Starts a drag pan; cancels any in-flight animation.
    pub fn pan_start(&mut self, cursor: DataPoint) -> DashboardResult<()> {
        if !cursor.is_finite() {
            return Err(DashboardError::InvalidData(
                "pointer position must be finite".to_owned(),
            ));
        }
        self.viewport.interrupt_transition();
        self.interaction.on_pan_start(cursor);
        self.emit_event(DashboardEvent::PanStarted);
        Ok(())
    }

    /// Throttled drag pan. Returns whether the transform moved.
    pub fn pan_move(&mut self, cursor: DataPoint, now_seconds: f64) -> DashboardResult<bool> {
        if !cursor.is_finite() {
            return Err(DashboardError::InvalidData(
                "pointer position must be finite".to_owned(),
            ));
        }
        match self.interaction.on_pan_move(cursor, now_seconds) {
            Some((dx, dy)) => {
                self.pan_by(dx, dy)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Ends the drag pan, applying the last throttled move if any.
    pub fn pan_end(&mut self) -> DashboardResult<bool> {
        let moved = match self.interaction.on_pan_end() {
            Some((dx, dy)) => {
                self.pan_by(dx, dy)?;
                true
            }
            None => false,
        };
        self.emit_event(DashboardEvent::PanEnded);
        Ok(moved)
    }

    /// Selects the landmark letter to frame, or `None` to return to identity.
    pub fn set_auto_zoom_target(&mut self, target: Option<char>) -> DashboardResult<AutoZoomRequest> {
        let request = self.viewport.set_auto_zoom_target(target)?;
        match request {
            AutoZoomRequest::Unchanged => {}
            AutoZoomRequest::Armed(letter) => {
                debug!(%letter, "auto-zoom target armed");
                self.invalidate(InvalidationTopics::from_topic(InvalidationTopic::Viewport));
            }
            AutoZoomRequest::Reset => self.publish_viewport_change(),
        }
        Ok(request)
    }

    /// Explicit reset button: clears the target and returns to identity.
    pub fn reset_viewport(&mut self) {
        self.viewport.reset_auto_zoom();
        self.publish_viewport_change();
    }

    /// Advances viewport animations by host-supplied time. Returns whether
    /// the transform moved.
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        let was_satisfied = self.viewport.auto_zoom().is_satisfied();
        if !self.viewport.tick(delta_seconds) {
            return false;
        }
        self.publish_viewport_change();
        let auto_zoom = self.viewport.auto_zoom();
        if !was_satisfied && auto_zoom.is_satisfied() {
            if let Some(target) = auto_zoom.target() {
                self.emit_event(DashboardEvent::AutoZoomSettled { target });
            }
        }
        true
    }

    /// Resizes the landmark map; base scales are rebuilt.
    pub fn set_landmark_area(&mut self, area: PlotArea) -> DashboardResult<bool> {
        let changed = self.viewport.set_plot_area(area)?;
        if changed {
            self.config.landmark_area = area;
            self.landmark_map.reset();
            self.publish_viewport_change();
        }
        Ok(changed)
    }

    pub(super) fn apply_pending_auto_zoom(&mut self) {
        let Some(target) = self.viewport.pending_auto_zoom_target() else {
            return;
        };
        let cluster = landmark_cluster(&self.store, &self.visible, target);
        if !self.viewport.update_auto_zoom(cluster) {
            return;
        }
        self.emit_event(DashboardEvent::AutoZoomStarted { target });
        self.publish_viewport_change();
        if self.viewport.auto_zoom().is_satisfied() {
            self.emit_event(DashboardEvent::AutoZoomSettled { target });
        }
    }

    fn publish_viewport_change(&mut self) {
        self.invalidate(InvalidationTopics::from_topic(InvalidationTopic::Viewport));
        self.emit_event(DashboardEvent::ViewportChanged {
            transform: self.viewport.transform(),
        });
    }
}
