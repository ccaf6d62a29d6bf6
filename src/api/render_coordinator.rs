use tracing::trace;

use crate::core::ViewKind;
use crate::error::DashboardResult;
use crate::render::Renderer;
use crate::views::ViewInput;

use super::{DashboardEngine, DashboardEvent, InvalidationTopics};

impl<R: Renderer> DashboardEngine<R> {
    /// Rebuilds the views affected by pending changes and sends every frame
    /// that differs from its previous one to the renderer.
    ///
    /// A pending auto-zoom target is retried first, so a target whose cluster
    /// had no visible point starts animating once points become visible.
    /// Returns the number of frames handed to the renderer.
    pub fn render(&mut self) -> DashboardResult<usize> {
        self.apply_pending_auto_zoom();

        let pending = self.pending;
        if pending.is_none() {
            return Ok(0);
        }
        self.pending = InvalidationTopics::none();

        let input = ViewInput {
            store: &self.store,
            visible: &self.visible,
            selection: self.selection.selection(),
        };
        let mut frames = 0;
        for view in ViewKind::ALL {
            if !pending.intersects(InvalidationTopics::dependencies_of(view)) {
                continue;
            }
            let frame = match view {
                ViewKind::Scatter => self.scatter.render_frame(input),
                ViewKind::GradientProfiles => self.profiles.render_frame(input),
                ViewKind::LandmarkMap => {
                    let projection = self.viewport.projection();
                    self.landmark_map.render_frame(
                        input,
                        self.viewport.plot_area(),
                        projection.as_ref(),
                    )
                }
            };
            match frame {
                Some(frame) => {
                    self.renderer.render(frame)?;
                    frames += 1;
                }
                None => trace!(?view, "frame unchanged, skipped"),
            }
        }

        self.emit_event(DashboardEvent::Rendered { frames });
        Ok(frames)
    }
}
