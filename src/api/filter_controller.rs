use tracing::debug;

use crate::core::ViewKind;
use crate::error::DashboardResult;
use crate::filter::{FilterConfig, FilterEdit, visible_specimen_ids};
use crate::render::Renderer;
use crate::views::landmark_positions;

use super::{DashboardEngine, DashboardEvent, InvalidationTopic, InvalidationTopics};

impl<R: Renderer> DashboardEngine<R> {
    #[must_use]
    pub fn filter_config(&self) -> &FilterConfig {
        &self.filter
    }

    /// Applies one filter edit. Returns whether the configuration changed.
    ///
    /// A real change recomputes the visible set and re-derives the selection.
    pub fn apply_filter_edit(&mut self, edit: FilterEdit) -> DashboardResult<bool> {
        let changed = self.filter.apply(edit)?;
        if changed {
            debug!(?edit, "filter edited");
            self.refresh_visible();
        }
        Ok(changed)
    }

    /// Replaces the whole filter configuration.
    pub fn set_filter_config(&mut self, filter: FilterConfig) -> DashboardResult<bool> {
        filter.validate()?;
        if filter == self.filter {
            return Ok(false);
        }
        self.filter = filter;
        self.refresh_visible();
        Ok(true)
    }

    pub(super) fn refresh_visible(&mut self) {
        self.visible = visible_specimen_ids(&self.store, &self.filter);
        self.invalidate(InvalidationTopics::from_topic(InvalidationTopic::Filter));
        self.emit_event(DashboardEvent::FilterChanged {
            visible_len: self.visible.len(),
        });

        let brush_positions = match self.selection.brush_source() {
            Some(ViewKind::Scatter) => self.scatter.positions(&self.store, &self.visible),
            Some(ViewKind::LandmarkMap) => landmark_positions(&self.store, &self.visible),
            Some(ViewKind::GradientProfiles) | None => Vec::new(),
        };
        if self
            .selection
            .refresh_for_visible(&self.visible, brush_positions)
        {
            self.publish_selection_change();
        }
    }
}
