use tracing::debug;

use crate::core::{DataPoint, PlotArea, RecordStore, SpecimenId};
use crate::error::{DashboardError, DashboardResult};
use crate::filter::visible_specimen_ids;
use crate::render::Renderer;
use crate::views::landmark_extent;

use super::{DashboardEngine, DashboardEvent, InvalidationTopic, InvalidationTopics};

impl<R: Renderer> DashboardEngine<R> {
    /// Replaces the record store.
    ///
    /// The selection is cleared, the landmark base scales are rebuilt from
    /// the new extent and every view is redrawn. The filter and auto-zoom
    /// target are kept.
    pub fn replace_store(&mut self, store: RecordStore) -> DashboardResult<()> {
        self.viewport.set_data_extent(landmark_extent(&store))?;
        self.scatter.rebuild(&store, self.config.scatter_area)?;
        self.profiles.rebuild(&store, self.config.profiles_area)?;
        self.landmark_map.reset();
        self.store = store;
        self.visible = visible_specimen_ids(&self.store, &self.filter);
        debug!(
            specimens = self.store.len(),
            visible = self.visible.len(),
            "record store replaced"
        );

        if self.selection.clear() {
            self.publish_selection_change();
        }
        self.invalidate(InvalidationTopics::all());
        self.emit_event(DashboardEvent::DataLoaded {
            specimens_len: self.store.len(),
        });
        Ok(())
    }

    /// Attaches a raw measured profile to a specimen; it replaces the fitted
    /// curve in the profiles view. Returns whether the samples were usable.
    pub fn set_raw_profile(&mut self, id: &SpecimenId, samples: &[DataPoint]) -> DashboardResult<bool> {
        if !self.store.contains(id) {
            return Err(DashboardError::UnknownSpecimen(id.to_string()));
        }
        let stored = self
            .profiles
            .set_raw_profile(&self.store, id.clone(), samples)?;
        self.invalidate(InvalidationTopics::from_topic(InvalidationTopic::Data));
        Ok(stored)
    }

    /// Resizes the scatter plot area.
    pub fn set_scatter_area(&mut self, area: PlotArea) -> DashboardResult<()> {
        self.scatter.rebuild(&self.store, area)?;
        self.config.scatter_area = area;
        self.invalidate(InvalidationTopics::from_topic(InvalidationTopic::Data));
        Ok(())
    }

    /// Resizes the profiles plot area.
    pub fn set_profiles_area(&mut self, area: PlotArea) -> DashboardResult<()> {
        self.profiles.rebuild(&self.store, area)?;
        self.config.profiles_area = area;
        self.invalidate(InvalidationTopics::from_topic(InvalidationTopic::Data));
        Ok(())
    }
}
