use crate::error::{DashboardError, DashboardResult};
use crate::render::Renderer;

use super::{DashboardContext, DashboardEngine, DashboardEvent, DashboardObserver};

impl<R: Renderer> DashboardEngine<R> {
    /// Registers an observer. Ids must be non-empty and unique.
    pub fn register_observer(&mut self, observer: Box<dyn DashboardObserver>) -> DashboardResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(DashboardError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(DashboardError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    #[must_use]
    pub fn context(&self) -> DashboardContext {
        let selection = self.selection.selection();
        DashboardContext {
            specimens_len: self.store.len(),
            visible_len: self.visible.len(),
            selected_len: selection.len(),
            selection_revision: selection.revision(),
            normalization_mode: self.filter.normalization_mode(),
            transform: self.viewport.transform(),
            auto_zoom: self.viewport.auto_zoom(),
            interaction_mode: self.interaction.mode(),
        }
    }

    pub(super) fn emit_event(&mut self, event: DashboardEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.context();
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }
}
