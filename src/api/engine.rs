use std::collections::BTreeSet;

use tracing::debug;

use crate::core::{RecordStore, SpecimenId};
use crate::error::DashboardResult;
use crate::filter::{FilterConfig, visible_specimen_ids};
use crate::interaction::{InteractionMode, InteractionState};
use crate::render::Renderer;
use crate::selection::{SelectionCoordinator, SelectionOrigin, SelectionSet};
use crate::viewport::ViewportController;
use crate::views::{LandmarkMapView, ProfilesView, ScatterView, landmark_extent};

use super::{
    DashboardConfig, DashboardEvent, DashboardObserver, InvalidationTopic, InvalidationTopics,
};

/// Main orchestration facade consumed by host applications.
///
/// `DashboardEngine` owns the record store, the filter, the shared selection,
/// the landmark-map viewport and the per-view frame state, and drives the
/// renderer. All mutation goes through its methods.
pub struct DashboardEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: DashboardConfig,
    pub(super) store: RecordStore,
    pub(super) filter: FilterConfig,
    pub(super) visible: BTreeSet<SpecimenId>,
    pub(super) selection: SelectionCoordinator,
    pub(super) viewport: ViewportController,
    pub(super) interaction: InteractionState,
    pub(super) scatter: ScatterView,
    pub(super) profiles: ProfilesView,
    pub(super) landmark_map: LandmarkMapView,
    pub(super) pending: InvalidationTopics,
    pub(super) observers: Vec<Box<dyn DashboardObserver>>,
}

impl<R: Renderer> DashboardEngine<R> {
    /// Creates a fully initialized engine over `store`.
    pub fn new(renderer: R, config: DashboardConfig, store: RecordStore) -> DashboardResult<Self> {
        config.validate()?;
        let mut viewport = ViewportController::new(
            config.landmark_area,
            config.scale_limits,
            config.domain_padding_ratio,
            config.auto_zoom_transition_seconds,
        )?;
        viewport.set_data_extent(landmark_extent(&store))?;
        let filter = config.initial_filter.clone();
        let visible = visible_specimen_ids(&store, &filter);
        debug!(
            specimens = store.len(),
            visible = visible.len(),
            "dashboard engine initialized"
        );

        Ok(Self {
            renderer,
            scatter: ScatterView::new(&store, config.scatter_area)?,
            profiles: ProfilesView::new(&store, config.profiles_area)?,
            landmark_map: LandmarkMapView::new(),
            interaction: InteractionState::new(config.gesture_throttle_seconds)?,
            config,
            store,
            filter,
            visible,
            selection: SelectionCoordinator::new(),
            viewport,
            pending: InvalidationTopics::all(),
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// IDs that pass the current filter.
    #[must_use]
    pub fn visible_ids(&self) -> &BTreeSet<SpecimenId> {
        &self.visible
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        self.selection.selection()
    }

    #[must_use]
    pub fn selection_origin(&self) -> SelectionOrigin {
        self.selection.origin()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Topics changed since the last render.
    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationTopics {
        self.pending
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn invalidate(&mut self, topics: InvalidationTopics) {
        self.pending = self.pending.union(topics);
    }

    pub(super) fn publish_selection_change(&mut self) {
        let selection = self.selection.selection();
        let event = DashboardEvent::SelectionChanged {
            selected_len: selection.len(),
            revision: selection.revision(),
        };
        self.invalidate(InvalidationTopics::from_topic(InvalidationTopic::Selection));
        self.emit_event(event);
    }
}
