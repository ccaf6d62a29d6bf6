use serde::{Deserialize, Serialize};

use crate::core::ViewKind;
use crate::filter::NormalizationMode;
use crate::interaction::InteractionMode;
use crate::viewport::{AutoZoomState, ViewportTransform};

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardContext {
    pub specimens_len: usize,
    pub visible_len: usize,
    pub selected_len: usize,
    pub selection_revision: u64,
    pub normalization_mode: NormalizationMode,
    pub transform: ViewportTransform,
    pub auto_zoom: AutoZoomState,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DashboardEvent {
    DataLoaded { specimens_len: usize },
    FilterChanged { visible_len: usize },
    /// Published only when the sorted set of selected IDs actually changed.
    SelectionChanged { selected_len: usize, revision: u64 },
    ViewportChanged { transform: ViewportTransform },
    AutoZoomStarted { target: char },
    AutoZoomSettled { target: char },
    BrushStarted { view: ViewKind },
    BrushEnded { view: ViewKind },
    PanStarted,
    PanEnded,
    Rendered { frames: usize },
}

/// Hook interface for host-side reactions to dashboard changes.
///
/// Observers see events and read the engine context without mutating
/// dashboard state directly.
pub trait DashboardObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: DashboardEvent, context: DashboardContext);
}
