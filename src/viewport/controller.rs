use tracing::{debug, trace};

use crate::core::{DataPoint, DataRect, PlotArea};
use crate::error::{DashboardError, DashboardResult};

use super::{
    AutoZoomRequest, AutoZoomState, BaseScales, ScaleLimits, TransitionPurpose,
    ViewportProjection, ViewportTransform, ViewportTransition, cluster_transform,
};

/// Owns the pan/zoom transform of one zoomable view together with its base
/// scales, auto-zoom state machine and in-flight animation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    limits: ScaleLimits,
    padding_ratio: f64,
    transition_seconds: f64,
    plot_area: PlotArea,
    data_extent: Option<DataRect>,
    base: Option<BaseScales>,
    transform: ViewportTransform,
    auto_zoom: AutoZoomState,
    transition: Option<ViewportTransition>,
}

impl ViewportController {
    pub fn new(
        plot_area: PlotArea,
        limits: ScaleLimits,
        padding_ratio: f64,
        transition_seconds: f64,
    ) -> DashboardResult<Self> {
        let plot_area = plot_area.validate()?;
        let limits = limits.validate()?;
        if !transition_seconds.is_finite() || transition_seconds < 0.0 {
            return Err(DashboardError::InvalidData(
                "transition duration must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            limits,
            padding_ratio,
            transition_seconds,
            plot_area,
            data_extent: None,
            base: None,
            transform: ViewportTransform::IDENTITY,
            auto_zoom: AutoZoomState::default(),
            transition: None,
        })
    }

    #[must_use]
    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    #[must_use]
    pub fn base_scales(&self) -> Option<&BaseScales> {
        self.base.as_ref()
    }

    #[must_use]
    pub fn auto_zoom(&self) -> AutoZoomState {
        self.auto_zoom
    }

    #[must_use]
    pub fn transition(&self) -> Option<ViewportTransition> {
        self.transition
    }

    /// Base scales composed with the current transform, once an extent is known.
    #[must_use]
    pub fn projection(&self) -> Option<ViewportProjection> {
        self.base.map(|base| ViewportProjection {
            base,
            transform: self.transform,
        })
    }

    /// Replaces the raw data extent. Base scales are rebuilt only on change.
    pub fn set_data_extent(&mut self, extent: Option<DataRect>) -> DashboardResult<bool> {
        if extent == self.data_extent {
            return Ok(false);
        }
        self.base = extent
            .map(|extent| BaseScales::fit(extent, self.plot_area, self.padding_ratio))
            .transpose()?;
        self.data_extent = extent;
        debug!(has_extent = extent.is_some(), "rebuilt viewport base scales");
        Ok(true)
    }

    /// Resizes the plot area. Base scales are rebuilt only on change.
    pub fn set_plot_area(&mut self, area: PlotArea) -> DashboardResult<bool> {
        let area = area.validate()?;
        if area == self.plot_area {
            return Ok(false);
        }
        self.base = self
            .data_extent
            .map(|extent| BaseScales::fit(extent, area, self.padding_ratio))
            .transpose()?;
        self.plot_area = area;
        debug!(
            width = area.width,
            height = area.height,
            "rebuilt viewport base scales for new plot area"
        );
        Ok(true)
    }

    /// Manual wheel zoom around a screen anchor. Disables auto-zoom.
    pub fn wheel_zoom(&mut self, anchor: DataPoint, factor: f64) -> DashboardResult<ViewportTransform> {
        if !anchor.is_finite() {
            return Err(DashboardError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(DashboardError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        self.take_manual_control();
        self.transform = self.transform.zoomed_about(anchor, factor, self.limits);
        trace!(scale = self.transform.scale, "wheel zoom");
        Ok(self.transform)
    }

    /// Manual pan by a screen-space delta. Disables auto-zoom.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> DashboardResult<ViewportTransform> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(DashboardError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        self.take_manual_control();
        self.transform = self.transform.panned_by(dx, dy);
        Ok(self.transform)
    }

    /// Stops any in-flight animation where it is; called when a brush or pan
    /// starts. An interrupted auto-zoom disables auto-zoom until the target is
    /// chosen again, so the next render does not restart it.
    pub fn interrupt_transition(&mut self) -> bool {
        let Some(transition) = self.transition.take() else {
            return false;
        };
        if transition.purpose() == TransitionPurpose::AutoZoom {
            self.auto_zoom.on_manual_gesture();
            debug!("auto-zoom interrupted by gesture");
        }
        true
    }

    fn take_manual_control(&mut self) {
        self.transition = None;
        self.auto_zoom.on_manual_gesture();
    }

    /// Changes the auto-zoom target; `None` animates back to identity.
    ///
    /// Arming a new letter drops an auto-zoom still running towards the
    /// previous one; the next render starts from the current transform.
    pub fn set_auto_zoom_target(&mut self, target: Option<char>) -> DashboardResult<AutoZoomRequest> {
        let request = self.auto_zoom.set_target(target)?;
        match request {
            AutoZoomRequest::Unchanged => {}
            AutoZoomRequest::Armed(_) => {
                if self
                    .transition
                    .is_some_and(|transition| transition.purpose() == TransitionPurpose::AutoZoom)
                {
                    self.transition = None;
                }
            }
            AutoZoomRequest::Reset => self.start_reset(),
        }
        Ok(request)
    }

    /// Clears the target and re-enables auto-zoom, returning to identity.
    pub fn reset_auto_zoom(&mut self) {
        self.auto_zoom.reset();
        self.start_reset();
    }

    fn start_reset(&mut self) {
        self.transition = None;
        if self.transform.is_identity() {
            return;
        }
        debug!("animating viewport back to identity");
        self.start_transition(ViewportTransform::IDENTITY, TransitionPurpose::Reset);
    }

    /// Letter whose cluster still has to be framed, unless already animating.
    #[must_use]
    pub fn pending_auto_zoom_target(&self) -> Option<char> {
        match self.transition {
            Some(transition) if transition.purpose() == TransitionPurpose::AutoZoom => None,
            _ => self.auto_zoom.pending_target(),
        }
    }

    /// Starts the auto-zoom animation towards `cluster`, the visible points of
    /// the pending target letter. With no point the target stays unsatisfied.
    pub fn update_auto_zoom<I>(&mut self, cluster: I) -> bool
    where
        I: IntoIterator<Item = DataPoint>,
    {
        let Some(letter) = self.pending_auto_zoom_target() else {
            return false;
        };
        let Some(base) = self.base else {
            return false;
        };
        let Some(target) = cluster_transform(cluster, &base, self.limits) else {
            trace!(%letter, "no visible landmarks for auto-zoom target");
            return false;
        };
        debug!(%letter, scale = target.scale, "auto-zoom to landmark cluster");
        self.start_transition(target, TransitionPurpose::AutoZoom);
        true
    }

    fn start_transition(&mut self, target: ViewportTransform, purpose: TransitionPurpose) {
        let transition =
            ViewportTransition::new(self.transform, target, self.transition_seconds, purpose);
        if transition.is_finished() {
            self.finish_transition(transition);
        } else {
            self.transition = Some(transition);
        }
    }

    fn finish_transition(&mut self, transition: ViewportTransition) {
        self.transform = transition.target();
        self.transition = None;
        if transition.purpose() == TransitionPurpose::AutoZoom {
            self.auto_zoom.mark_satisfied();
        }
    }

    /// Advances the in-flight animation. Returns whether the transform moved.
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        let Some(mut transition) = self.transition else {
            return false;
        };
        let current = transition.step(delta_seconds);
        if transition.is_finished() {
            self.finish_transition(transition);
        } else {
            self.transform = current;
            self.transition = Some(transition);
        }
        true
    }
}
