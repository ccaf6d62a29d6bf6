use serde::{Deserialize, Serialize};

use super::ViewportTransform;

/// Default duration of programmatic viewport animations.
pub const DEFAULT_TRANSITION_SECONDS: f64 = 0.75;

/// Why a transition was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionPurpose {
    AutoZoom,
    Reset,
}

/// Time-stepped animation between two transforms with cubic in-out easing.
///
/// Time is advanced by the host through [`ViewportTransition::step`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransition {
    from: ViewportTransform,
    to: ViewportTransform,
    duration_seconds: f64,
    elapsed_seconds: f64,
    purpose: TransitionPurpose,
}

impl ViewportTransition {
    #[must_use]
    pub fn new(
        from: ViewportTransform,
        to: ViewportTransform,
        duration_seconds: f64,
        purpose: TransitionPurpose,
    ) -> Self {
        Self {
            from,
            to,
            duration_seconds: duration_seconds.max(0.0),
            elapsed_seconds: 0.0,
            purpose,
        }
    }

    #[must_use]
    pub fn purpose(self) -> TransitionPurpose {
        self.purpose
    }

    #[must_use]
    pub fn target(self) -> ViewportTransform {
        self.to
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        self.elapsed_seconds >= self.duration_seconds
    }

    /// Advances by `delta_seconds` and returns the transform to display.
    pub fn step(&mut self, delta_seconds: f64) -> ViewportTransform {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed_seconds += delta_seconds;
        }
        self.current()
    }

    #[must_use]
    pub fn current(self) -> ViewportTransform {
        if self.is_finished() {
            return self.to;
        }
        let progress = self.elapsed_seconds / self.duration_seconds;
        self.from.interpolate(self.to, ease_cubic_in_out(progress))
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::{TransitionPurpose, ViewportTransition};
    use crate::viewport::ViewportTransform;

    #[test]
    fn transition_reaches_target_exactly() {
        let target = ViewportTransform::new(-200.0, -100.0, 4.0);
        let mut transition = ViewportTransition::new(
            ViewportTransform::IDENTITY,
            target,
            0.5,
            TransitionPurpose::AutoZoom,
        );
        let halfway = transition.step(0.25);
        assert!((halfway.scale - 2.5).abs() <= 1e-9);
        assert!(!transition.is_finished());
        assert_eq!(transition.step(0.5), target);
        assert!(transition.is_finished());
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let transition = ViewportTransition::new(
            ViewportTransform::IDENTITY,
            ViewportTransform::new(1.0, 1.0, 2.0),
            0.0,
            TransitionPurpose::Reset,
        );
        assert!(transition.is_finished());
    }
}
