use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, DataRect, LANDMARK_COUNT, landmark_letter};
use crate::error::{DashboardError, DashboardResult};

use super::{BaseScales, ScaleLimits, ViewportTransform};

/// Whether programmatic auto-zoom may move the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AutoZoomFlag {
    #[default]
    Enabled,
    /// A manual gesture took over; auto-zoom waits for a new target or reset.
    Disabled,
}

/// Outcome of a target change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoZoomRequest {
    /// Same target while enabled: nothing to do.
    Unchanged,
    /// A letter target is armed and waits for the next render.
    Armed(char),
    /// No target: the viewport should return to identity.
    Reset,
}

/// Auto-zoom target plus its enable flag and satisfaction marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AutoZoomState {
    target: Option<char>,
    flag: AutoZoomFlag,
    satisfied: bool,
}

impl AutoZoomState {
    #[must_use]
    pub fn target(self) -> Option<char> {
        self.target
    }

    #[must_use]
    pub fn flag(self) -> AutoZoomFlag {
        self.flag
    }

    #[must_use]
    pub fn is_satisfied(self) -> bool {
        self.satisfied
    }

    /// Selects a landmark letter (`'A'..='O'`, any case) or clears the target.
    ///
    /// Re-selecting the current target is a no-op while enabled, and re-arms
    /// it after a manual gesture disabled auto-zoom.
    pub fn set_target(&mut self, target: Option<char>) -> DashboardResult<AutoZoomRequest> {
        let target = target.map(validate_letter).transpose()?;
        if target == self.target && self.flag == AutoZoomFlag::Enabled {
            return Ok(AutoZoomRequest::Unchanged);
        }
        self.target = target;
        self.flag = AutoZoomFlag::Enabled;
        self.satisfied = false;
        Ok(match target {
            Some(letter) => AutoZoomRequest::Armed(letter),
            None => AutoZoomRequest::Reset,
        })
    }

    /// Explicit reset: clears the target and re-enables auto-zoom.
    pub fn reset(&mut self) -> AutoZoomRequest {
        self.target = None;
        self.flag = AutoZoomFlag::Enabled;
        self.satisfied = false;
        AutoZoomRequest::Reset
    }

    pub fn on_manual_gesture(&mut self) {
        self.flag = AutoZoomFlag::Disabled;
    }

    pub fn mark_satisfied(&mut self) {
        self.satisfied = true;
    }

    /// Letter that still needs framing on the next render.
    #[must_use]
    pub fn pending_target(self) -> Option<char> {
        if self.flag == AutoZoomFlag::Enabled && !self.satisfied {
            self.target
        } else {
            None
        }
    }
}

fn validate_letter(letter: char) -> DashboardResult<char> {
    let letter = letter.to_ascii_uppercase();
    let last = landmark_letter(LANDMARK_COUNT as u8);
    if !('A'..=last).contains(&letter) {
        return Err(DashboardError::InvalidData(format!(
            "auto-zoom target must be a landmark letter A..={last}, got `{letter}`"
        )));
    }
    Ok(letter)
}

/// Transform that frames every point of `cluster`.
///
/// Zero-width or zero-height clusters use a span of 1. The zoom factor is
/// `1 / max(spanX / fullX, spanY / fullY)` clamped to `[1, limits.max]`, and the
/// cluster center lands on the plot-area center. Returns `None` when the
/// cluster has no finite point.
#[must_use]
pub fn cluster_transform<I>(
    cluster: I,
    base: &BaseScales,
    limits: ScaleLimits,
) -> Option<ViewportTransform>
where
    I: IntoIterator<Item = DataPoint>,
{
    let bounds = DataRect::bounding(cluster)?;
    let span_x = if bounds.width() > 0.0 {
        bounds.width()
    } else {
        1.0
    };
    let span_y = if bounds.height() > 0.0 {
        bounds.height()
    } else {
        1.0
    };
    let (full_x, full_y) = base.domain_spans();
    let coverage = (span_x / full_x).max(span_y / full_y);
    let scale = (1.0 / coverage).clamp(1.0, limits.max.max(1.0));

    let focus = base.project(bounds.center());
    Some(ViewportTransform::centered_on(
        focus,
        base.area.center(),
        scale,
    ))
}

#[cfg(test)]
mod tests {
    use super::{AutoZoomFlag, AutoZoomRequest, AutoZoomState};

    #[test]
    fn state_machine_follows_manual_gestures() {
        let mut state = AutoZoomState::default();
        assert_eq!(state.flag(), AutoZoomFlag::Enabled);
        assert_eq!(
            state.set_target(Some('a')).expect("target"),
            AutoZoomRequest::Armed('A')
        );
        state.mark_satisfied();
        assert_eq!(
            state.set_target(Some('A')).expect("target"),
            AutoZoomRequest::Unchanged
        );
        assert_eq!(state.pending_target(), None);

        state.on_manual_gesture();
        assert_eq!(state.flag(), AutoZoomFlag::Disabled);
        assert_eq!(
            state.set_target(Some('A')).expect("target"),
            AutoZoomRequest::Armed('A')
        );
        assert_eq!(state.pending_target(), Some('A'));
    }

    #[test]
    fn unknown_letters_are_rejected() {
        let mut state = AutoZoomState::default();
        assert!(state.set_target(Some('P')).is_err());
        assert!(state.set_target(Some('1')).is_err());
        assert_eq!(state.target(), None);
    }
}
