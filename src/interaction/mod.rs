use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, ViewKind};
use crate::error::{DashboardError, DashboardResult};

/// Default minimum spacing between applied continuous gesture updates.
pub const DEFAULT_THROTTLE_INTERVAL_SECONDS: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Rectangle brush in progress on the given view.
    Brushing(ViewKind),
    Panning,
}

/// Rate limiter for continuous brush/pan updates.
///
/// Events arriving faster than the interval are held back; only the latest
/// suppressed one is kept so [`GestureThrottle::flush`] can apply the final
/// gesture state on release.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureThrottle<E> {
    interval_seconds: f64,
    last_emitted_at: Option<f64>,
    pending: Option<E>,
}

impl<E> GestureThrottle<E> {
    pub fn new(interval_seconds: f64) -> DashboardResult<Self> {
        if !interval_seconds.is_finite() || interval_seconds < 0.0 {
            return Err(DashboardError::InvalidData(
                "throttle interval must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            interval_seconds,
            last_emitted_at: None,
            pending: None,
        })
    }

    #[must_use]
    pub fn interval_seconds(&self) -> f64 {
        self.interval_seconds
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the event when it may be applied at `now_seconds`, otherwise
    /// keeps it as the pending one.
    pub fn offer(&mut self, event: E, now_seconds: f64) -> Option<E> {
        let due = match self.last_emitted_at {
            None => true,
            Some(last) => now_seconds - last >= self.interval_seconds,
        };
        if due {
            self.last_emitted_at = Some(now_seconds);
            self.pending = None;
            Some(event)
        } else {
            self.pending = Some(event);
            None
        }
    }

    /// Takes the last suppressed event and restarts the cadence.
    pub fn flush(&mut self) -> Option<E> {
        self.last_emitted_at = None;
        self.pending.take()
    }

    pub fn reset(&mut self) {
        self.last_emitted_at = None;
        self.pending = None;
    }
}

/// Gesture state shared by the brush and pan handlers of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    brush_anchor: Option<DataPoint>,
    pan_cursor: Option<DataPoint>,
    brush_throttle: GestureThrottle<DataPoint>,
    pan_throttle: GestureThrottle<DataPoint>,
}

impl InteractionState {
    pub fn new(throttle_interval_seconds: f64) -> DashboardResult<Self> {
        Ok(Self {
            mode: InteractionMode::Idle,
            brush_anchor: None,
            pan_cursor: None,
            brush_throttle: GestureThrottle::new(throttle_interval_seconds)?,
            pan_throttle: GestureThrottle::new(throttle_interval_seconds)?,
        })
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn brush_anchor(&self) -> Option<DataPoint> {
        self.brush_anchor
    }

    pub fn on_brush_start(&mut self, view: ViewKind, anchor: DataPoint) {
        self.mode = InteractionMode::Brushing(view);
        self.brush_anchor = Some(anchor);
        self.pan_cursor = None;
        self.brush_throttle.reset();
    }

    /// Throttled brush move: returns the cursor to apply, if due.
    pub fn on_brush_move(&mut self, cursor: DataPoint, now_seconds: f64) -> Option<DataPoint> {
        if !matches!(self.mode, InteractionMode::Brushing(_)) {
            return None;
        }
        self.brush_throttle.offer(cursor, now_seconds)
    }

    /// Ends the brush, returning the source view, anchor and any suppressed
    /// final cursor.
    pub fn on_brush_end(&mut self) -> Option<(ViewKind, DataPoint, Option<DataPoint>)> {
        let InteractionMode::Brushing(view) = self.mode else {
            return None;
        };
        self.mode = InteractionMode::Idle;
        let anchor = self.brush_anchor.take()?;
        Some((view, anchor, self.brush_throttle.flush()))
    }

    pub fn on_pan_start(&mut self, cursor: DataPoint) {
        self.mode = InteractionMode::Panning;
        self.brush_anchor = None;
        self.pan_cursor = Some(cursor);
        self.pan_throttle.reset();
    }

    /// Throttled pan move: returns the screen delta to apply, if due.
    pub fn on_pan_move(&mut self, cursor: DataPoint, now_seconds: f64) -> Option<(f64, f64)> {
        if self.mode != InteractionMode::Panning {
            return None;
        }
        let applied = self.pan_throttle.offer(cursor, now_seconds)?;
        self.pan_delta_to(applied)
    }

    /// Ends the pan, returning the delta of the last suppressed move.
    pub fn on_pan_end(&mut self) -> Option<(f64, f64)> {
        if self.mode != InteractionMode::Panning {
            return None;
        }
        self.mode = InteractionMode::Idle;
        let delta = self
            .pan_throttle
            .flush()
            .and_then(|cursor| self.pan_delta_to(cursor));
        self.pan_cursor = None;
        delta
    }

    fn pan_delta_to(&mut self, cursor: DataPoint) -> Option<(f64, f64)> {
        let previous = self.pan_cursor.replace(cursor)?;
        Some((cursor.x - previous.x, cursor.y - previous.y))
    }
}

#[cfg(test)]
mod tests {
    use super::{GestureThrottle, InteractionMode, InteractionState};
    use crate::core::{DataPoint, ViewKind};

    #[test]
    fn throttle_keeps_latest_suppressed_event() {
        let mut throttle = GestureThrottle::new(0.1).expect("throttle");
        assert_eq!(throttle.offer(1, 0.0), Some(1));
        assert_eq!(throttle.offer(2, 0.02), None);
        assert_eq!(throttle.offer(3, 0.05), None);
        assert_eq!(throttle.flush(), Some(3));
        assert_eq!(throttle.flush(), None);
    }

    #[test]
    fn pan_deltas_accumulate_to_final_cursor() {
        let mut state = InteractionState::new(1.0).expect("state");
        state.on_pan_start(DataPoint::new(0.0, 0.0));
        assert_eq!(state.on_pan_move(DataPoint::new(5.0, 1.0), 0.0), Some((5.0, 1.0)));
        assert_eq!(state.on_pan_move(DataPoint::new(9.0, 4.0), 0.1), None);
        assert_eq!(state.on_pan_end(), Some((4.0, 3.0)));
        assert_eq!(state.mode(), InteractionMode::Idle);
    }

    #[test]
    fn brush_end_reports_source_view() {
        let mut state = InteractionState::new(1.0).expect("state");
        state.on_brush_start(ViewKind::Scatter, DataPoint::new(1.0, 2.0));
        assert!(state.on_brush_move(DataPoint::new(3.0, 4.0), 0.0).is_some());
        assert!(state.on_brush_move(DataPoint::new(5.0, 6.0), 0.5).is_none());
        let (view, anchor, last) = state.on_brush_end().expect("brush");
        assert_eq!(view, ViewKind::Scatter);
        assert_eq!(anchor, DataPoint::new(1.0, 2.0));
        assert_eq!(last, Some(DataPoint::new(5.0, 6.0)));
    }
}
