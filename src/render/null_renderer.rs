use indexmap::IndexMap;

use crate::core::ViewKind;
use crate::error::DashboardResult;
use crate::render::{RenderFrame, Renderer};

/// Per-view counters recorded by [`NullRenderer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullRenderStats {
    pub frames: usize,
    pub circle_count: usize,
    pub polyline_count: usize,
    pub line_count: usize,
}

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    stats: IndexMap<ViewKind, NullRenderStats>,
}

impl NullRenderer {
    #[must_use]
    pub fn stats(&self, view: ViewKind) -> NullRenderStats {
        self.stats.get(&view).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn total_frames(&self) -> usize {
        self.stats.values().map(|stats| stats.frames).sum()
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashboardResult<()> {
        frame.validate()?;
        let stats = self.stats.entry(frame.view).or_default();
        stats.frames += 1;
        stats.circle_count = frame.circles.len();
        stats.polyline_count = frame.polylines.len();
        stats.line_count = frame.lines.len();
        Ok(())
    }
}
