mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::{NullRenderStats, NullRenderer};
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, TextHAlign, TextPrimitive,
};

use crate::error::DashboardResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive one fully materialized `RenderFrame` per view so drawing
/// code stays isolated from filtering, selection and viewport logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> DashboardResult<()>;
}
