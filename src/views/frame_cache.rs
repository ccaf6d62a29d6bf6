use crate::render::RenderFrame;

/// Previous-frame memory of one view.
///
/// A frame equal to the last submitted one is swallowed so the renderer is
/// only called for real visual changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameCache {
    previous: Option<RenderFrame>,
}

impl FrameCache {
    /// Stores `frame` and returns it when it differs from the previous one.
    pub fn submit(&mut self, frame: RenderFrame) -> Option<&RenderFrame> {
        if self.previous.as_ref() == Some(&frame) {
            return None;
        }
        self.previous = Some(frame);
        self.previous.as_ref()
    }

    #[must_use]
    pub fn previous(&self) -> Option<&RenderFrame> {
        self.previous.as_ref()
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}
