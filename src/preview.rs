use crate::action::ActionLog;
use crate::renderer::{self, DrawTarget, ImageState};
use crate::shape::ShapeRecord;
use crate::surface::Surface;

/// Live preview for a shape that is still being dragged out.
///
/// The candidate shape is drawn into an offscreen buffer the size of the
/// visible surface, then laid over a fresh replay of the committed log. The
/// candidate never touches the log.
#[derive(Debug, Clone)]
pub struct PreviewCompositor {
    buffer: Surface,
}

impl PreviewCompositor {
    pub fn new(buffer: Surface) -> Self {
        Self { buffer }
    }

    pub fn buffer(&self) -> &Surface {
        &self.buffer
    }

    /// Show `candidate` on top of the committed picture.
    pub fn show(&mut self, candidate: &ShapeRecord, log: &ActionLog, visible: &mut Surface) -> ImageState {
        self.buffer.clear();
        renderer::draw_shape(&mut self.buffer, candidate);

        let images = renderer::replay(log, visible);
        visible.composite(&self.buffer);
        images
    }
}
