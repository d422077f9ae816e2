use crate::image::ImageId;

/// Hands out image ids for one canvas.
///
/// Ids start at 1 and only ever grow; clearing the canvas does not rewind
/// the counter, so an id is never issued twice by the same generator.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&mut self) -> ImageId {
        let id = ImageId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`IdGenerator::generate`] will return.
    pub fn peek(&self) -> ImageId {
        ImageId(self.next)
    }
}
