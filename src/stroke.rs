use egui::{Color32, Pos2};

/// One straight piece of a freehand stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Pos2,
    pub end: Pos2,
    pub color: Color32,
    pub width: f32,
}

impl LineSegment {
    pub fn new(start: Pos2, end: Pos2, color: Color32, width: f32) -> Self {
        Self {
            start,
            end,
            color,
            width,
        }
    }
}

/// The stroke currently being drawn.
///
/// Collects segments between pointer-down and pointer-up; the cursor is the
/// end of the last segment (or the anchor before the first one).
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeBuffer {
    cursor: Pos2,
    segments: Vec<LineSegment>,
}

impl StrokeBuffer {
    pub fn new(anchor: Pos2) -> Self {
        Self {
            cursor: anchor,
            segments: Vec::new(),
        }
    }

    /// Extend the stroke to `to` and return the segment that was added.
    pub fn extend_to(&mut self, to: Pos2, color: Color32, width: f32) -> LineSegment {
        let segment = LineSegment::new(self.cursor, to, color, width);
        self.segments.push(segment);
        self.cursor = to;
        segment
    }

    pub fn cursor(&self) -> Pos2 {
        self.cursor
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Hand over the collected segments, leaving the buffer empty.
    pub fn take_segments(&mut self) -> Vec<LineSegment> {
        std::mem::take(&mut self.segments)
    }
}
