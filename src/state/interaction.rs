//! Pointer interaction state of one canvas.
//!
//! Exactly one mode is active at a time, and each mode carries only the
//! data it needs:
//!
//! ```text
//!              pointer-down on empty canvas
//!        ┌──────────────────────────────────► Drawing ───────┐
//!        │                                                   │
//!        │     pointer-down on image body                    │
//!   ┌────┴─┐ ──────────────────────────────► DraggingImage ──┤ pointer-up
//!   │ Idle │                                                 │ or leave
//!   └────▲─┘ ──────────────────────────────► ResizingImage ──┤
//!        │     pointer-down on resize handle                 │
//!        └───────────────────────────────────────────────────┘
//! ```
//!
//! Moving between two non-idle modes is rejected.

use egui::{Pos2, Vec2};

use crate::error::StateTransitionError;
use crate::image::ImageId;
use crate::stroke::StrokeBuffer;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Drawing a freehand stroke or dragging out a shape from `anchor`
    Drawing { anchor: Pos2, stroke: StrokeBuffer },
    /// Moving an image; `offset` is the grab point relative to its top-left
    DraggingImage {
        image_id: ImageId,
        offset: Vec2,
        /// Whether this gesture already owns the trailing `Move` entry
        logged: bool,
    },
    /// Resizing an image from its bottom-right handle
    ResizingImage {
        image_id: ImageId,
        /// Whether this gesture already owns the trailing `Resize` entry
        logged: bool,
    },
}

impl InteractionState {
    pub fn drawing(anchor: Pos2) -> Self {
        InteractionState::Drawing {
            anchor,
            stroke: StrokeBuffer::new(anchor),
        }
    }

    pub fn dragging(image_id: ImageId, offset: Vec2) -> Self {
        InteractionState::DraggingImage {
            image_id,
            offset,
            logged: false,
        }
    }

    pub fn resizing(image_id: ImageId) -> Self {
        InteractionState::ResizingImage {
            image_id,
            logged: false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::Drawing { .. } => "Drawing",
            InteractionState::DraggingImage { .. } => "DraggingImage",
            InteractionState::ResizingImage { .. } => "ResizingImage",
        }
    }

    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &InteractionState) -> bool {
        match (self, new_state) {
            // Every gesture starts from Idle
            (InteractionState::Idle, _) => true,
            // ...and ends there
            (_, InteractionState::Idle) => true,
            _ => false,
        }
    }

    pub fn transition_to(&mut self, new_state: InteractionState) -> Result<(), StateTransitionError> {
        if !self.can_transition_to(&new_state) {
            return Err(StateTransitionError::InvalidTransition {
                from: self.name(),
                to: new_state.name(),
            });
        }
        log::debug!("interaction: {} -> {}", self.name(), new_state.name());
        *self = new_state;
        Ok(())
    }

    /// End the current gesture, returning the state it was in.
    pub fn finish(&mut self) -> InteractionState {
        std::mem::take(self)
    }

    /// Forget which log entry the current drag or resize owns, so the next
    /// pointer move starts a new entry.
    pub fn reset_coalescing(&mut self) {
        match self {
            InteractionState::DraggingImage { logged, .. }
            | InteractionState::ResizingImage { logged, .. } => *logged = false,
            InteractionState::Idle | InteractionState::Drawing { .. } => {}
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, InteractionState::Drawing { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::DraggingImage { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, InteractionState::ResizingImage { .. })
    }

    /// The image being moved or resized, if any.
    pub fn active_image(&self) -> Option<ImageId> {
        match self {
            InteractionState::DraggingImage { image_id, .. }
            | InteractionState::ResizingImage { image_id, .. } => Some(*image_id),
            InteractionState::Idle | InteractionState::Drawing { .. } => None,
        }
    }
}
