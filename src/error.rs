use thiserror::Error;

/// Why a clipboard payload did not become a pasted image.
///
/// None of these reach the user; the canvas logs them and carries on.
#[derive(Error, Debug)]
pub enum PasteError {
    #[error("clipboard payload has no image item")]
    NoImageItem,
    #[error("failed to decode image: {0}")]
    Decode(#[from] ::image::ImageError),
    #[error("decoded image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("pixel buffer does not match the image dimensions")]
    InvalidRaster,
    #[error("paste inbox was dropped before the image arrived")]
    InboxClosed,
    #[error("system clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Errors that can occur during interaction state transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateTransitionError {
    #[error("cannot transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a hex color: {value:?}")]
pub struct ColorParseError {
    pub value: String,
}
