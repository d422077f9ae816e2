//! Clipboard paste: picking the image out of a paste event and decoding it
//! off the event path.
//!
//! Decoding is the canvas's only asynchronous step. Finished rasters are
//! posted to a [`PasteInbox`]; the canvas drains the inbox on its own
//! thread and appends one `Paste` action per raster, in arrival order.

use futures::FutureExt as _;
use futures::StreamExt as _;
use futures::channel::mpsc;

use crate::error::PasteError;
use crate::image::Raster;

/// One entry of a clipboard or drop payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardItem {
    pub mime: String,
    pub bytes: Option<Vec<u8>>,
}

impl ClipboardItem {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes: Some(bytes),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.contains("image")
    }
}

/// Image data waiting to be decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum PastePayload {
    /// Encoded file bytes (PNG, JPEG, ...)
    Encoded(Vec<u8>),
    /// Straight RGBA8 pixels, as handed out by OS clipboards
    Rgba {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
}

/// Pick the payload of a paste event.
///
/// Only the first image item is considered, even when it carries no data.
pub fn select_image_item(items: &[ClipboardItem]) -> Result<PastePayload, PasteError> {
    let item = items
        .iter()
        .find(|item| item.is_image())
        .ok_or(PasteError::NoImageItem)?;
    let bytes = item.bytes.clone().ok_or(PasteError::NoImageItem)?;
    Ok(PastePayload::Encoded(bytes))
}

/// Guess an image MIME type from a file name, for drops without one.
pub fn mime_from_file_name(name: &str) -> Option<&'static str> {
    let extension = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Read the image currently on the OS clipboard as raw RGBA.
#[cfg(not(target_arch = "wasm32"))]
pub fn read_system_clipboard() -> Result<PastePayload, PasteError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|err| PasteError::Clipboard(err.to_string()))?;
    let image = clipboard.get_image().map_err(|err| match err {
        arboard::Error::ContentNotAvailable => PasteError::NoImageItem,
        other => PasteError::Clipboard(other.to_string()),
    })?;
    Ok(PastePayload::Rgba {
        width: image.width as u32,
        height: image.height as u32,
        pixels: image.bytes.into_owned(),
    })
}

/// Browsers only hand out clipboard images through paste events.
#[cfg(target_arch = "wasm32")]
pub fn read_system_clipboard() -> Result<PastePayload, PasteError> {
    Err(PasteError::Clipboard("no synchronous clipboard on the web".to_owned()))
}

pub fn decode_image(bytes: &[u8]) -> Result<Raster, PasteError> {
    let image = ::image::load_from_memory(bytes)?;
    log::debug!("decoded pasted image: {}x{}", image.width(), image.height());
    Raster::from_dynamic(&image)
}

pub fn decode_payload(payload: PastePayload) -> Result<Raster, PasteError> {
    match payload {
        PastePayload::Encoded(bytes) => decode_image(&bytes),
        PastePayload::Rgba {
            width,
            height,
            pixels,
        } => Raster::from_rgba8(width, height, &pixels),
    }
}

/// Receiving end for decoded pastes, owned by one canvas.
#[derive(Debug)]
pub struct PasteInbox {
    sender: mpsc::UnboundedSender<Raster>,
    receiver: mpsc::UnboundedReceiver<Raster>,
}

impl Default for PasteInbox {
    fn default() -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self { sender, receiver }
    }
}

impl PasteInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(&self) -> PasteSender {
        PasteSender {
            sender: self.sender.clone(),
        }
    }

    /// Next raster that has already arrived, without waiting.
    pub fn try_recv(&mut self) -> Option<Raster> {
        self.receiver.next().now_or_never().flatten()
    }
}

/// Sending end handed to whoever decodes a paste.
#[derive(Debug, Clone)]
pub struct PasteSender {
    sender: mpsc::UnboundedSender<Raster>,
}

impl PasteSender {
    /// Decode `payload` and post the result to the inbox.
    pub async fn deliver(self, payload: PastePayload) -> Result<(), PasteError> {
        let raster = decode_payload(payload)?;
        self.sender
            .unbounded_send(raster)
            .map_err(|_| PasteError::InboxClosed)
    }

    /// Decode in the background; `on_done` runs after a successful delivery.
    ///
    /// Failures are logged and dropped.
    pub fn spawn(self, payload: PastePayload, on_done: impl FnOnce() + Send + 'static) {
        let task = async move {
            match self.deliver(payload).await {
                Ok(()) => on_done(),
                Err(err) => log::warn!("dropping pasted image: {err}"),
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || futures::executor::block_on(task));

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(task);
    }
}
