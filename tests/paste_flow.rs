use std::io::Cursor;

use egui::{Pos2, Vec2};
use futures::executor::block_on;
use slideboard::paste::PastePayload;
use slideboard::{Action, CanvasConfig, CanvasEngine, ClipboardItem, ImageId};

fn png(width: u32, height: u32) -> Vec<u8> {
    let image = ::image::RgbaImage::from_pixel(width, height, ::image::Rgba([10, 120, 240, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ::image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn canvas() -> CanvasEngine {
    CanvasEngine::with_size(CanvasConfig::default(), 400, 300)
}

#[test]
fn test_paste_then_move_then_undo() {
    let mut canvas = canvas();
    block_on(canvas.paste_sender().deliver(PastePayload::Encoded(png(80, 40)))).unwrap();
    assert!(canvas.log().is_empty(), "nothing lands before the inbox is polled");

    assert_eq!(canvas.poll_pastes(), 1);
    let id = ImageId(1);
    let pasted = canvas.images().get(id).unwrap().clone();
    assert_eq!(pasted.size, Vec2::new(80.0, 40.0));
    assert_eq!(pasted.position, Pos2::new(160.0, 130.0));

    canvas.pointer_down(Pos2::new(170.0, 140.0));
    canvas.pointer_move(Pos2::new(200.0, 160.0));
    canvas.pointer_up(Pos2::new(200.0, 160.0));
    assert_eq!(canvas.images().get(id).unwrap().position, Pos2::new(190.0, 150.0));

    canvas.undo();
    assert_eq!(canvas.log().len(), 1);
    assert_eq!(canvas.images().get(id).unwrap().position, pasted.position);

    canvas.undo();
    assert!(canvas.images().is_empty());
    assert!(canvas.surface().unwrap().is_blank());
}

#[test]
fn test_log_follows_completion_order() {
    let mut canvas = canvas();
    let sender = canvas.paste_sender();

    let requested_first = png(30, 10);
    let requested_second = png(10, 30);

    // The later request finishes decoding first; the user keeps drawing
    block_on(sender.clone().deliver(PastePayload::Encoded(requested_second))).unwrap();
    canvas.set_tool(slideboard::Tool::Line);
    canvas.pointer_down(Pos2::new(1.0, 1.0));
    canvas.pointer_up(Pos2::new(2.0, 2.0));
    block_on(sender.deliver(PastePayload::Encoded(requested_first))).unwrap();

    assert_eq!(canvas.poll_pastes(), 2);
    let kinds: Vec<&str> = canvas.log().iter().map(Action::name).collect();
    assert_eq!(kinds, vec!["shape", "paste", "paste"]);

    let widths: Vec<(ImageId, f32)> = canvas
        .images()
        .iter()
        .map(|image| (image.id, image.size.x))
        .collect();
    assert_eq!(widths, vec![(ImageId(1), 10.0), (ImageId(2), 30.0)]);
}

#[test]
fn test_failed_decode_leaves_canvas_untouched() {
    let mut canvas = canvas();
    let result = block_on(
        canvas
            .paste_sender()
            .deliver(PastePayload::Encoded(b"definitely not a png".to_vec())),
    );
    assert!(result.is_err());
    assert_eq!(canvas.poll_pastes(), 0);
    assert!(canvas.log().is_empty());
    assert_eq!(canvas.next_image_id(), ImageId(1));
}

#[test]
fn test_rgba_payload_is_pasted() {
    let mut canvas = canvas();
    let pixels = vec![255u8; 3 * 2 * 4];
    block_on(canvas.paste_sender().deliver(PastePayload::Rgba {
        width: 3,
        height: 2,
        pixels,
    }))
    .unwrap();
    canvas.poll_pastes();
    assert_eq!(canvas.images().get(ImageId(1)).unwrap().size, Vec2::new(3.0, 2.0));
}

#[test]
fn test_paste_event_without_image_is_ignored() {
    let canvas = canvas();
    let handled = canvas.paste_items(&[ClipboardItem::new("text/html", b"<b>hi</b>".to_vec())]);
    assert!(!handled);
}

#[test]
fn test_background_paste_arrives_and_wakes() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let mut canvas = canvas();
    let woken = Arc::new(AtomicUsize::new(0));
    let counter = woken.clone();
    canvas.set_repaint_hook(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    assert!(canvas.paste_items(&[ClipboardItem::new("image/png", png(20, 20))]));

    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
    while canvas.poll_pastes() == 0 {
        assert!(std::time::Instant::now() < deadline, "paste never arrived");
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    // The hook runs after the raster is sent
    while woken.load(Ordering::SeqCst) == 0 {
        assert!(std::time::Instant::now() < deadline, "repaint hook never ran");
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    assert_eq!(canvas.log().len(), 1);
}

#[test]
fn test_large_paste_fits_half_the_viewport() {
    let mut canvas = canvas();
    block_on(canvas.paste_sender().deliver(PastePayload::Encoded(png(800, 200)))).unwrap();
    canvas.poll_pastes();
    let image = canvas.images().get(ImageId(1)).unwrap();
    // min(200/800, 150/200, 1) = 0.25
    assert_eq!(image.size, Vec2::new(200.0, 50.0));
    assert_eq!(image.position, Pos2::new(100.0, 125.0));
}
