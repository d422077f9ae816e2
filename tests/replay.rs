use std::sync::Arc;

use egui::{Color32, Pos2, Vec2};
use slideboard::renderer::{fold_images, replay};
use slideboard::{
    Action, ActionLog, DrawCall, DrawList, ImageId, LineSegment, PastedImage, Raster, ShapeKind,
    ShapeRecord, Surface,
};

fn paste(id: u64, x: f32, y: f32) -> Action {
    let raster = Arc::new(Raster::solid(8, 8, [0, 160, 0, 255]).unwrap());
    Action::Paste {
        image: PastedImage::new(ImageId(id), raster, Pos2::new(x, y), Vec2::new(40.0, 40.0)),
    }
}

fn sample_log() -> ActionLog {
    [
        Action::Draw {
            lines: vec![
                LineSegment::new(Pos2::new(0.0, 5.0), Pos2::new(60.0, 5.0), Color32::BLACK, 2.0),
                LineSegment::new(Pos2::new(60.0, 5.0), Pos2::new(60.0, 70.0), Color32::BLACK, 2.0),
            ],
        },
        paste(1, 10.0, 10.0),
        Action::Shape {
            shape: ShapeRecord::new(
                ShapeKind::Circle,
                Pos2::new(50.0, 50.0),
                Pos2::new(70.0, 50.0),
                Color32::RED,
                3.0,
            ),
        },
        Action::Move {
            image_id: ImageId(1),
            from: Pos2::new(10.0, 10.0),
            to: Pos2::new(30.0, 20.0),
        },
        paste(2, 0.0, 0.0),
        Action::Resize {
            image_id: ImageId(2),
            from: Vec2::new(40.0, 40.0),
            to: Vec2::new(20.0, 20.0),
        },
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_replay_is_deterministic() {
    let log = sample_log();

    let mut first = DrawList::new();
    let mut second = DrawList::new();
    replay(&log, &mut first);
    replay(&log, &mut second);
    assert_eq!(first, second);

    let mut a = Surface::new(100, 100).unwrap();
    let mut b = Surface::new(100, 100).unwrap();
    replay(&log, &mut a);
    replay(&log, &mut b);
    assert_eq!(a.data(), b.data());
}

#[test]
fn test_replay_over_dirty_surface_matches_fresh_one() {
    let log = sample_log();
    let mut fresh = Surface::new(100, 100).unwrap();
    replay(&log, &mut fresh);

    let mut dirty = Surface::new(100, 100).unwrap();
    replay(&[paste(9, 50.0, 50.0)].into_iter().collect(), &mut dirty);
    replay(&log, &mut dirty);

    assert_eq!(fresh.data(), dirty.data());
}

#[test]
fn test_images_are_composited_last_in_id_order() {
    let mut list = DrawList::new();
    replay(&sample_log(), &mut list);

    let calls = list.calls();
    assert_eq!(calls.len(), 1 + 2 + 1 + 2);
    assert!(matches!(calls[3], DrawCall::Shape { .. }));
    assert_eq!(
        list.image_rects(),
        vec![
            (ImageId(1), egui::Rect::from_min_size(Pos2::new(30.0, 20.0), Vec2::new(40.0, 40.0))),
            (ImageId(2), egui::Rect::from_min_size(Pos2::ZERO, Vec2::new(20.0, 20.0))),
        ]
    );
}

#[test]
fn test_undo_is_truncation() {
    let mut log = sample_log();
    let mut expected = DrawList::new();
    let truncated: ActionLog = log.as_slice()[..log.len() - 1].iter().cloned().collect();
    replay(&truncated, &mut expected);

    log.undo_last();
    let mut actual = DrawList::new();
    replay(&log, &mut actual);

    assert_eq!(actual, expected);
    assert_eq!(fold_images(&log).get(ImageId(2)).unwrap().size, Vec2::new(40.0, 40.0));
}

#[test]
fn test_orphan_transforms_are_skipped() {
    let mut log = sample_log();
    log.append(Action::Move {
        image_id: ImageId(77),
        from: Pos2::ZERO,
        to: Pos2::new(1.0, 1.0),
    });
    log.append(Action::Resize {
        image_id: ImageId(78),
        from: Vec2::splat(1.0),
        to: Vec2::new(9.0, 9.0),
    });

    let mut with_orphans = DrawList::new();
    replay(&log, &mut with_orphans);
    let mut without = DrawList::new();
    replay(&sample_log(), &mut without);

    assert_eq!(with_orphans, without);
}
