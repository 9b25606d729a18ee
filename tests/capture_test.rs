use avatarfit::camera::FrameSource;
use avatarfit::capture::{capture_face_photo, center_crop_rect, crop_and_rotate, FaceGate};
use avatarfit::testing::{synthetic_frame, SyntheticCamera};
use avatarfit::types::FaceBox;
use avatarfit::AvatarError;
use proptest::prelude::*;

#[test]
fn test_capture_from_synthetic_camera() {
    let dir = tempfile::tempdir().unwrap();
    let mut camera = SyntheticCamera::new(1280, 720);
    let frame = camera.grab_frame().unwrap();

    let faces = [FaceBox::new(500, 200, 240, 260).with_tracking_id(1)];
    let photo = capture_face_photo(&frame, &faces, &FaceGate::default(), 0.7, dir.path()).unwrap();

    // 896x504 crop, rotated
    assert_eq!((photo.width, photo.height), (504, 896));
    assert_eq!((photo.source_width, photo.source_height), (1280, 720));

    let name = photo.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("FACE_") && name.ends_with(".png"), "{}", name);

    let saved = image::open(&photo.path).unwrap();
    assert_eq!((saved.width(), saved.height()), (504, 896));
}

#[test]
fn test_capture_refused_without_valid_face() {
    let dir = tempfile::tempdir().unwrap();
    let frame = synthetic_frame(0, 1280, 720);
    let gate = FaceGate::default();

    let too_small = [FaceBox::new(0, 0, 80, 80)];
    let err = capture_face_photo(&frame, &too_small, &gate, 0.7, dir.path()).unwrap_err();
    assert!(matches!(err, AvatarError::CaptureError(_)));

    let none: [FaceBox; 0] = [];
    assert!(capture_face_photo(&frame, &none, &gate, 0.7, dir.path()).is_err());

    // Nothing written on refusal
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_low_resolution_frame_disables_capture() {
    let gate = FaceGate::default();
    let faces = [FaceBox::new(10, 10, 150, 150)];
    assert!(!gate.capture_enabled(320, 240, &faces));
    assert!(gate.capture_enabled(480, 360, &faces));
}

#[test]
fn test_rotation_is_anticlockwise() {
    // Left column red, rest black: after a left turn red lands on the bottom row
    let frame = image::RgbImage::from_fn(10, 10, |x, _| {
        if x == 2 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 0])
        }
    });
    let rect = center_crop_rect(10, 10, 0.6).unwrap();
    assert_eq!(rect.left, 2);

    let out = crop_and_rotate(&frame, 0.6).unwrap();
    let bottom = out.height() - 1;
    for x in 0..out.width() {
        assert_eq!(out.get_pixel(x, bottom)[0], 255);
    }
    assert_eq!(out.get_pixel(0, 0)[0], 0);
}

proptest! {
    #[test]
    fn prop_rotated_crop_swaps_dimensions(w in 2u32..400, h in 2u32..400) {
        let frame = image::RgbImage::new(w, h);
        match center_crop_rect(w, h, 0.7) {
            Ok(rect) => {
                let out = crop_and_rotate(&frame, 0.7).unwrap();
                prop_assert_eq!(out.dimensions(), (rect.height, rect.width));
                prop_assert!(rect.left + rect.width <= w);
                prop_assert!(rect.top + rect.height <= h);
            }
            Err(e) => {
                let is_invalid_crop = matches!(e, AvatarError::InvalidCrop { .. });
                prop_assert!(is_invalid_crop);
            }
        }
    }
}
