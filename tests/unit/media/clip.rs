use super::*;

fn clip(secs: i64, w: f64, h: f64) -> Clip {
    Clip::new("a.mov", MediaTime::from_secs(secs), Size::new(w, h), true)
}

#[test]
fn validate_rejects_degenerate_metadata() {
    assert!(clip(5, 1920.0, 1080.0).validate().is_ok());
    assert!(clip(0, 1920.0, 1080.0).validate().is_err());
    assert!(clip(-2, 1920.0, 1080.0).validate().is_err());
    assert!(clip(5, 0.0, 1080.0).validate().is_err());
    assert!(
        clip(5, 1920.0, 1080.0)
            .with_preferred_transform(Affine::scale(0.0))
            .validate()
            .is_err()
    );
}

#[test]
fn identity_orientation_keeps_natural_size() {
    let c = clip(5, 1920.0, 1080.0);
    assert_eq!(c.display_size(), Size::new(1920.0, 1080.0));
    assert_eq!(c.orientation(), Affine::IDENTITY);
}

#[test]
fn rotated_clip_reports_upright_size_at_origin() {
    // Typical portrait phone recording: 90 degree rotation plus translation by height.
    let rotate = Affine::new([0.0, 1.0, -1.0, 0.0, 1080.0, 0.0]);
    let c = clip(5, 1920.0, 1080.0).with_preferred_transform(rotate);
    let size = c.display_size();
    assert!((size.width - 1080.0).abs() < 1e-9);
    assert!((size.height - 1920.0).abs() < 1e-9);

    let bounds = c
        .orientation()
        .transform_rect_bbox(Rect::from_origin_size((0.0, 0.0), c.natural_size));
    assert!(bounds.x0.abs() < 1e-9);
    assert!(bounds.y0.abs() < 1e-9);
}

#[test]
fn clip_json_defaults_orientation_and_audio() {
    let json = r#"{
        "source": "clips/a.mov",
        "duration": { "value": 600, "timescale": 600 },
        "natural_size": { "width": 1280.0, "height": 720.0 }
    }"#;
    let c: Clip = serde_json::from_str(json).unwrap();
    assert_eq!(c.duration, MediaTime::from_secs(1));
    assert!(!c.has_audio);
    assert_eq!(c.preferred_transform, Affine::IDENTITY);
}

#[test]
fn rotation_transform_lands_upright_at_origin() {
    let natural = Size::new(1920.0, 1080.0);
    for (deg, upright) in [
        (0, Size::new(1920.0, 1080.0)),
        (90, Size::new(1080.0, 1920.0)),
        (180, Size::new(1920.0, 1080.0)),
        (-90, Size::new(1080.0, 1920.0)),
    ] {
        let a = rotation_transform(deg, natural).unwrap();
        let bounds = a.transform_rect_bbox(Rect::from_origin_size((0.0, 0.0), natural));
        assert!(bounds.x0.abs() < 1e-9 && bounds.y0.abs() < 1e-9, "{deg}");
        assert!((bounds.width() - upright.width).abs() < 1e-9, "{deg}");
        assert!((bounds.height() - upright.height).abs() < 1e-9, "{deg}");
    }
    assert!(rotation_transform(45, natural).is_err());
}
