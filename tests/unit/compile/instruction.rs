use super::*;
use crate::foundation::core::Vec2;

fn secs(s: i64) -> MediaTime {
    MediaTime::from_secs(s)
}

#[test]
fn defaults_before_first_key() {
    let layer = LayerInstruction::new(TrackSlot::VideoA);
    assert_eq!(layer.transform_at(secs(3)), Affine::IDENTITY);
    assert_eq!(layer.opacity_at(secs(3)), 1.0);
}

#[test]
fn transform_keys_hold_until_replaced() {
    let a = Affine::scale(0.5);
    let b = Affine::translate(Vec2::new(10.0, 0.0));
    let layer = LayerInstruction::new(TrackSlot::VideoA)
        .with_transform_at(b, secs(4))
        .with_transform_at(a, secs(1));
    assert_eq!(layer.transforms[0].at, secs(1));
    assert_eq!(layer.transform_at(MediaTime::ZERO), Affine::IDENTITY);
    assert_eq!(layer.transform_at(secs(1)), a);
    assert_eq!(layer.transform_at(secs(3)), a);
    assert_eq!(layer.transform_at(secs(4)), b);
}

#[test]
fn opacity_set_is_a_cut() {
    let layer = LayerInstruction::new(TrackSlot::PipVideo).with_opacity_at(0.0, secs(4));
    assert_eq!(layer.opacity_at(MediaTime::from_millis(3999)), 1.0);
    assert_eq!(layer.opacity_at(secs(4)), 0.0);
    assert_eq!(layer.opacity_at(secs(60)), 0.0);
}

#[test]
fn opacity_ramp_interpolates_then_holds() {
    let range = TimeRange::new(secs(3), secs(2)).unwrap();
    let out = LayerInstruction::new(TrackSlot::VideoA).with_opacity_ramp(1.0, 0.0, range);
    let inn = LayerInstruction::new(TrackSlot::VideoB).with_opacity_ramp(0.0, 1.0, range);

    assert_eq!(out.opacity_at(secs(2)), 1.0);
    assert_eq!(out.opacity_at(secs(3)), 1.0);
    assert!((out.opacity_at(secs(4)) - 0.5).abs() < 1e-12);
    assert_eq!(out.opacity_at(secs(5)), 0.0);

    assert_eq!(inn.opacity_at(secs(3)), 0.0);
    for ms in [3000, 3500, 4200, 4999] {
        let t = MediaTime::from_millis(ms);
        assert!((out.opacity_at(t) + inn.opacity_at(t) - 1.0).abs() < 1e-12);
    }
}

#[test]
fn opacity_json_is_tagged() {
    let layer = LayerInstruction::new(TrackSlot::PipVideo)
        .with_opacity_at(0.0, secs(4))
        .with_opacity_ramp(1.0, 0.0, TimeRange::new(secs(1), secs(1)).unwrap());
    let v = serde_json::to_value(&layer).unwrap();
    assert_eq!(v["slot"], "pip_video");
    assert_eq!(v["opacity"][0]["kind"], "ramp");
    assert_eq!(v["opacity"][1]["kind"], "set");
    assert!(v.get("transforms").is_none());
}
