use super::*;
use crate::foundation::core::Vec2;
use crate::foundation::time::{MediaTime, TimeRange};

const HD: Size = Size::new(1920.0, 1080.0);

fn clips(secs: &[i64]) -> Vec<Clip> {
    secs.iter()
        .enumerate()
        .map(|(i, &s)| Clip::new(format!("c{i}.mov"), MediaTime::from_secs(s), HD, false))
        .collect()
}

fn range(a: i64, b: i64) -> TimeRange {
    TimeRange::from_start_end(MediaTime::from_secs(a), MediaTime::from_secs(b)).unwrap()
}

fn ranges(instructions: &[CompositionInstruction]) -> Vec<TimeRange> {
    instructions.iter().map(|i| i.time_range).collect()
}

#[test]
fn empty_input_is_reported() {
    assert!(matches!(
        partition_instructions(&[], HD),
        Err(MontageError::EmptyInput)
    ));
}

#[test]
fn single_clip_is_one_solo_instruction() {
    let out = partition_instructions(&clips(&[4]), HD).unwrap();
    assert_eq!(ranges(&out), [range(0, 4)]);
    let layer = &out[0].layers[0];
    assert_eq!(layer.slot, TrackSlot::VideoA);
    assert_eq!(layer.transform_at(MediaTime::ZERO), Affine::IDENTITY);
    assert!(layer.opacity.is_empty());
}

#[test]
fn two_clips_solo_transition_solo() {
    let out = partition_instructions(&clips(&[3, 3]), HD).unwrap();
    assert_eq!(ranges(&out), [range(0, 1), range(1, 3), range(3, 4)]);

    let fade = &out[1];
    assert_eq!(fade.layers.len(), 2);
    let incoming = fade.layer(TrackSlot::VideoB).unwrap();
    let outgoing = fade.layer(TrackSlot::VideoA).unwrap();
    assert_eq!(fade.layers.last().unwrap().slot, TrackSlot::VideoA);

    let mid = MediaTime::from_secs(2);
    assert!((outgoing.opacity_at(mid) - 0.5).abs() < 1e-12);
    assert!((incoming.opacity_at(mid) - 0.5).abs() < 1e-12);
    assert_eq!(outgoing.opacity_at(MediaTime::from_secs(1)), 1.0);
    assert_eq!(incoming.opacity_at(MediaTime::from_secs(1)), 0.0);

    assert_eq!(out[2].layers[0].slot, TrackSlot::VideoB);
    assert_eq!(
        out[2].layers[0].transforms[0].at,
        MediaTime::from_secs(3)
    );
}

#[test]
fn short_clip_regression_anchor() {
    let out = partition_instructions(&clips(&[5, 1, 5]), HD).unwrap();
    assert_eq!(ranges(&out), [range(0, 3), range(3, 4), range(4, 9)]);
    assert_eq!(out[2].layers[0].slot, TrackSlot::VideoA);
}

#[test]
fn instructions_tile_the_timeline() {
    let cases: &[&[i64]] = &[&[1], &[2, 2], &[5, 5, 5], &[5, 3, 5], &[10, 1, 1, 10], &[3, 2, 3, 9]];
    for &durations in cases {
        let input = clips(durations);
        let plan = plan_placements(&input).unwrap();
        let out = partition_instructions(&input, HD).unwrap();
        assert_eq!(out[0].time_range.start(), MediaTime::ZERO, "{durations:?}");
        for pair in out.windows(2) {
            assert_eq!(pair[0].time_range.end(), pair[1].time_range.start(), "{durations:?}");
        }
        assert_eq!(out.last().unwrap().time_range.end(), plan.duration, "{durations:?}");
        assert!(out.iter().all(|i| !i.time_range.is_empty()));
    }
}

#[test]
fn main_layers_fit_into_render_size() {
    let portrait = Clip::new("p.mov", MediaTime::from_secs(4), Size::new(1080.0, 1920.0), false);
    let out = partition_instructions(&[portrait], HD).unwrap();
    let t = out[0].layers[0].transform_at(MediaTime::ZERO);
    let scale = 1080.0 / 1920.0;
    let expected = Affine::translate(Vec2::new((1920.0 - 1080.0 * scale) / 2.0, 0.0))
        * Affine::scale(scale);
    for (a, b) in t.as_coeffs().iter().zip(expected.as_coeffs()) {
        assert!((a - b).abs() < 1e-9);
    }
}
