use super::*;
use crate::compile::partition::partition_instructions;
use crate::foundation::core::{Affine, Vec2};
use crate::foundation::time::TimeRange;

const HD: Size = Size::new(1920.0, 1080.0);

fn clip(name: &str, secs: i64) -> Clip {
    Clip::new(name, MediaTime::from_secs(secs), HD, false)
}

fn main_clips(secs: &[i64]) -> Vec<Clip> {
    secs.iter()
        .enumerate()
        .map(|(i, &s)| clip(&format!("c{i}.mov"), s))
        .collect()
}

fn range(a: i64, b: i64) -> TimeRange {
    TimeRange::from_start_end(MediaTime::from_secs(a), MediaTime::from_secs(b)).unwrap()
}

fn with_overlay(main: &[i64], overlay_secs: i64) -> Vec<CompositionInstruction> {
    let base = partition_instructions(&main_clips(main), HD).unwrap();
    apply_overlay(base, &clip("pip.mov", overlay_secs), HD).unwrap()
}

fn has_pip(i: &CompositionInstruction) -> bool {
    i.layer(TrackSlot::PipVideo).is_some()
}

#[test]
fn overlay_matching_main_length_joins_every_instruction() {
    let out = with_overlay(&[3, 3], 4);
    let ranges: Vec<_> = out.iter().map(|i| i.time_range).collect();
    assert_eq!(ranges, [range(0, 1), range(1, 3), range(3, 4)]);
    for instruction in &out {
        assert_eq!(instruction.layers.last().unwrap().slot, TrackSlot::PipVideo);
    }
}

#[test]
fn overlay_layer_sits_in_lower_left_quadrant() {
    let out = with_overlay(&[3, 3], 4);
    let pip = out[0].layer(TrackSlot::PipVideo).unwrap();
    let expected = Affine::translate(Vec2::new(0.0, 540.0)) * Affine::scale(0.5);
    assert_eq!(pip.transform_at(MediaTime::from_secs(2)), expected);
    assert_eq!(pip.opacity_at(MediaTime::from_millis(3999)), 1.0);
    assert_eq!(pip.opacity_at(MediaTime::from_secs(4)), 0.0);
}

#[test]
fn short_overlay_only_joins_instructions_it_reaches() {
    let out = with_overlay(&[5, 5, 5], 4);
    let flags: Vec<_> = out.iter().map(has_pip).collect();
    assert_eq!(flags, [true, true, false, false, false]);
    assert_eq!(out.last().unwrap().time_range.end(), MediaTime::from_secs(11));
}

#[test]
fn overlay_ending_on_a_boundary_is_included() {
    let out = with_overlay(&[5, 5, 5], 5);
    let flags: Vec<_> = out.iter().map(has_pip).collect();
    assert_eq!(flags, [true, true, true, false, false]);
}

#[test]
fn longer_overlay_extends_last_instruction() {
    let out = with_overlay(&[3, 3], 6);
    let last = out.last().unwrap();
    assert_eq!(last.time_range, range(3, 6));

    let main = last.layer(TrackSlot::VideoB).unwrap();
    assert_eq!(main.opacity_at(MediaTime::from_millis(3500)), 1.0);
    assert_eq!(main.opacity_at(MediaTime::from_secs(4)), 0.0);
    let pip = last.layer(TrackSlot::PipVideo).unwrap();
    assert_eq!(pip.opacity_at(MediaTime::from_secs(5)), 1.0);
}

#[test]
fn empty_instruction_list_is_rejected() {
    assert!(matches!(
        apply_overlay(Vec::new(), &clip("pip.mov", 3), HD),
        Err(MontageError::EmptyInput)
    ));
}
