use super::*;
use crate::compile::instruction::LayerInstruction;
use crate::foundation::time::TimeRange;

fn secs(s: i64) -> MediaTime {
    MediaTime::from_secs(s)
}

fn range(a: i64, b: i64) -> TimeRange {
    TimeRange::from_start_end(secs(a), secs(b)).unwrap()
}

fn instruction(a: i64, b: i64) -> CompositionInstruction {
    CompositionInstruction::new(range(a, b), vec![LayerInstruction::new(TrackSlot::VideoA)])
}

fn segment(slot: TrackSlot, a: i64, b: i64) -> Segment {
    Segment {
        slot,
        source: format!("{a}-{b}.mov"),
        source_range: range(0, b - a),
        timeline_range: range(a, b),
    }
}

fn result(instructions: Vec<CompositionInstruction>, segments: Vec<Segment>) -> CompositionResult {
    CompositionResult {
        mode: ComposeMode::CrossFade,
        render_size: Size::new(640.0, 360.0),
        duration: secs(6),
        tracks: vec![Track {
            slot: TrackSlot::VideoA,
            segments,
        }],
        instructions,
    }
}

#[test]
fn contiguous_result_validates() {
    let r = result(
        vec![instruction(0, 2), instruction(2, 6)],
        vec![segment(TrackSlot::VideoA, 0, 6)],
    );
    r.validate().unwrap();
}

#[test]
fn gaps_and_short_coverage_are_rejected() {
    let gap = result(vec![instruction(0, 2), instruction(3, 6)], Vec::new());
    assert!(matches!(gap.validate(), Err(MontageError::Validation(_))));

    let short = result(vec![instruction(0, 5)], Vec::new());
    assert!(matches!(short.validate(), Err(MontageError::Validation(_))));

    let none = result(Vec::new(), Vec::new());
    assert!(none.validate().is_err());
}

#[test]
fn overlapping_segments_are_a_track_conflict() {
    let r = result(
        vec![instruction(0, 6)],
        vec![segment(TrackSlot::VideoA, 0, 4), segment(TrackSlot::VideoA, 3, 6)],
    );
    assert!(matches!(r.validate(), Err(MontageError::TrackConflict(_))));
}

#[test]
fn instruction_lookup_is_half_open() {
    let r = result(vec![instruction(0, 2), instruction(2, 6)], Vec::new());
    assert_eq!(r.instruction_at(secs(0)).unwrap().time_range, range(0, 2));
    assert_eq!(
        r.instruction_at(MediaTime::from_millis(1999)).unwrap().time_range,
        range(0, 2)
    );
    assert_eq!(r.instruction_at(secs(2)).unwrap().time_range, range(2, 6));
    assert!(r.instruction_at(secs(6)).is_none());
    assert!(r.instruction_at(MediaTime::from_millis(-1)).is_none());
}

#[test]
fn segments_on_missing_slot_is_empty() {
    let r = result(vec![instruction(0, 6)], vec![segment(TrackSlot::VideoA, 0, 6)]);
    assert_eq!(r.segments_on(TrackSlot::VideoA).len(), 1);
    assert!(r.segments_on(TrackSlot::PipAudio).is_empty());
}

#[test]
fn pretty_json_round_trips() {
    let r = result(vec![instruction(0, 6)], vec![segment(TrackSlot::VideoA, 0, 6)]);
    let json = r.to_json_pretty().unwrap();
    assert!(json.contains("\"mode\": \"cross-fade\""));
    let back: CompositionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);
}
