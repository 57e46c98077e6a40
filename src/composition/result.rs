use crate::{
    compile::instruction::CompositionInstruction,
    composition::engine::ComposeMode,
    foundation::core::Size,
    foundation::error::{MontageError, MontageResult},
    foundation::time::MediaTime,
    timeline::builder::{Segment, Track},
    timeline::slot::TrackSlot,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Everything a playback or export consumer needs: tracks, instructions and output geometry.
pub struct CompositionResult {
    /// Mode the result was built in.
    pub mode: ComposeMode,
    /// Output frame size.
    pub render_size: Size,
    /// Output duration.
    pub duration: MediaTime,
    /// Output tracks and their segments.
    pub tracks: Vec<Track>,
    /// Time-disjoint instructions covering `[0, duration)` in order.
    pub instructions: Vec<CompositionInstruction>,
}

impl CompositionResult {
    /// All segments, track by track.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.tracks.iter().flat_map(|t| t.segments.iter())
    }

    /// Segments placed on `slot`, in timeline order.
    pub fn segments_on(&self, slot: TrackSlot) -> &[Segment] {
        self.tracks
            .iter()
            .find(|t| t.slot == slot)
            .map_or(&[][..], |t| t.segments.as_slice())
    }

    /// Instruction governing output time `t`, if `t` lies in `[0, duration)`.
    pub fn instruction_at(&self, t: MediaTime) -> Option<&CompositionInstruction> {
        let idx = self
            .instructions
            .partition_point(|i| i.time_range.end() <= t);
        self.instructions
            .get(idx)
            .filter(|i| i.time_range.contains(t))
    }

    /// Pretty-printed JSON for an exporter.
    pub fn to_json_pretty(&self) -> MontageResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MontageError::serde(e.to_string()))
    }

    /// Check the structural invariants of the result.
    ///
    /// Instructions must be non-empty, contiguous from zero and end exactly at `duration`.
    /// Segments must stay inside `[0, duration]` and never overlap on a track.
    pub fn validate(&self) -> MontageResult<()> {
        if !crate::foundation::core::is_drawable(self.render_size) {
            return Err(MontageError::validation(format!(
                "render size must be finite and > 0 (got {}x{})",
                self.render_size.width, self.render_size.height
            )));
        }

        let mut cursor = MediaTime::ZERO;
        for instruction in &self.instructions {
            let range = instruction.time_range;
            if range.start() != cursor {
                return Err(MontageError::validation(format!(
                    "instruction {range} does not start at {cursor}"
                )));
            }
            if range.is_empty() {
                return Err(MontageError::validation(format!(
                    "empty instruction at {cursor}"
                )));
            }
            cursor = range.end();
        }
        if cursor != self.duration {
            return Err(MontageError::validation(format!(
                "instructions end at {cursor}, duration is {}",
                self.duration
            )));
        }

        for track in &self.tracks {
            for (i, a) in track.segments.iter().enumerate() {
                if a.slot != track.slot {
                    return Err(MontageError::track_conflict(format!(
                        "segment for {:?} on {:?} track",
                        a.slot, track.slot
                    )));
                }
                if a.timeline_range.end() > self.duration {
                    return Err(MontageError::validation(format!(
                        "'{}' at {} runs past {}",
                        a.source, a.timeline_range, self.duration
                    )));
                }
                if let Some(b) = track.segments[i + 1..]
                    .iter()
                    .find(|b| a.timeline_range.overlaps(b.timeline_range))
                {
                    return Err(MontageError::track_conflict(format!(
                        "'{}' at {} overlaps '{}' at {} on {:?}",
                        a.source, a.timeline_range, b.source, b.timeline_range, track.slot
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/result.rs"]
mod tests;
