//! The single cursor walk over the main clip list.
//!
//! Both the timeline builder and the instruction partitioner consume the same
//! [`PlacementPlan`], so track placement and instruction boundaries cannot drift apart.
//!
//! Rules:
//! - clip `i` cross-fades into clip `i + 1` iff `duration_i > FADE_DURATION` and `i` is not last;
//!   the cursor then steps back by `FADE_DURATION` so clip `i + 1` starts inside clip `i`'s tail.
//! - a clip's placement ends at its natural end, or earlier at the start of the next clip on
//!   the same alternating slot (clip `i + 2`) / the merged end. This only bites when the clip
//!   after a fade is shorter than the fade itself; it keeps slots overlap-free and the
//!   instruction sequence gap-free.

use crate::{
    foundation::error::MontageResult,
    foundation::time::{MediaTime, TimeRange},
    media::clip::Clip,
};

/// Fixed cross-fade length between consecutive main clips.
pub const FADE_DURATION: MediaTime = MediaTime::from_secs(2);

/// `true` when the clip at `index` cross-fades into its successor.
pub fn transitions_out(clips: &[Clip], index: usize) -> bool {
    index + 1 < clips.len() && clips[index].duration > FADE_DURATION
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) index: usize,
    /// Timeline start (cursor position when the clip was reached).
    pub(crate) start: MediaTime,
    /// Exclusive timeline end after same-slot truncation.
    pub(crate) end: MediaTime,
    /// Cross-fade window shared with the previous clip.
    pub(crate) fade_in: Option<TimeRange>,
    /// Cross-fade window shared with the next clip.
    pub(crate) fade_out: Option<TimeRange>,
    /// Cursor position of the next clip (the merged end for the last clip).
    pub(crate) next_start: MediaTime,
}

impl Placement {
    pub(crate) fn timeline_range(&self) -> MontageResult<TimeRange> {
        TimeRange::from_start_end(self.start, self.end)
    }

    /// Range where this clip is the only visible main clip, if non-empty.
    pub(crate) fn solo_range(&self) -> MontageResult<Option<TimeRange>> {
        let start = self.fade_in.map_or(self.start, |r| r.end());
        let range = TimeRange::from_start_end(start, self.next_start)?;
        Ok((!range.is_empty()).then_some(range))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PlacementPlan {
    pub(crate) placements: Vec<Placement>,
    /// Merged main-timeline duration.
    pub(crate) duration: MediaTime,
}

pub(crate) fn plan_placements(clips: &[Clip]) -> MontageResult<PlacementPlan> {
    let n = clips.len();
    let mut starts = Vec::with_capacity(n + 1);
    let mut cursor = MediaTime::ZERO;
    starts.push(cursor);
    for (i, clip) in clips.iter().enumerate() {
        cursor = cursor + clip.duration;
        if transitions_out(clips, i) {
            cursor = cursor - FADE_DURATION;
        }
        starts.push(cursor);
    }

    let mut placements = Vec::with_capacity(n);
    let mut fade_in = None;
    for (i, clip) in clips.iter().enumerate() {
        let start = starts[i];
        let same_slot_next = starts[(i + 2).min(n)];
        let end = (start + clip.duration).min(same_slot_next);
        let fade_out = if transitions_out(clips, i) {
            Some(TimeRange::from_start_end(starts[i + 1], end)?)
        } else {
            None
        };

        tracing::debug!(
            index = i,
            start = %start,
            end = %end,
            fades_out = fade_out.is_some(),
            "placed clip"
        );
        placements.push(Placement {
            index: i,
            start,
            end,
            fade_in,
            fade_out,
            next_start: starts[i + 1],
        });
        fade_in = fade_out;
    }

    Ok(PlacementPlan {
        placements,
        duration: cursor,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/placement.rs"]
mod tests;
