use crate::{
    foundation::error::{MontageError, MontageResult},
    foundation::time::{MediaTime, TimeRange},
    media::clip::Clip,
    timeline::placement::{PlacementPlan, plan_placements},
    timeline::slot::{MediaKind, TrackSlot},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Placement of one clip's media on one output track.
pub struct Segment {
    /// Track the media is inserted into.
    pub slot: TrackSlot,
    /// Source location the media is read from.
    pub source: String,
    /// Range read from the source, starting at source time zero.
    pub source_range: TimeRange,
    /// Range occupied on the merged timeline.
    pub timeline_range: TimeRange,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One output track and the segments placed on it, in timeline order.
pub struct Track {
    /// Logical slot of this track.
    pub slot: TrackSlot,
    /// Non-overlapping segments.
    pub segments: Vec<Segment>,
}

impl Track {
    fn new(slot: TrackSlot) -> Self {
        Self {
            slot,
            segments: Vec::new(),
        }
    }

    fn insert(&mut self, segment: Segment) -> MontageResult<()> {
        if segment.slot != self.slot {
            return Err(MontageError::track_conflict(format!(
                "segment for {:?} inserted into {:?} track",
                segment.slot, self.slot
            )));
        }
        if let Some(existing) = self
            .segments
            .iter()
            .find(|s| s.timeline_range.overlaps(segment.timeline_range))
        {
            return Err(MontageError::track_conflict(format!(
                "'{}' at {} overlaps '{}' at {} on {:?}",
                segment.source,
                segment.timeline_range,
                existing.source,
                existing.timeline_range,
                self.slot
            )));
        }
        let at = self
            .segments
            .partition_point(|s| s.timeline_range.start() <= segment.timeline_range.start());
        self.segments.insert(at, segment);
        Ok(())
    }
}

/// Ordered set of output tracks, created on first use.
#[derive(Clone, Debug, Default)]
pub(crate) struct TrackSet {
    tracks: Vec<Track>,
}

impl TrackSet {
    pub(crate) fn with_slots(slots: &[TrackSlot]) -> Self {
        Self {
            tracks: slots.iter().copied().map(Track::new).collect(),
        }
    }

    pub(crate) fn insert(&mut self, segment: Segment) -> MontageResult<()> {
        let idx = match self.tracks.iter().position(|t| t.slot == segment.slot) {
            Some(idx) => idx,
            None => {
                self.tracks.push(Track::new(segment.slot));
                self.tracks.len() - 1
            }
        };
        self.tracks[idx].insert(segment)
    }

    /// Place `clip` from its source start at `timeline_range`.
    pub(crate) fn place(
        &mut self,
        slot: TrackSlot,
        clip: &Clip,
        timeline_range: TimeRange,
    ) -> MontageResult<()> {
        let source_range = TimeRange::new(MediaTime::ZERO, timeline_range.duration())?;
        self.insert(Segment {
            slot,
            source: clip.source.clone(),
            source_range,
            timeline_range,
        })
    }

    pub(crate) fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Main clips laid out on alternating tracks.
pub struct Timeline {
    /// Output tracks in creation order. Both main video tracks always exist.
    pub tracks: Vec<Track>,
    /// Merged main-timeline duration.
    pub duration: MediaTime,
}

impl Timeline {
    /// All segments, track by track.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.tracks.iter().flat_map(|t| t.segments.iter())
    }
}

/// Lay out `clips` on alternating A/B tracks with cross-fade overlaps.
///
/// Audio tracks are only created for a parity once a clip on that parity carries audio, and
/// not at all when `keep_audio` is false.
#[tracing::instrument(skip(clips), fields(clips = clips.len()))]
pub fn build_timeline(clips: &[Clip], keep_audio: bool) -> MontageResult<Timeline> {
    if clips.is_empty() {
        return Err(MontageError::EmptyInput);
    }
    for clip in clips {
        clip.validate()?;
    }
    let plan = plan_placements(clips)?;
    let mut tracks = TrackSet::with_slots(&[TrackSlot::VideoA, TrackSlot::VideoB]);
    place_main_clips(&mut tracks, clips, &plan, keep_audio)?;
    Ok(Timeline {
        tracks: tracks.into_tracks(),
        duration: plan.duration,
    })
}

pub(crate) fn place_main_clips(
    tracks: &mut TrackSet,
    clips: &[Clip],
    plan: &PlacementPlan,
    keep_audio: bool,
) -> MontageResult<()> {
    for placement in &plan.placements {
        let clip = &clips[placement.index];
        let range = placement.timeline_range()?;
        tracks.place(
            TrackSlot::alternating(MediaKind::Video, placement.index),
            clip,
            range,
        )?;
        if keep_audio && clip.has_audio {
            tracks.place(
                TrackSlot::alternating(MediaKind::Audio, placement.index),
                clip,
                range,
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
