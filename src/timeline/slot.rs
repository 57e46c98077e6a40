#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Media kind carried by a track slot.
pub enum MediaKind {
    /// Picture track.
    Video,
    /// Sound track.
    Audio,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Logical output track.
///
/// Main-timeline clips alternate between the `A` and `B` slots of each media kind, so a clip
/// and its neighbour (which overlap during a cross-fade) never share a track.
pub enum TrackSlot {
    /// Main video, even clip indices.
    VideoA,
    /// Main video, odd clip indices.
    VideoB,
    /// Main audio, even clip indices.
    AudioA,
    /// Main audio, odd clip indices.
    AudioB,
    /// Picture-in-picture video.
    PipVideo,
    /// Picture-in-picture audio.
    PipAudio,
}

impl TrackSlot {
    /// Alternating main slot for the clip at `index` (0-based).
    pub fn alternating(kind: MediaKind, index: usize) -> Self {
        let leading = index % 2 == 0;
        match (kind, leading) {
            (MediaKind::Video, true) => Self::VideoA,
            (MediaKind::Video, false) => Self::VideoB,
            (MediaKind::Audio, true) => Self::AudioA,
            (MediaKind::Audio, false) => Self::AudioB,
        }
    }

    /// Overlay slot for `kind`.
    pub fn pip(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Video => Self::PipVideo,
            MediaKind::Audio => Self::PipAudio,
        }
    }

    /// Media kind carried by this slot.
    pub fn kind(self) -> MediaKind {
        match self {
            Self::VideoA | Self::VideoB | Self::PipVideo => MediaKind::Video,
            Self::AudioA | Self::AudioB | Self::PipAudio => MediaKind::Audio,
        }
    }

    /// `true` for the overlay slots.
    pub fn is_pip(self) -> bool {
        matches!(self, Self::PipVideo | Self::PipAudio)
    }
}
