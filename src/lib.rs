//! Montage assembles timed video clips into a declarative composition.
//!
//! Given clip metadata it produces a [`CompositionResult`]: output tracks holding the clips'
//! media, plus time-disjoint instructions describing per-layer transforms and opacity. Three
//! modes are supported:
//!
//! - [`ComposeMode::CrossFade`]: clips alternate between two tracks and overlap by
//!   [`FADE_DURATION`] so each one fades into the next
//! - [`ComposeMode::CrossFadeWithPip`]: the same, with an overlay clip drawn in the lower-left
//!   quadrant
//! - [`ComposeMode::TwoClipPip`]: two clips played together, the second as an overlay
//!
//! All time arithmetic uses exact rational [`MediaTime`]. Media is never decoded here; callers
//! provide metadata directly or through a [`MediaInspector`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod compile;
pub(crate) mod composition;
pub(crate) mod media;
pub(crate) mod timeline;
pub(crate) mod transform;

pub use crate::foundation::core::{Affine, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{MontageError, MontageResult};
pub use crate::foundation::time::{MediaTime, TimeRange};

pub use crate::compile::composite::{PIP_FADE_OUT, composite_instruction};
pub use crate::compile::instruction::{
    CompositionInstruction, LayerInstruction, OpacityKey, TransformKey,
};
pub use crate::compile::overlay::apply_overlay;
pub use crate::compile::partition::partition_instructions;
pub use crate::composition::engine::{
    ComposeMode, ComposeOpts, CompositionRequest, compose, compose_sources,
};
pub use crate::composition::result::CompositionResult;
pub use crate::media::clip::{Clip, rotation_transform};
pub use crate::media::inspect::{ClipMetadata, FfprobeInspector, ManifestInspector, MediaInspector};
pub use crate::timeline::builder::{Segment, Timeline, Track, build_timeline};
pub use crate::timeline::placement::{FADE_DURATION, transitions_out};
pub use crate::timeline::slot::{MediaKind, TrackSlot};
pub use crate::transform::fit::{aspect_fit, fit_transform, pip_transform};
