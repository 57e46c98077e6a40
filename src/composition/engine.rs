//! Mode selection and end-to-end assembly of a [`CompositionResult`].

use crate::{
    compile::composite::composite_instruction,
    compile::overlay::apply_overlay,
    compile::partition::partition_plan,
    composition::result::CompositionResult,
    foundation::core::{Size, is_drawable},
    foundation::error::{MontageError, MontageResult},
    foundation::time::{MediaTime, TimeRange},
    media::clip::Clip,
    media::inspect::MediaInspector,
    timeline::builder::{TrackSet, place_main_clips},
    timeline::placement::plan_placements,
    timeline::slot::{MediaKind, TrackSlot},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How the input clips are combined.
pub enum ComposeMode {
    /// Sequential clips joined by cross-fades.
    CrossFade,
    /// Cross-faded main timeline with a picture-in-picture overlay on top.
    CrossFadeWithPip,
    /// Exactly two clips played simultaneously, the second as a picture-in-picture.
    TwoClipPip,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Knobs shared by every mode.
pub struct ComposeOpts {
    /// Carry audio from the inputs. In two-clip mode only the picture's audio is kept.
    pub keep_audio: bool,
    /// Output frame size. Defaults to the display size of the first clip.
    pub render_size: Option<Size>,
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            keep_audio: true,
            render_size: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Clips plus everything needed to combine them.
pub struct CompositionRequest {
    /// Main clips in playback order. In two-clip mode: `[main, picture]`.
    pub clips: Vec<Clip>,
    /// Overlay clip, required by [`ComposeMode::CrossFadeWithPip`] and rejected otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Clip>,
    /// Combination mode.
    pub mode: ComposeMode,
    /// Shared options.
    #[serde(default)]
    pub opts: ComposeOpts,
}

impl CompositionRequest {
    /// Request with default options.
    pub fn new(clips: Vec<Clip>, overlay: Option<Clip>, mode: ComposeMode) -> Self {
        Self {
            clips,
            overlay,
            mode,
            opts: ComposeOpts::default(),
        }
    }

    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> MontageResult<Self> {
        serde_json::from_str(json).map_err(|e| MontageError::serde(e.to_string()))
    }

    /// Check clip metadata and the mode's input shape.
    pub fn validate(&self) -> MontageResult<()> {
        if self.clips.is_empty() {
            return Err(MontageError::EmptyInput);
        }
        match (self.mode, self.overlay.is_some()) {
            (ComposeMode::CrossFadeWithPip, false) => {
                return Err(MontageError::unsupported_mode(
                    "cross-fade-with-pip requires an overlay clip",
                ));
            }
            (ComposeMode::CrossFade | ComposeMode::TwoClipPip, true) => {
                return Err(MontageError::unsupported_mode(format!(
                    "{:?} does not take an overlay clip",
                    self.mode
                )));
            }
            _ => {}
        }
        if self.mode == ComposeMode::TwoClipPip && self.clips.len() != 2 {
            return Err(MontageError::unsupported_mode(format!(
                "two-clip-pip requires exactly 2 clips (got {})",
                self.clips.len()
            )));
        }

        for clip in self.clips.iter().chain(self.overlay.as_ref()) {
            clip.validate()?;
        }
        if let Some(size) = self.opts.render_size
            && !is_drawable(size)
        {
            return Err(MontageError::validation(format!(
                "render size must be finite and > 0 (got {}x{})",
                size.width, size.height
            )));
        }
        Ok(())
    }
}

/// Build the composition described by `request`.
#[tracing::instrument(skip(request), fields(mode = ?request.mode, clips = request.clips.len()))]
pub fn compose(request: &CompositionRequest) -> MontageResult<CompositionResult> {
    request.validate()?;
    let clips = &request.clips;
    let render_size = request
        .opts
        .render_size
        .unwrap_or_else(|| clips[0].display_size());

    let result = match (request.mode, request.overlay.as_ref()) {
        (ComposeMode::TwoClipPip, _) => {
            compose_two_clip(&clips[0], &clips[1], render_size, &request.opts)?
        }
        (mode, overlay) => compose_cross_fade(mode, clips, overlay, render_size, &request.opts)?,
    };
    result.validate()?;

    tracing::info!(
        duration = %result.duration,
        tracks = result.tracks.len(),
        instructions = result.instructions.len(),
        "composition ready"
    );
    Ok(result)
}

/// Inspect `sources` (and `overlay`) with `inspector`, then [`compose`] them.
///
/// An empty source list is rejected before any inspection happens. The first inspection
/// failure aborts the whole request.
pub fn compose_sources<S: AsRef<str>>(
    sources: &[S],
    overlay: Option<&str>,
    mode: ComposeMode,
    opts: ComposeOpts,
    inspector: &dyn MediaInspector,
) -> MontageResult<CompositionResult> {
    if sources.is_empty() {
        return Err(MontageError::EmptyInput);
    }
    let inspect = |source: &str| {
        inspector
            .inspect(source)
            .map_err(|e| MontageError::inspection(source, &e))
    };

    let clips = sources
        .iter()
        .map(|s| inspect(s.as_ref()))
        .collect::<MontageResult<Vec<_>>>()?;
    let overlay = overlay.map(inspect).transpose()?;

    compose(&CompositionRequest {
        clips,
        overlay,
        mode,
        opts,
    })
}

fn compose_cross_fade(
    mode: ComposeMode,
    clips: &[Clip],
    overlay: Option<&Clip>,
    render_size: Size,
    opts: &ComposeOpts,
) -> MontageResult<CompositionResult> {
    let plan = plan_placements(clips)?;
    let mut tracks = TrackSet::with_slots(&[TrackSlot::VideoA, TrackSlot::VideoB]);
    place_main_clips(&mut tracks, clips, &plan, opts.keep_audio)?;
    let mut instructions = partition_plan(clips, &plan, render_size)?;
    let mut duration = plan.duration;

    if let Some(overlay) = overlay {
        place_pip(&mut tracks, overlay, opts.keep_audio)?;
        instructions = apply_overlay(instructions, overlay, render_size)?;
        duration = duration.max(overlay.duration);
    }

    Ok(CompositionResult {
        mode,
        render_size,
        duration,
        tracks: tracks.into_tracks(),
        instructions,
    })
}

fn compose_two_clip(
    main: &Clip,
    picture: &Clip,
    render_size: Size,
    opts: &ComposeOpts,
) -> MontageResult<CompositionResult> {
    let mut tracks = TrackSet::default();
    tracks.place(
        TrackSlot::VideoA,
        main,
        TimeRange::new(MediaTime::ZERO, main.duration)?,
    )?;
    place_pip(&mut tracks, picture, opts.keep_audio)?;
    let instruction = composite_instruction(main, picture, render_size)?;

    Ok(CompositionResult {
        mode: ComposeMode::TwoClipPip,
        render_size,
        duration: instruction.time_range.end(),
        tracks: tracks.into_tracks(),
        instructions: vec![instruction],
    })
}

fn place_pip(tracks: &mut TrackSet, clip: &Clip, keep_audio: bool) -> MontageResult<()> {
    let range = TimeRange::new(MediaTime::ZERO, clip.duration)?;
    tracks.place(TrackSlot::pip(MediaKind::Video), clip, range)?;
    if keep_audio && clip.has_audio {
        tracks.place(TrackSlot::pip(MediaKind::Audio), clip, range)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composition/engine.rs"]
mod tests;
