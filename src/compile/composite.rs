use crate::{
    compile::instruction::{CompositionInstruction, LayerInstruction},
    compile::overlay::pip_layer,
    compile::partition::main_layer_transform,
    foundation::core::{Rgba8, Size},
    foundation::error::MontageResult,
    foundation::time::{MediaTime, TimeRange},
    media::clip::Clip,
    timeline::slot::TrackSlot,
};

/// Fade-out length for the picture in two-clip mode.
pub const PIP_FADE_OUT: MediaTime = MediaTime::from_secs(1);

/// Single instruction rendering `picture` over `main` for the length of the longer clip.
///
/// The main clip fills the frame and is cut at its end; the picture sits in the lower-left
/// quadrant and fades out over its final [`PIP_FADE_OUT`] (or is cut, when not longer than
/// that). Empty areas are filled black.
pub fn composite_instruction(
    main: &Clip,
    picture: &Clip,
    render_size: Size,
) -> MontageResult<CompositionInstruction> {
    let duration = main.duration.max(picture.duration);
    let main_layer = LayerInstruction::new(TrackSlot::VideoA)
        .with_transform_at(main_layer_transform(main, render_size), MediaTime::ZERO)
        .with_opacity_at(0.0, main.duration);

    let picture_layer = pip_layer(picture, render_size);
    let picture_layer = if picture.duration > PIP_FADE_OUT {
        let fade = TimeRange::from_start_end(picture.duration - PIP_FADE_OUT, picture.duration)?;
        picture_layer.with_opacity_ramp(1.0, 0.0, fade)
    } else {
        picture_layer.with_opacity_at(0.0, picture.duration)
    };

    Ok(CompositionInstruction {
        time_range: TimeRange::new(MediaTime::ZERO, duration)?,
        background: Some(Rgba8::BLACK),
        layers: vec![main_layer, picture_layer],
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/composite.rs"]
mod tests;
