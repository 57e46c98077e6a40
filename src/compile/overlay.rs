use crate::{
    compile::instruction::{CompositionInstruction, LayerInstruction, OpacityKey},
    foundation::core::Size,
    foundation::error::{MontageError, MontageResult},
    foundation::time::MediaTime,
    media::clip::Clip,
    timeline::slot::{MediaKind, TrackSlot},
    transform::fit::pip_transform,
};

/// Layer drawing `clip` in the picture-in-picture corner from time zero.
pub(crate) fn pip_layer(clip: &Clip, render_size: Size) -> LayerInstruction {
    let transform = pip_transform(clip.display_size(), render_size) * clip.orientation();
    LayerInstruction::new(TrackSlot::pip(MediaKind::Video))
        .with_transform_at(transform, MediaTime::ZERO)
}

/// Add the picture-in-picture overlay on top of every instruction it is alive for.
///
/// An instruction receives the overlay layer when the overlay's end is at or after the
/// instruction's start. When the overlay outlives the main timeline, the last instruction is
/// extended to the overlay's end and its main layers are cut at the old end.
#[tracing::instrument(skip_all, fields(instructions = instructions.len(), overlay = %overlay.source))]
pub fn apply_overlay(
    mut instructions: Vec<CompositionInstruction>,
    overlay: &Clip,
    render_size: Size,
) -> MontageResult<Vec<CompositionInstruction>> {
    let overlay_end = overlay.duration;
    let Some(last) = instructions.last_mut() else {
        return Err(MontageError::EmptyInput);
    };

    let main_end = last.time_range.end();
    if overlay_end > main_end {
        last.time_range = last.time_range.with_end(overlay_end)?;
        for layer in &mut last.layers {
            layer.push_opacity(OpacityKey::Set {
                at: main_end,
                opacity: 0.0,
            });
        }
        tracing::debug!(main_end = %main_end, overlay_end = %overlay_end, "extended last instruction");
    }

    // Cut at the overlay's own end.
    let layer = pip_layer(overlay, render_size).with_opacity_at(0.0, overlay_end);
    for instruction in &mut instructions {
        if overlay_end >= instruction.time_range.start() {
            instruction.layers.push(layer.clone());
        }
    }
    Ok(instructions)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/overlay.rs"]
mod tests;
