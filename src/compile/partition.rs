//! Splits the merged main timeline into solo and transition instructions.

use crate::{
    compile::instruction::{CompositionInstruction, LayerInstruction},
    foundation::core::{Affine, Size},
    foundation::error::{MontageError, MontageResult},
    media::clip::Clip,
    timeline::placement::{PlacementPlan, plan_placements},
    timeline::slot::{MediaKind, TrackSlot},
    transform::fit::fit_transform,
};

/// Transform mapping a clip's encoded frame into `render_size`, orientation included.
pub(crate) fn main_layer_transform(clip: &Clip, render_size: Size) -> Affine {
    fit_transform(clip.display_size(), render_size) * clip.orientation()
}

/// Partition the main timeline for `clips` into time-disjoint instructions.
///
/// Each clip contributes a solo instruction over the part of its placement not shared with a
/// neighbour (skipped when that part is empty), followed by a transition instruction over its
/// cross-fade window when it fades into the next clip. Transition layers are ordered
/// `[incoming, outgoing]`, so the outgoing clip draws on top while it fades away.
pub fn partition_instructions(
    clips: &[Clip],
    render_size: Size,
) -> MontageResult<Vec<CompositionInstruction>> {
    if clips.is_empty() {
        return Err(MontageError::EmptyInput);
    }
    let plan = plan_placements(clips)?;
    partition_plan(clips, &plan, render_size)
}

pub(crate) fn partition_plan(
    clips: &[Clip],
    plan: &PlacementPlan,
    render_size: Size,
) -> MontageResult<Vec<CompositionInstruction>> {
    let mut out = Vec::with_capacity(plan.placements.len() * 2);
    for placement in &plan.placements {
        let i = placement.index;
        let clip = &clips[i];
        let slot = TrackSlot::alternating(MediaKind::Video, i);
        let transform = main_layer_transform(clip, render_size);

        if let Some(solo) = placement.solo_range()? {
            let layer = LayerInstruction::new(slot).with_transform_at(transform, solo.start());
            out.push(CompositionInstruction::new(solo, vec![layer]));
        }

        if let Some(window) = placement.fade_out {
            let next = &clips[i + 1];
            let outgoing = LayerInstruction::new(slot)
                .with_transform_at(transform, window.start())
                .with_opacity_ramp(1.0, 0.0, window);
            let incoming = LayerInstruction::new(TrackSlot::alternating(MediaKind::Video, i + 1))
                .with_transform_at(main_layer_transform(next, render_size), window.start())
                .with_opacity_ramp(0.0, 1.0, window);
            out.push(CompositionInstruction::new(window, vec![incoming, outgoing]));
        }
    }
    tracing::debug!(instructions = out.len(), "partitioned main timeline");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/partition.rs"]
mod tests;
