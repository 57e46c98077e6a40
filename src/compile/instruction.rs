use crate::{
    foundation::core::{Affine, Rgba8},
    foundation::time::{MediaTime, TimeRange},
    timeline::slot::TrackSlot,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Transform that takes effect at `at` and holds until the next key.
pub struct TransformKey {
    /// Timeline time the key takes effect.
    pub at: MediaTime,
    /// Source-frame to render-frame transform.
    pub transform: Affine,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Opacity directive for one layer.
pub enum OpacityKey {
    /// Jump to `opacity` at `at` and hold.
    Set {
        /// Timeline time the value takes effect.
        at: MediaTime,
        /// Opacity in `[0, 1]`.
        opacity: f64,
    },
    /// Linear ramp from `from` to `to` across `range`, holding `to` afterwards.
    Ramp {
        /// Opacity at `range.start()`.
        from: f64,
        /// Opacity at `range.end()` and after.
        to: f64,
        /// Ramp window.
        range: TimeRange,
    },
}

impl OpacityKey {
    fn start(&self) -> MediaTime {
        match *self {
            Self::Set { at, .. } => at,
            Self::Ramp { range, .. } => range.start(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Per-track rendering directives inside one instruction.
///
/// Keys are kept sorted by start time. Before the first key a layer renders with the identity
/// transform and full opacity.
pub struct LayerInstruction {
    /// Track whose frames this layer draws.
    pub slot: TrackSlot,
    /// Transform keyframes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<TransformKey>,
    /// Opacity keyframes and ramps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opacity: Vec<OpacityKey>,
}

impl LayerInstruction {
    /// Layer with no keys.
    pub fn new(slot: TrackSlot) -> Self {
        Self {
            slot,
            transforms: Vec::new(),
            opacity: Vec::new(),
        }
    }

    /// Add a transform key at `at`.
    pub fn with_transform_at(mut self, transform: Affine, at: MediaTime) -> Self {
        let idx = self.transforms.partition_point(|k| k.at <= at);
        self.transforms.insert(idx, TransformKey { at, transform });
        self
    }

    /// Add an opacity jump at `at`.
    pub fn with_opacity_at(self, opacity: f64, at: MediaTime) -> Self {
        self.with_opacity_key(OpacityKey::Set { at, opacity })
    }

    /// Add a linear opacity ramp across `range`.
    pub fn with_opacity_ramp(self, from: f64, to: f64, range: TimeRange) -> Self {
        self.with_opacity_key(OpacityKey::Ramp { from, to, range })
    }

    fn with_opacity_key(mut self, key: OpacityKey) -> Self {
        self.push_opacity(key);
        self
    }

    /// Insert an opacity key in start order.
    pub fn push_opacity(&mut self, key: OpacityKey) {
        let idx = self.opacity.partition_point(|k| k.start() <= key.start());
        self.opacity.insert(idx, key);
    }

    /// Transform in effect at timeline time `t`.
    pub fn transform_at(&self, t: MediaTime) -> Affine {
        self.transforms
            .iter()
            .take_while(|k| k.at <= t)
            .last()
            .map_or(Affine::IDENTITY, |k| k.transform)
    }

    /// Opacity in effect at timeline time `t`, clamped to `[0, 1]`.
    pub fn opacity_at(&self, t: MediaTime) -> f64 {
        let mut value = 1.0;
        for key in self.opacity.iter().take_while(|k| k.start() <= t) {
            value = match *key {
                OpacityKey::Set { opacity, .. } => opacity,
                OpacityKey::Ramp { from, to, range } => {
                    if t >= range.end() || range.is_empty() {
                        to
                    } else {
                        let progress =
                            (t - range.start()).as_secs_f64() / range.duration().as_secs_f64();
                        from + (to - from) * progress
                    }
                }
            };
        }
        value.clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Rendering directive for one time-disjoint slice of the output.
pub struct CompositionInstruction {
    /// Slice of the output timeline this instruction governs.
    pub time_range: TimeRange,
    /// Fill behind all layers (two-clip composite only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgba8>,
    /// Layers back-to-front: later entries are drawn on top.
    pub layers: Vec<LayerInstruction>,
}

impl CompositionInstruction {
    /// Instruction with no background.
    pub fn new(time_range: TimeRange, layers: Vec<LayerInstruction>) -> Self {
        Self {
            time_range,
            background: None,
            layers,
        }
    }

    /// Layer drawing `slot`, if present.
    pub fn layer(&self, slot: TrackSlot) -> Option<&LayerInstruction> {
        self.layers.iter().find(|l| l.slot == slot)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/instruction.rs"]
mod tests;
