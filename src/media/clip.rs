use crate::{
    foundation::core::{Affine, Rect, Size, Vec2, is_drawable},
    foundation::error::{MontageError, MontageResult},
    foundation::time::MediaTime,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One inspected source clip.
///
/// Clips are immutable inputs: the engine only reads them for the duration of one
/// composition request.
pub struct Clip {
    /// Caller-supplied source location (path or URL).
    pub source: String,
    /// Playable duration of the clip's video track.
    pub duration: MediaTime,
    /// Encoded pixel size of the video track, before orientation.
    pub natural_size: Size,
    /// Whether the source carries an audio track.
    #[serde(default)]
    pub has_audio: bool,
    /// Orientation-correcting transform recorded in the source.
    #[serde(default = "default_preferred_transform")]
    pub preferred_transform: Affine,
}

fn default_preferred_transform() -> Affine {
    Affine::IDENTITY
}

impl Clip {
    /// Upright clip with identity orientation.
    pub fn new(
        source: impl Into<String>,
        duration: MediaTime,
        natural_size: Size,
        has_audio: bool,
    ) -> Self {
        Self {
            source: source.into(),
            duration,
            natural_size,
            has_audio,
            preferred_transform: Affine::IDENTITY,
        }
    }

    /// Replace the preferred (orientation) transform.
    pub fn with_preferred_transform(mut self, transform: Affine) -> Self {
        self.preferred_transform = transform;
        self
    }

    /// Validate metadata the engine relies on.
    pub fn validate(&self) -> MontageResult<()> {
        if self.duration <= MediaTime::ZERO {
            return Err(MontageError::validation(format!(
                "clip '{}' duration must be > 0 (got {})",
                self.source, self.duration
            )));
        }
        if !is_drawable(self.natural_size) {
            return Err(MontageError::validation(format!(
                "clip '{}' natural_size must be finite and > 0 (got {}x{})",
                self.source, self.natural_size.width, self.natural_size.height
            )));
        }
        if !self.preferred_transform.is_finite() || self.preferred_transform.determinant() == 0.0
        {
            return Err(MontageError::validation(format!(
                "clip '{}' preferred_transform must be finite and invertible",
                self.source
            )));
        }
        Ok(())
    }

    /// Size of the upright frame once `preferred_transform` is applied.
    pub fn display_size(&self) -> Size {
        self.oriented_bounds().size()
    }

    /// `preferred_transform` shifted so the upright frame starts at the origin.
    pub fn orientation(&self) -> Affine {
        let bounds = self.oriented_bounds();
        Affine::translate(Vec2::new(-bounds.x0, -bounds.y0)) * self.preferred_transform
    }

    fn oriented_bounds(&self) -> Rect {
        self.preferred_transform
            .transform_rect_bbox(Rect::from_origin_size((0.0, 0.0), self.natural_size))
    }
}

/// Orientation transform for a clockwise rotation of `degrees` (a multiple of 90).
///
/// The result maps the `natural_size` frame onto an upright frame anchored at the origin.
pub fn rotation_transform(degrees: i32, natural_size: Size) -> MontageResult<Affine> {
    let w = natural_size.width;
    let h = natural_size.height;
    let coeffs = match degrees.rem_euclid(360) {
        0 => return Ok(Affine::IDENTITY),
        90 => [0.0, 1.0, -1.0, 0.0, h, 0.0],
        180 => [-1.0, 0.0, 0.0, -1.0, w, h],
        270 => [0.0, -1.0, 1.0, 0.0, 0.0, w],
        other => {
            return Err(MontageError::validation(format!(
                "rotation must be a multiple of 90 degrees (got {other})"
            )));
        }
    };
    Ok(Affine::new(coeffs))
}

#[cfg(test)]
#[path = "../../tests/unit/media/clip.rs"]
mod tests;
