/// Convenience result type used across montage.
pub type MontageResult<T> = Result<T, MontageError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every failure aborts the whole composition request; there are no partial results.
#[derive(thiserror::Error, Debug)]
pub enum MontageError {
    /// A segment insertion would overlap an existing segment on the same track slot.
    #[error("track conflict: {0}")]
    TrackConflict(String),

    /// Composition was requested with zero clips.
    #[error("empty input: composition requires at least one clip")]
    EmptyInput,

    /// The requested mode cannot be satisfied by the supplied clips.
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    /// The media inspector could not supply metadata for a source.
    #[error("inspection failure for '{source_id}': {reason}")]
    InspectionFailure {
        /// Source location handed to the inspector.
        source_id: String,
        /// Collaborator-provided reason.
        reason: String,
    },

    /// Invalid clip metadata, time values, or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MontageError {
    /// Build a [`MontageError::TrackConflict`] value.
    pub fn track_conflict(msg: impl Into<String>) -> Self {
        Self::TrackConflict(msg.into())
    }

    /// Build a [`MontageError::UnsupportedMode`] value.
    pub fn unsupported_mode(msg: impl Into<String>) -> Self {
        Self::UnsupportedMode(msg.into())
    }

    /// Build a [`MontageError::InspectionFailure`] value from any displayable cause.
    ///
    /// `anyhow` chains are flattened with `{:#}` so the root cause survives.
    pub fn inspection(source_id: impl Into<String>, reason: &anyhow::Error) -> Self {
        Self::InspectionFailure {
            source_id: source_id.into(),
            reason: format!("{reason:#}"),
        }
    }

    /// Build a [`MontageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MontageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
