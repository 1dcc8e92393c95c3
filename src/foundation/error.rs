/// Convenience result type used across reviewcard.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by compositor and pagination APIs.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid caller-provided options, crop values or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// Text wrapping or pagination broke an internal invariant.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors while drawing or compositing a card.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing job data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`CardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
