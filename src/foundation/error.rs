/// Result alias used across the crate.
pub type SparkResult<T> = Result<T, SparkError>;

/// Errors raised at the fallible edges of the crate.
///
/// The spiral renderer itself never fails; configuration, surface allocation and output sinks do.
#[derive(thiserror::Error, Debug)]
pub enum SparkError {
    /// Invalid configuration or caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Surface allocation or rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Frame sink failure (PNG writing, ffmpeg process).
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SparkError {
    /// Build a [`SparkError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SparkError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SparkError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SparkError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
