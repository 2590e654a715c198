/// Convenience result type used across kinescope.
pub type KinescopeResult<T> = Result<T, KinescopeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum KinescopeError {
    /// Invalid construction parameters or scene configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while resolving a deferred field or reading machine state at draw time.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors raised by a drawing surface or frame buffer operation.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing scene descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KinescopeError {
    /// Build a [`KinescopeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KinescopeError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`KinescopeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`KinescopeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
