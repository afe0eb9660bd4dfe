/// Convenience result type used across Scrollstage.
pub type StageResult<T> = Result<T, StageError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The taxonomy is deliberately narrow: the engine has no I/O surface, so the
/// only hard failures are programmer errors (bad configuration, registry
/// lookups out of lockstep with the section enumeration). Guard-rejected
/// events are normal flow control and are never represented here.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    /// Invalid user-provided configuration or section data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A section id or index not present in the static registry.
    #[error("registry error: {0}")]
    Registry(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageError {
    /// Build a [`StageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StageError::Registry`] value.
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }
}
