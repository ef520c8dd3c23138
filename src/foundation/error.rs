/// Result alias used throughout the crate.
pub type StagehandResult<T> = Result<T, StagehandError>;

/// Error categories surfaced by scheduling, animation, and scene operations.
///
/// Every variant is a caller-visible failure: malformed schedule states, invalid scene
/// mutations, and renderer failures are reported here instead of panicking.
#[derive(thiserror::Error, Debug)]
pub enum StagehandError {
    /// A schedule state, window, or scheduler configuration violated its invariants.
    #[error("schedule error: {0}")]
    Schedule(String),

    /// An animation could not be driven (for example a non-finite window).
    #[error("animation error: {0}")]
    Animation(String),

    /// A scene tree mutation or query failed.
    #[error("scene error: {0}")]
    Scene(String),

    /// A renderer reported a failure.
    #[error("render error: {0}")]
    Render(String),

    /// Configuration could not be loaded or failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StagehandError {
    /// Build a [`StagehandError::Schedule`].
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`StagehandError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`StagehandError::Scene`].
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`StagehandError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StagehandError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
