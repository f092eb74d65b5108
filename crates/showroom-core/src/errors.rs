use thiserror::Error;

/// Failures surfaced while parsing configuration, scenario scripts or
/// textual animation parameters. Nothing on the per-frame path returns these.
#[derive(Error, Debug)]
pub enum MotionError {
    #[error("Unknown easing: {0}")]
    InvalidEasing(String),
    #[error("Invalid position parameter: {0}")]
    InvalidPosition(String),
    #[error("Invalid trigger boundary: {0}")]
    InvalidBoundary(String),
    #[error("Invalid toggle actions: {0}")]
    InvalidToggleActions(String),
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
    #[error("Script error: {0}")]
    Script(String),
    #[error(transparent)]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type MotionResult<T> = Result<T, MotionError>;
