use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrepError {
    #[error("Degenerate geometry: {0}")]
    Degenerate(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Tolerance violation: {0}")]
    ToleranceFailure(String),
}

pub type Result<T> = std::result::Result<T, BrepError>;
