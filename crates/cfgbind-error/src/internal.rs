#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    #[error("Unexpected state: {0}")]
    InvalidState(String),
}
