#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Ingest error: {message}")]
    Ingest { message: String },

    #[error("Resolve error: {message}")]
    Resolve { message: String },
}
