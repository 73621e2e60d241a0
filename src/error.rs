use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum TfblocksError {
    #[error(transparent)]
    State(#[from] crate::terraform::StateError),

    #[error(transparent)]
    Pattern(#[from] crate::matcher::PatternError),

    #[error(transparent)]
    Registry(#[from] crate::providers::RegistryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
