use docgen_core::error::{RemoteError, ValidationError};

/// Everything a workflow can fail with. Each variant ends up in `View::alert`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read {0}")]
    FileRead(String),

    #[error("Copy failed, please select the text manually")]
    Clipboard(String),

    #[error("Export failed: {0}")]
    Export(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}
