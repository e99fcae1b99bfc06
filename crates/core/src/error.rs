//! Error types shared by the core and the shell.
//!
//! Every failure the user can see is one of two kinds: a local validation
//! failure caught before any request is sent, or a remote failure reported by
//! (or mangled on the way back from) the documentation backend.

use crate::mode::Mode;
use thiserror::Error;

/// Rejected locally, no request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a file first")]
    NoFileSelected,

    #[error("Please upload a project archive first")]
    NoProjectUploaded,

    #[error("Please analyze a GitHub repository first")]
    NoRepositoryAnalyzed,

    #[error("Please upload a .zip archive (got {0})")]
    NotZipArchive(String),

    #[error("Please enter a GitHub repository URL")]
    EmptyGithubUrl,

    #[error("Please generate documentation first")]
    NoDocumentation,

    /// Data for `0` was offered while another mode is active.
    #[error("Switch to {0} mode first")]
    WrongMode(Mode),
}

/// Reported by the backend or produced while reading its reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The body was not the JSON shape the endpoint promises.
    #[error("Unexpected response: {0}")]
    Malformed(String),
}
