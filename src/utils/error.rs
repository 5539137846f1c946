use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongdlError {
    #[error("{message}")]
    UsageError { message: String },

    #[error("{request} request failed: {source}")]
    NetworkError {
        request: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse metadata response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("failed to get track info: {message}")]
    DomainError { code: i64, message: String },

    #[error("failed to {operation} {}: {source}", .path.display())]
    FilesystemError {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Closed set of failure kinds, one per pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Network,
    Parse,
    Domain,
    Filesystem,
}

impl SongdlError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::UsageError {
            message: message.into(),
        }
    }

    pub fn network(request: &'static str, source: reqwest::Error) -> Self {
        Self::NetworkError { request, source }
    }

    pub fn filesystem(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FilesystemError {
            operation,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UsageError { .. } => ErrorKind::Usage,
            Self::NetworkError { .. } => ErrorKind::Network,
            Self::ParseError(_) => ErrorKind::Parse,
            Self::DomainError { .. } => ErrorKind::Domain,
            Self::FilesystemError { .. } => ErrorKind::Filesystem,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Usage => "Run with --help to see the accepted arguments",
            ErrorKind::Network => "Check the network connection or try again later",
            ErrorKind::Parse => "The provider may have changed its response format",
            ErrorKind::Domain => "Try a different keyword, result index or quality",
            ErrorKind::Filesystem => "Check permissions and free space of the output directory",
        }
    }
}

pub type Result<T> = std::result::Result<T, SongdlError>;
