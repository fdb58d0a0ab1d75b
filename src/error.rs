use reqwest::StatusCode;
use thiserror::Error;

/// Why a single page was not saved.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Status code: {}", .0.as_u16())]
    Status(StatusCode),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("failed to write page file: {0}")]
    Io(#[from] std::io::Error),
}

impl PageError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PageError::Status(status) => Some(*status),
            _ => None,
        }
    }
}
