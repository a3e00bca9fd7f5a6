use thiserror::Error;

/// Failure inside the remote word/definition pipeline.
///
/// Never escapes the word provider; it only decides whether the fallback pool is used.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("bad response: {0}")]
    BadResponse(String),
    #[error("remote lookup disabled")]
    Disabled,
}

/// Start-up failures of the binary.
#[derive(Debug, Error)]
pub enum HangmanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not build HTTP client: {0}")]
    Client(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, HangmanError>;
