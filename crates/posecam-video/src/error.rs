use std::fmt;

#[derive(Debug)]
pub enum VideoError {
    /// The source could not be opened; nothing was read.
    SourceUnavailable(String),
    /// The stream failed after it was opened.
    Stream(String),
    Channel(String),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::SourceUnavailable(msg) => write!(f, "source unavailable: {msg}"),
            VideoError::Stream(msg) => write!(f, "stream error: {msg}"),
            VideoError::Channel(msg) => write!(f, "channel error: {msg}"),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<posecam_base::TensorError> for VideoError {
    fn from(err: posecam_base::TensorError) -> Self {
        VideoError::Stream(err.to_string())
    }
}

/// Returned when a textual source descriptor cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceError(pub String);

impl fmt::Display for ParseSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid source descriptor: {}", self.0)
    }
}

impl std::error::Error for ParseSourceError {}
