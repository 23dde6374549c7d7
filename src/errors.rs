use std::error::Error;
use std::fmt;
use std::io;

/// Enumeration of all possible errors that can occur in rallymedia
#[derive(Debug)]
pub enum RallyMediaError {
    MediaLoad(MediaLoadError),
    Seek(SeekError),
    Frame(FrameError),
    Stream(StreamError),
    Cancelled,
    Other(io::Error),
}

/// The video resource could not be opened or its metadata could not be read
#[derive(Debug)]
pub struct MediaLoadError {
    pub message: String,
}

impl MediaLoadError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A seek to a specific timestamp did not settle
#[derive(Debug)]
pub struct SeekError {
    /// The requested timestamp, in seconds, that could not be reached.
    pub timestamp: f64,
    pub message: String,
}

impl SeekError {
    /// Create a new error for the given timestamp.
    pub fn new(timestamp: f64, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }
}

/// Frame capture or still-image encoding specific errors
#[derive(Debug)]
pub struct FrameError {
    pub message: String,
}

impl FrameError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Source fetching and envelope transport errors
#[derive(Debug)]
pub struct StreamError {
    pub message: String,
}

impl StreamError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RallyMediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RallyMediaError::MediaLoad(err) => write!(f, "Media load error: {}", err),
            RallyMediaError::Seek(err) => write!(f, "Seek error: {}", err),
            RallyMediaError::Frame(err) => write!(f, "Frame error: {}", err),
            RallyMediaError::Stream(err) => write!(f, "Stream error: {}", err),
            RallyMediaError::Cancelled => write!(f, "Operation cancelled"),
            RallyMediaError::Other(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl fmt::Display for MediaLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for SeekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seek to {:.3}s failed: {}", self.timestamp, self.message)
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for RallyMediaError {}
impl Error for MediaLoadError {}
impl Error for SeekError {}
impl Error for FrameError {}
impl Error for StreamError {}

// Conversion implementations
impl From<io::Error> for RallyMediaError {
    fn from(err: io::Error) -> Self {
        RallyMediaError::Other(err)
    }
}

impl From<MediaLoadError> for RallyMediaError {
    fn from(err: MediaLoadError) -> Self {
        RallyMediaError::MediaLoad(err)
    }
}

impl From<SeekError> for RallyMediaError {
    fn from(err: SeekError) -> Self {
        RallyMediaError::Seek(err)
    }
}

impl From<FrameError> for RallyMediaError {
    fn from(err: FrameError) -> Self {
        RallyMediaError::Frame(err)
    }
}

impl From<StreamError> for RallyMediaError {
    fn from(err: StreamError) -> Self {
        RallyMediaError::Stream(err)
    }
}

// Conversion to io::Error for callers that only speak std::io
impl From<RallyMediaError> for io::Error {
    fn from(err: RallyMediaError) -> Self {
        io::Error::other(err)
    }
}

impl From<MediaLoadError> for io::Error {
    fn from(err: MediaLoadError) -> Self {
        io::Error::other(err)
    }
}

impl From<SeekError> for io::Error {
    fn from(err: SeekError) -> Self {
        io::Error::other(err)
    }
}

impl From<FrameError> for io::Error {
    fn from(err: FrameError) -> Self {
        io::Error::other(err)
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        io::Error::other(err)
    }
}

// Type alias for Result with RallyMediaError
pub type RallyMediaResult<T> = Result<T, RallyMediaError>;
