/*!
error module defines the error types used in bgpkit-rislive.
*/
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RisLiveError {
    /// The HTTP request to the feed endpoint could not be completed.
    ///
    /// ## Occurs during:
    ///  - Opening a remote stream source
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// A general IO error triggered while opening a local stream source.
    ///
    /// ## Occurs during:
    ///  - Opening a local stream source
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A local file could not be opened or its compression could not be detected.
    ///
    /// ## Occurs during:
    ///  - Opening a local stream source
    #[error(transparent)]
    OneIo(#[from] oneio::OneIoError),
    /// The byte stream does not contain a well-formed JSON record where one was expected.
    /// Read failures in the middle of a stream also surface here.
    ///
    /// ## Occurs during:
    ///  - Decoding records from an open stream
    #[error("failed to decode json: {0}")]
    Decode(#[from] serde_json::Error),
    /// The AS path of a decoded record holds an element that is not an AS number.
    ///
    /// ## Occurs during:
    ///  - Path digestion of a decoded record
    #[error(transparent)]
    Digest(#[from] DigestError),
    /// A filter type is unknown or its value cannot be parsed.
    ///
    /// ## Occurs during:
    ///  - Building a filter with `FilterConfig::add_filter`
    #[error("{0}")]
    FilterError(String),
}

/// Failure to turn a raw RIS Live path into a sequence of AS numbers.
///
/// No partial path is ever produced alongside this error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DigestError {
    #[error("path element {position} is not an AS number: {value}")]
    NotANumber { position: usize, value: String },
    #[error("path element {position} is out of range for an AS number: {value}")]
    OutOfRange { position: usize, value: String },
    #[error("path element {position} nests an AS set inside an AS set")]
    NestedAsSet { position: usize },
}

impl DigestError {
    /// Index of the offending top-level path element.
    pub fn position(&self) -> usize {
        match self {
            DigestError::NotANumber { position, .. }
            | DigestError::OutOfRange { position, .. }
            | DigestError::NestedAsSet { position } => *position,
        }
    }
}
