//! Unified error type.

use std::fmt;

/// The error type returned by the crate's fallible operations.
///
/// A cold probe is not an error; it is an ordinary response. This type only
/// surfaces infrastructure failures: binding the port or assembling a
/// response the transport rejects.
#[derive(Debug)]
pub struct Error(std::io::Error);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "io: {}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(e)
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Self(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
