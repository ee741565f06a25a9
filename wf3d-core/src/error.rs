/// Error types shared by the core library
use thiserror::Error;

/// Errors raised while building canvases, meshes and animations
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("animation duration must be positive and finite, got {0}")]
    InvalidDuration(f32),

    #[error("allocation failed")]
    AllocationFailed,

    #[error("edge references vertex {index} but only {len} vertices exist")]
    InvalidEdgeIndex { index: usize, len: usize },

    #[error(transparent)]
    Stl(#[from] StlError),
}

/// Failures while decoding STL data
#[derive(Debug, Error, PartialEq)]
pub enum StlError {
    #[error("file too small to be a valid STL ({0} bytes)")]
    TooSmall(usize),

    #[error("unexpected end of file: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("failed to parse ASCII STL: {0}")]
    Ascii(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::AllocationFailed
    }
}
