use std::io;

use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, FormatError>;

/// Failures while storing or loading an `OutputGeometry`.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Could not encode or decode vertex layout: {0}")]
    Codec(#[from] bincode::Error),
    #[error("Could not access vertex layout file: {0}")]
    File(#[from] io::Error),
}
