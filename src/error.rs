use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, ObjError>;

/// Attribute table a face corner points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Texcoord,
    Normal,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Attribute::Position => "position",
            Attribute::Texcoord => "texcoord",
            Attribute::Normal => "normal",
        })
    }
}

#[derive(Error, Debug)]
pub enum ObjError {
    #[error("Failed to read mesh file {}: {source}", path.display())]
    IoFailure { path: PathBuf, source: io::Error },
    #[error("Failed to read mesh source: {0}")]
    Read(#[from] io::Error),
    #[error("Line {line}: malformed attribute \"{text}\"")]
    MalformedAttribute { line: usize, text: String },
    #[error("Line {line}: malformed face reference, {reason}")]
    MalformedFaceReference { line: usize, reason: String },
    #[error("{attribute} index {index} is out of range (count={count})")]
    IndexOutOfRange {
        attribute: Attribute,
        index: u32,
        count: usize,
    },
}

impl ObjError {
    /// Source line the error was raised on, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ObjError::MalformedAttribute { line, .. }
            | ObjError::MalformedFaceReference { line, .. } => Some(*line),
            _ => None,
        }
    }
}
