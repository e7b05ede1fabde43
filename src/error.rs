use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size should be positive")]
    ZeroSize,

    #[error("a {size}x{size} board is too large")]
    TooLarge { size: usize },

    #[error("cell ({x}, {y}) is out of range for a {size}x{size} board")]
    OutOfRange { x: i64, y: i64, size: usize },
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("unexpected glyph {glyph:?} at line {line}, column {column}")]
    InvalidGlyph {
        line: usize,
        column: usize,
        glyph: char,
    },

    #[error("pattern has no live cells")]
    Empty,

    #[error("unable to read pattern {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
