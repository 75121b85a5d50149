use std::io;
use thiserror::Error;

/// Errors raised by the board, renderer, pattern codec and frame loop.
#[derive(Debug, Error)]
pub enum Error {
    /// A cell byte outside of the three known states reached the rasterizer.
    ///
    /// The cell has already been reset to Empty when this is returned.
    #[error("invalid cell state {raw} at ({x},{y})")]
    InvalidCell { x: usize, y: usize, raw: u8 },
    #[error("screen {width}x{height} cannot hold a single {cell_size}px cell")]
    ScreenTooSmall {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    #[error("malformed pattern: {0}")]
    Pattern(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
