use std::{io, result};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("terminal too small ({cols}x{rows}), the game window needs more room")]
    TerminalTooSmall { rows: u16, cols: u16 },

    #[error("out of memory while growing the snake to {requested} segments")]
    OutOfMemory { requested: usize },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = result::Result<T, Error>;
