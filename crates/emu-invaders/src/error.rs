//! Load-time errors.
//!
//! Program loading is the only operation on the board that can fail.
//! Everything at run time (unknown opcodes, unknown ports, stray memory
//! accesses) is logged and recovered from locally.

use std::path::PathBuf;

use thiserror::Error;

/// Failure loading a program image into ROM.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image starts inside ROM but runs past its end.
    #[error("{len} byte image at {start:#06X} does not fit in ROM (ends at {rom_end:#06X})")]
    TooLarge { start: u16, len: usize, rom_end: u16 },

    /// The load address is not in ROM at all.
    #[error("load address {start:#06X} is outside ROM")]
    OutOfRange { start: u16 },

    /// One chip of a four-chip ROM set is bigger than its socket.
    #[error("ROM chip {chip} is {len} bytes, socket holds {capacity}")]
    ChipTooLarge {
        chip: &'static str,
        len: usize,
        capacity: usize,
    },

    /// A ROM file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
