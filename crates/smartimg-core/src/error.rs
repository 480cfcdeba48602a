//! Error types for image operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while creating, programming or verifying images
#[derive(Debug, Error)]
pub enum ImageError {
    /// The flash image to program does not exist
    #[error(
        "Flash image '{}' not found! Run create-flash first to create the Flash image.",
        path.display()
    )]
    MissingFlashImage {
        /// Path that was checked
        path: PathBuf,
    },

    /// The program binary to write does not exist
    #[error(
        "Program binary '{}' not found! Run 'make' first to compile the program.",
        path.display()
    )]
    MissingProgramBinary {
        /// Path that was checked
        path: PathBuf,
    },

    /// The program does not fit into the flash image
    #[error("Program ({program_size} bytes) is larger than Flash ({flash_size} bytes)!")]
    ProgramTooLarge {
        /// Length of the program binary in bytes
        program_size: usize,
        /// Length of the flash image in bytes
        flash_size: usize,
    },

    /// Flash contents differ from the program binary
    #[error(
        "Verification failed at offset 0x{offset:08X}: expected 0x{expected:02X}, got 0x{found:02X}"
    )]
    VerifyMismatch {
        /// Offset of the first differing byte
        offset: usize,
        /// Byte from the program binary
        expected: u8,
        /// Byte found in the flash image
        found: u8,
    },

    /// A size argument could not be parsed or is out of range
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for image operations
pub type Result<T> = std::result::Result<T, ImageError>;
