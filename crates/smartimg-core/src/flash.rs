//! Flash image allocation
//!
//! A fresh flash image holds [`ERASED_BYTE`] everywhere, the value of a NOR
//! cell that has not been programmed yet. Programming can only clear bits,
//! so anything later written over the image is expected to start from this
//! state.
//!
//! Unlike the disk image, the flash image is reset on every call: an
//! existing file is truncated and rewritten.

use std::fs::File;
use std::path::Path;

use log::debug;

use crate::error::{ImageError, Result};
use crate::image::{filled_buffer, write_image};
use crate::progress::WriteProgress;

/// Default flash image name
pub const DEFAULT_FLASH_IMAGE: &str = "flash.img";

/// Default flash image size in KiB (LM3S6965 on-chip flash)
pub const DEFAULT_FLASH_SIZE_KB: u64 = 256;

/// Value of an erased flash byte
pub const ERASED_BYTE: u8 = 0xFF;

/// Create (or overwrite) a flash image of `size_kb` KiB filled with
/// [`ERASED_BYTE`]
///
/// Returns the image size in bytes.
pub fn create_flash_image<P: AsRef<Path>, W: WriteProgress + ?Sized>(
    path: P,
    size_kb: u64,
    progress: &mut W,
) -> Result<u64> {
    let path = path.as_ref();
    let size_bytes = size_kb
        .checked_mul(1024)
        .ok_or_else(|| ImageError::InvalidSize(format!("{} KiB overflows", size_kb)))?;
    let data = filled_buffer(size_bytes, ERASED_BYTE)?;
    write_image(File::create(path)?, &data, progress)?;

    debug!(
        "Created flash image {} ({} KiB, {} bytes)",
        path.display(),
        size_kb,
        size_bytes
    );
    Ok(size_bytes)
}
