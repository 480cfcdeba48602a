//! Shared image file writer

use std::fs::File;
use std::io::Write;

use log::trace;

use crate::error::{ImageError, Result};
use crate::progress::WriteProgress;

/// Chunk size for streaming image contents to disk
const WRITE_CHUNK_SIZE: usize = 4096;

/// Allocate an image buffer of `size` bytes holding `fill`
///
/// Fails with [`ImageError::InvalidSize`] instead of aborting when the
/// buffer cannot be allocated, so callers can check before touching disk.
pub(crate) fn filled_buffer(size: u64, fill: u8) -> Result<Vec<u8>> {
    let len = usize::try_from(size)
        .map_err(|_| ImageError::InvalidSize(format!("{} bytes does not fit in memory", size)))?;

    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|e| {
        ImageError::InvalidSize(format!("cannot allocate {} bytes: {}", size, e))
    })?;
    data.resize(len, fill);
    Ok(data)
}

/// Write `data` through an already opened file, chunk by chunk
///
/// The file handle is flushed and synced before returning so the image is
/// complete on disk once the caller sees `Ok`.
pub(crate) fn write_image<P: WriteProgress + ?Sized>(
    mut file: File,
    data: &[u8],
    progress: &mut P,
) -> Result<()> {
    let total_size = data.len();
    progress.writing(total_size);

    let mut offset = 0usize;
    for chunk in data.chunks(WRITE_CHUNK_SIZE) {
        file.write_all(chunk)?;
        offset += chunk.len();
        progress.write_progress(offset);
    }

    file.flush()?;
    file.sync_all()?;
    trace!("Wrote {} bytes in chunks of {}", offset, WRITE_CHUNK_SIZE);

    progress.complete(offset);
    Ok(())
}
