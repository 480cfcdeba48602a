//! Disk image allocation
//!
//! The disk image is a zero-filled placeholder for the emulator's block
//! device. It is created once: an existing file at the target path is left
//! untouched, whatever its size or contents.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::error::Result;
use crate::image::{filled_buffer, write_image};
use crate::progress::WriteProgress;

/// Default disk image name
pub const DEFAULT_DISK_IMAGE: &str = "disk.img";

/// Default disk image size (512 KiB = 1024 sectors)
pub const DISK_IMAGE_SIZE: u64 = 512 * 1024;

/// Outcome of [`create_disk_image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskOutcome {
    /// A new image of the given size was written
    Created(u64),
    /// A file already existed at the path and was left alone
    AlreadyExists,
}

/// Create a zero-filled disk image unless one already exists
///
/// An existing file is reported through [`DiskOutcome::AlreadyExists`] rather
/// than as an error. The buffer is allocated before the file is created, and
/// a failed write removes the file again, so an interrupted run never leaves
/// behind a short image that later runs would skip.
pub fn create_disk_image<P: AsRef<Path>, W: WriteProgress + ?Sized>(
    path: P,
    size: u64,
    progress: &mut W,
) -> Result<DiskOutcome> {
    let path = path.as_ref();
    let data = filled_buffer(size, 0x00)?;

    // create_new fails on an existing path, which is our skip condition
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!("{} already exists, leaving it untouched", path.display());
            return Ok(DiskOutcome::AlreadyExists);
        }
        Err(e) => return Err(e.into()),
    };

    if let Err(e) = write_image(file, &data, progress) {
        warn!("Writing {} failed, removing it", path.display());
        if let Err(remove_err) = fs::remove_file(path) {
            warn!("Failed to remove {}: {}", path.display(), remove_err);
        }
        return Err(e);
    }

    debug!("Created disk image {} ({} bytes)", path.display(), size);
    Ok(DiskOutcome::Created(size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;
    use std::fs;

    #[test]
    fn test_create_default_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DISK_IMAGE);

        let outcome = create_disk_image(&path, DISK_IMAGE_SIZE, &mut NoProgress).unwrap();
        assert_eq!(outcome, DiskOutcome::Created(524288));

        let data = fs::read(&path).unwrap();
        assert_eq!(data.len(), 524288);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_create_various_sizes() {
        let dir = tempfile::tempdir().unwrap();
        for size in [0u64, 1, 511, 4096, 4097] {
            let path = dir.path().join(format!("disk-{}.img", size));
            create_disk_image(&path, size, &mut NoProgress).unwrap();

            let data = fs::read(&path).unwrap();
            assert_eq!(data.len() as u64, size);
            assert!(data.iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_existing_image_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.img");

        create_disk_image(&path, 1024, &mut NoProgress).unwrap();
        fs::write(&path, b"filesystem contents").unwrap();

        let outcome = create_disk_image(&path, 1024, &mut NoProgress).unwrap();
        assert_eq!(outcome, DiskOutcome::AlreadyExists);
        assert_eq!(fs::read(&path).unwrap(), b"filesystem contents");
    }

    #[test]
    fn test_second_call_keeps_first_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.img");

        create_disk_image(&path, 2048, &mut NoProgress).unwrap();
        create_disk_image(&path, 16, &mut NoProgress).unwrap();

        assert_eq!(fs::read(&path).unwrap(), vec![0u8; 2048]);
    }

    #[test]
    fn test_unallocatable_size_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.img");

        for size in [u64::MAX, 0xF_FFFF_FFFF_FFFF] {
            let err = create_disk_image(&path, size, &mut NoProgress).unwrap_err();
            assert!(matches!(err, crate::ImageError::InvalidSize(_)));
            assert!(!path.exists());
        }

        // A later run must still create the image rather than skip it
        let outcome = create_disk_image(&path, 16, &mut NoProgress).unwrap();
        assert_eq!(outcome, DiskOutcome::Created(16));
        assert_eq!(fs::read(&path).unwrap(), vec![0u8; 16]);
    }

    #[test]
    fn test_missing_parent_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("disk.img");

        let err = create_disk_image(&path, 16, &mut NoProgress).unwrap_err();
        assert!(matches!(err, crate::ImageError::Io(_)));
    }
}
