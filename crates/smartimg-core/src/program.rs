//! Flash programming
//!
//! Splices a compiled program binary over the start of an existing flash
//! image. The whole image is read into memory, the leading bytes are
//! replaced, and the result is written back in a single truncate-and-write
//! pass. Bytes past the end of the program keep whatever the image held
//! before.
//!
//! All preconditions are checked before the image file is opened for
//! writing, so a failed call never leaves a partially programmed image.
//!
//! The program is allowed to run past [`FS_REGION_BASE`] as long as it fits
//! in the image; this only produces a warning.

use std::fs::{self, File};
use std::path::Path;

use log::{debug, warn};

use crate::error::{ImageError, Result};
use crate::image::write_image;
use crate::layout::{overruns_fs_region, FS_REGION_BASE, PROGRAM_BASE};
use crate::progress::WriteProgress;

/// Default program binary name
pub const DEFAULT_PROGRAM_BINARY: &str = "smartos.bin";

/// Result of a successful programming run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramReport {
    /// Length of the program binary in bytes
    pub program_size: usize,
    /// Length of the flash image in bytes (unchanged by programming)
    pub flash_size: usize,
    /// Address the program was written to
    pub load_address: u64,
    /// The program extends into the filesystem area
    pub overruns_fs_region: bool,
}

/// Overwrite the start of `flash` with `program`
///
/// Fails with [`ImageError::ProgramTooLarge`] without touching `flash` if
/// the program is longer than the image.
pub fn splice(flash: &mut [u8], program: &[u8]) -> Result<()> {
    if program.len() > flash.len() {
        return Err(ImageError::ProgramTooLarge {
            program_size: program.len(),
            flash_size: flash.len(),
        });
    }

    flash[..program.len()].copy_from_slice(program);
    Ok(())
}

/// Compare the start of `flash` against `program`
///
/// Reports the first differing byte as [`ImageError::VerifyMismatch`].
pub fn compare(flash: &[u8], program: &[u8]) -> Result<()> {
    if program.len() > flash.len() {
        return Err(ImageError::ProgramTooLarge {
            program_size: program.len(),
            flash_size: flash.len(),
        });
    }

    match flash
        .iter()
        .zip(program.iter())
        .position(|(found, expected)| found != expected)
    {
        Some(offset) => Err(ImageError::VerifyMismatch {
            offset,
            expected: program[offset],
            found: flash[offset],
        }),
        None => Ok(()),
    }
}

/// Check both input files exist, flash image first
///
/// The program binary is not looked at when the flash image is missing.
fn check_inputs(flash_image: &Path, program_binary: &Path) -> Result<()> {
    if !flash_image.is_file() {
        return Err(ImageError::MissingFlashImage {
            path: flash_image.to_path_buf(),
        });
    }
    if !program_binary.is_file() {
        return Err(ImageError::MissingProgramBinary {
            path: program_binary.to_path_buf(),
        });
    }
    Ok(())
}

/// Write `program_binary` to the start of `flash_image`
pub fn program_flash<F, B, W>(
    flash_image: F,
    program_binary: B,
    progress: &mut W,
) -> Result<ProgramReport>
where
    F: AsRef<Path>,
    B: AsRef<Path>,
    W: WriteProgress + ?Sized,
{
    let flash_image = flash_image.as_ref();
    let program_binary = program_binary.as_ref();
    check_inputs(flash_image, program_binary)?;

    let program = fs::read(program_binary)?;
    debug!(
        "Read {} bytes of program from {}",
        program.len(),
        program_binary.display()
    );

    let mut flash = fs::read(flash_image)?;
    debug!(
        "Read {} bytes of flash from {}",
        flash.len(),
        flash_image.display()
    );

    splice(&mut flash, &program)?;

    let overruns = overruns_fs_region(program.len() as u64);
    if overruns {
        warn!(
            "Program ({} bytes) extends past the filesystem area at 0x{:08X}",
            program.len(),
            FS_REGION_BASE
        );
    }

    write_image(File::create(flash_image)?, &flash, progress)?;

    debug!(
        "Programmed {} bytes into {} at 0x{:08X}",
        program.len(),
        flash_image.display(),
        PROGRAM_BASE
    );

    Ok(ProgramReport {
        program_size: program.len(),
        flash_size: flash.len(),
        load_address: PROGRAM_BASE,
        overruns_fs_region: overruns,
    })
}

/// Check that `flash_image` starts with the contents of `program_binary`
///
/// Returns the number of bytes compared. Never writes.
pub fn verify_flash<F: AsRef<Path>, B: AsRef<Path>>(
    flash_image: F,
    program_binary: B,
) -> Result<usize> {
    let flash_image = flash_image.as_ref();
    let program_binary = program_binary.as_ref();
    check_inputs(flash_image, program_binary)?;

    let program = fs::read(program_binary)?;
    let flash = fs::read(flash_image)?;
    compare(&flash, &program)?;

    debug!(
        "{} matches {} ({} bytes)",
        flash_image.display(),
        program_binary.display(),
        program.len()
    );
    Ok(program.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;
    use std::path::PathBuf;

    fn setup(flash: &[u8], program: Option<&[u8]>) -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let flash_path = dir.path().join("flash.img");
        let program_path = dir.path().join("smartos.bin");
        fs::write(&flash_path, flash).unwrap();
        if let Some(program) = program {
            fs::write(&program_path, program).unwrap();
        }
        (dir, flash_path, program_path)
    }

    #[test]
    fn test_splice_small_program() {
        let mut flash = [0xFFu8; 8];
        splice(&mut flash, &[0x01, 0x02, 0x03]).unwrap();
        assert_eq!(flash, [0x01, 0x02, 0x03, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_splice_keeps_tail() {
        let mut flash: Vec<u8> = (0..16).collect();
        splice(&mut flash, &[0xAA; 4]).unwrap();
        assert_eq!(&flash[..4], &[0xAA; 4]);
        assert_eq!(&flash[4..], &(4..16).collect::<Vec<u8>>()[..]);
    }

    #[test]
    fn test_splice_exact_fit() {
        let mut flash = [0xFFu8; 4];
        splice(&mut flash, &[1, 2, 3, 4]).unwrap();
        assert_eq!(flash, [1, 2, 3, 4]);
    }

    #[test]
    fn test_splice_too_large() {
        let mut flash = [0xFFu8; 4];
        let err = splice(&mut flash, &[0u8; 5]).unwrap_err();
        assert!(matches!(
            err,
            ImageError::ProgramTooLarge {
                program_size: 5,
                flash_size: 4
            }
        ));
        assert_eq!(flash, [0xFF; 4]);
    }

    #[test]
    fn test_program_flash() {
        let (_dir, flash_path, program_path) = setup(&[0xFF; 8], Some(&[0x01, 0x02, 0x03]));

        let report = program_flash(&flash_path, &program_path, &mut NoProgress).unwrap();
        assert_eq!(report.program_size, 3);
        assert_eq!(report.flash_size, 8);
        assert_eq!(report.load_address, 0);
        assert!(!report.overruns_fs_region);

        assert_eq!(
            fs::read(&flash_path).unwrap(),
            [0x01, 0x02, 0x03, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_program_flash_preserves_previous_contents() {
        let before: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let program = vec![0x5Au8; 300];
        let (_dir, flash_path, program_path) = setup(&before, Some(&program));

        program_flash(&flash_path, &program_path, &mut NoProgress).unwrap();

        let after = fs::read(&flash_path).unwrap();
        assert_eq!(after.len(), before.len());
        assert_eq!(&after[..300], &program[..]);
        assert_eq!(&after[300..], &before[300..]);
    }

    #[test]
    fn test_program_too_large_leaves_image() {
        let before = [0x11u8, 0x22, 0x33, 0x44];
        let (_dir, flash_path, program_path) = setup(&before, Some(&[0u8; 5]));

        let err = program_flash(&flash_path, &program_path, &mut NoProgress).unwrap_err();
        assert!(matches!(err, ImageError::ProgramTooLarge { .. }));
        assert_eq!(fs::read(&flash_path).unwrap(), before);
    }

    #[test]
    fn test_missing_flash_image() {
        let dir = tempfile::tempdir().unwrap();
        let flash_path = dir.path().join("flash.img");
        let program_path = dir.path().join("smartos.bin");

        let err = program_flash(&flash_path, &program_path, &mut NoProgress).unwrap_err();
        assert!(matches!(err, ImageError::MissingFlashImage { .. }));
        assert!(err.to_string().contains("create-flash"));
        assert!(!flash_path.exists());
    }

    #[test]
    fn test_missing_flash_image_reported_before_program() {
        let dir = tempfile::tempdir().unwrap();
        let flash_path = dir.path().join("flash.img");
        let program_path = dir.path().join("smartos.bin");
        fs::write(&program_path, [1, 2, 3]).unwrap();

        let err = program_flash(&flash_path, &program_path, &mut NoProgress).unwrap_err();
        assert!(matches!(err, ImageError::MissingFlashImage { .. }));
    }

    #[test]
    fn test_missing_program_binary() {
        let (_dir, flash_path, program_path) = setup(&[0xFF; 8], None);

        let err = program_flash(&flash_path, &program_path, &mut NoProgress).unwrap_err();
        assert!(matches!(err, ImageError::MissingProgramBinary { .. }));
        assert!(err.to_string().contains("smartos.bin"));
        assert!(err.to_string().contains("Run 'make' first"));
        assert_eq!(fs::read(&flash_path).unwrap(), [0xFF; 8]);
    }

    #[test]
    fn test_program_past_fs_boundary_is_allowed() {
        let flash = vec![0xFFu8; 0x20000];
        let program = vec![0x00u8; 0x10001];
        let (_dir, flash_path, program_path) = setup(&flash, Some(&program));

        let report = program_flash(&flash_path, &program_path, &mut NoProgress).unwrap();
        assert!(report.overruns_fs_region);

        let after = fs::read(&flash_path).unwrap();
        assert_eq!(after[0x10000], 0x00);
        assert_eq!(after[0x10001], 0xFF);
    }

    #[test]
    fn test_verify_flash() {
        let (_dir, flash_path, program_path) = setup(&[0xFF; 8], Some(&[0x01, 0x02, 0x03]));

        let err = verify_flash(&flash_path, &program_path).unwrap_err();
        assert!(matches!(
            err,
            ImageError::VerifyMismatch {
                offset: 0,
                expected: 0x01,
                found: 0xFF
            }
        ));

        program_flash(&flash_path, &program_path, &mut NoProgress).unwrap();
        assert_eq!(verify_flash(&flash_path, &program_path).unwrap(), 3);
    }

    #[test]
    fn test_compare_reports_first_difference() {
        let flash = [0x01, 0x02, 0x07, 0x08, 0xFF];
        let err = compare(&flash, &[0x01, 0x02, 0x03, 0x04]).unwrap_err();
        assert!(matches!(
            err,
            ImageError::VerifyMismatch {
                offset: 2,
                expected: 0x03,
                found: 0x07
            }
        ));
        assert!(compare(&flash, &[]).is_ok());
        assert!(matches!(
            compare(&flash, &[0u8; 6]),
            Err(ImageError::ProgramTooLarge { .. })
        ));
    }
}
