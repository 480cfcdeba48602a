//! Image creation commands

use super::progress::IndicatifProgress;
use super::CommandResult;
use smartimg_core::disk::{self, DiskOutcome};
use smartimg_core::flash::{self, ERASED_BYTE};
use std::path::Path;

/// Run the create-disk command
pub fn run_create_disk(output: &Path, size: u64) -> CommandResult {
    let mut progress = IndicatifProgress::new("Writing disk image");

    match disk::create_disk_image(output, size, &mut progress)? {
        DiskOutcome::Created(size) => {
            println!("Created {} ({} bytes)", output.display(), size);
        }
        DiskOutcome::AlreadyExists => {
            println!("{} already exists, skipping creation", output.display());
        }
    }

    Ok(())
}

/// Run the create-flash command
pub fn run_create_flash(output: &Path, size_kb: u64) -> CommandResult {
    let mut progress = IndicatifProgress::new("Writing flash image");
    let size_bytes = flash::create_flash_image(output, size_kb, &mut progress)?;

    println!("Created Flash image: {}", output.display());
    println!("Size: {} KB ({} bytes)", size_kb, size_bytes);
    println!("Initial state: 0x{:02X} (unprogrammed)", ERASED_BYTE);

    Ok(())
}
