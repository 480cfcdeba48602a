//! Flash programming and verification commands

use super::progress::IndicatifProgress;
use super::CommandResult;
use smartimg_core::layout::FlashLayout;
use smartimg_core::program;
use std::path::Path;

/// Run the update-flash command
pub fn run_update_flash(flash: &Path, program_bin: &Path, do_verify: bool) -> CommandResult {
    let mut progress = IndicatifProgress::new("Programming");
    let report = program::program_flash(flash, program_bin, &mut progress)?;

    println!(
        "Program size: {} bytes ({:.2} KB)",
        report.program_size,
        report.program_size as f64 / 1024.0
    );
    println!(
        "Flash size: {} bytes ({:.2} KB)",
        report.flash_size,
        report.flash_size as f64 / 1024.0
    );
    println!("Updated Flash image: {}", flash.display());
    println!("Program written to address 0x{:08X}", report.load_address);
    match FlashLayout::for_size(report.flash_size as u64).find_region("filesystem") {
        Some(fs) => println!(
            "File system area starts at 0x{:08X} ({} KB)",
            fs.start,
            fs.start / 1024
        ),
        None => println!("Flash image has no file system area"),
    }

    if do_verify {
        run_verify(flash, program_bin)?;
    }

    Ok(())
}

/// Run the verify command
pub fn run_verify(flash: &Path, program_bin: &Path) -> CommandResult {
    let verified = program::verify_flash(flash, program_bin)?;
    println!("Verification passed ({} bytes)", verified);
    Ok(())
}
