//! Flash image inspection

use super::CommandResult;
use smartimg_core::layout::{self, FlashLayout, SECTOR_SIZE};
use std::fs;
use std::path::Path;

/// Run the info command
pub fn run_info(image: &Path) -> CommandResult {
    let data = fs::read(image)?;
    let summary = layout::inspect(&data);
    let flash_layout = FlashLayout::for_size(summary.size);

    println!("Flash Image Information");
    println!("=======================");
    println!();
    println!("File:            {}", image.display());
    println!(
        "Size:            {} bytes ({} KiB)",
        summary.size,
        summary.size / 1024
    );
    if summary.is_blank() {
        println!("Contents:        blank (all 0xFF)");
    } else {
        let last = summary.programmed_extent - 1;
        let region = flash_layout.region_at(last).map_or("?", |r| r.name);
        println!(
            "Contents:        programmed up to 0x{:08X} (ends in {})",
            summary.programmed_extent, region
        );
    }

    if summary.regions.is_empty() {
        return Ok(());
    }

    println!();
    println!("Regions:");
    for status in &summary.regions {
        let region = &status.region;
        println!(
            "  {:12} 0x{:08X} - 0x{:08X} ({} KiB, {} sectors of {} bytes) {}",
            region.name,
            region.start,
            region.end,
            region.size() / 1024,
            region.sectors(),
            SECTOR_SIZE,
            if status.erased { "erased" } else { "in use" }
        );
    }

    Ok(())
}
