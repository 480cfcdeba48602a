//! Create the emulator's disk image
//!
//! Usage: create-disk
//!
//! Writes `disk.img` (512 KiB of zeros) unless it already exists.

use clap::Parser;
use smartimg_core::disk::{DEFAULT_DISK_IMAGE, DISK_IMAGE_SIZE};
use std::path::Path;

#[path = "../commands/mod.rs"]
#[allow(dead_code)]
mod commands;

/// Takes no arguments; parsed only for `--help`/`--version`
#[derive(Parser)]
#[command(name = "create-disk")]
#[command(version, about = "Create a zero-filled disk image if absent", long_about = None)]
struct Args {}

fn main() {
    let _ = Args::parse();

    commands::init_logging(0);
    commands::exit_on_error(commands::create::run_create_disk(
        Path::new(DEFAULT_DISK_IMAGE),
        DISK_IMAGE_SIZE,
    ));
}
