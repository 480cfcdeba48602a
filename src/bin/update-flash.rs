//! Write the compiled program into the flash image
//!
//! Usage: update-flash
//!
//! Reads `smartos.bin` and `flash.img` from the current directory and writes
//! the program to the start of the flash image.

use clap::Parser;
use smartimg_core::flash::DEFAULT_FLASH_IMAGE;
use smartimg_core::program::DEFAULT_PROGRAM_BINARY;
use std::path::Path;

#[path = "../commands/mod.rs"]
#[allow(dead_code)]
mod commands;

/// Takes no arguments; parsed only for `--help`/`--version`
#[derive(Parser)]
#[command(name = "update-flash")]
#[command(version, about = "Write smartos.bin to the start of flash.img", long_about = None)]
struct Args {}

fn main() {
    let _ = Args::parse();

    commands::init_logging(0);
    commands::exit_on_error(commands::update::run_update_flash(
        Path::new(DEFAULT_FLASH_IMAGE),
        Path::new(DEFAULT_PROGRAM_BINARY),
        false,
    ));
}
