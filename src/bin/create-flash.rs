//! Create an erased flash image
//!
//! Usage: create-flash [output-file]
//!
//! Writes a 256 KiB image filled with 0xFF, replacing any existing file.
//! The output defaults to `flash.img`.

use clap::Parser;
use smartimg_core::flash::{DEFAULT_FLASH_IMAGE, DEFAULT_FLASH_SIZE_KB};
use std::path::PathBuf;

#[path = "../commands/mod.rs"]
#[allow(dead_code)]
mod commands;

#[derive(Parser, Debug)]
#[command(name = "create-flash")]
#[command(version, about = "Create an erased (0xFF) flash image", long_about = None)]
struct Args {
    /// Output file path
    #[arg(default_value = DEFAULT_FLASH_IMAGE)]
    output: PathBuf,
}

fn main() {
    let args = Args::parse();

    commands::init_logging(0);
    commands::exit_on_error(commands::create::run_create_flash(
        &args.output,
        DEFAULT_FLASH_SIZE_KB,
    ));
}
