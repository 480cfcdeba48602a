//! smartimg - Disk and flash image tools for the SmartOS emulator
//!
//! Prepares the flat binary images the emulated LM3S6965 target boots from:
//!
//! - `create-disk` - zero-filled block device image, created once
//! - `create-flash` - erased (0xFF) flash image, reset on every run
//! - `update-flash` - splice a compiled program into the start of flash
//!
//! `verify` and `info` inspect an existing flash image without changing it.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::CreateDisk { output, size } => commands::create::run_create_disk(&output, size),
        Commands::CreateFlash { output, size_kb } => {
            commands::create::run_create_flash(&output, size_kb)
        }
        Commands::UpdateFlash {
            flash,
            program,
            verify,
        } => commands::update::run_update_flash(&flash, &program, verify),
        Commands::Verify { flash, program } => commands::update::run_verify(&flash, &program),
        Commands::Info { image } => commands::info::run_info(&image),
    };

    commands::exit_on_error(result);
}
