//! CLI argument parsing

use clap::{Parser, Subcommand};
use smartimg_core::disk::DEFAULT_DISK_IMAGE;
use smartimg_core::flash::{DEFAULT_FLASH_IMAGE, DEFAULT_FLASH_SIZE_KB};
use smartimg_core::program::DEFAULT_PROGRAM_BINARY;
use std::path::PathBuf;

/// Parse a size argument such as "512 KiB" or "0x80000"
fn parse_size_arg(s: &str) -> Result<u64, String> {
    smartimg_core::size::parse_size(s).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "smartimg")]
#[command(author, version, about = "Disk and flash image tools for the SmartOS emulator", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a zero-filled disk image (skipped if the file exists)
    CreateDisk {
        /// Output file path
        #[arg(short, long, default_value = DEFAULT_DISK_IMAGE)]
        output: PathBuf,

        /// Image size (e.g., "512 KiB", "0x80000")
        #[arg(long, value_parser = parse_size_arg, default_value = "512 KiB")]
        size: u64,
    },

    /// Create an erased (0xFF) flash image, replacing any existing file
    CreateFlash {
        /// Output file path
        #[arg(default_value = DEFAULT_FLASH_IMAGE)]
        output: PathBuf,

        /// Flash size in KiB
        #[arg(long, default_value_t = DEFAULT_FLASH_SIZE_KB)]
        size_kb: u64,
    },

    /// Write a program binary to the start of a flash image
    UpdateFlash {
        /// Flash image to program
        #[arg(short, long, default_value = DEFAULT_FLASH_IMAGE)]
        flash: PathBuf,

        /// Program binary to write
        #[arg(short, long, default_value = DEFAULT_PROGRAM_BINARY)]
        program: PathBuf,

        /// Verify after writing
        #[arg(long)]
        verify: bool,
    },

    /// Check that a flash image starts with a program binary
    Verify {
        /// Flash image to check
        #[arg(short, long, default_value = DEFAULT_FLASH_IMAGE)]
        flash: PathBuf,

        /// Program binary to compare against
        #[arg(short, long, default_value = DEFAULT_PROGRAM_BINARY)]
        program: PathBuf,
    },

    /// Show the layout and state of a flash image
    Info {
        /// Flash image to inspect
        #[arg(default_value = DEFAULT_FLASH_IMAGE)]
        image: PathBuf,
    },
}
