//! smartimg-core - Image preparation for the SmartOS emulated target
//!
//! This crate builds the flat binary files the emulator boots from:
//!
//! - a zero-filled disk image ([`disk`]), created once and never replaced
//! - a flash image filled with the erased byte `0xFF` ([`flash`]), reset on
//!   every invocation
//! - a programmed flash image, produced by splicing a compiled program
//!   binary over the start of an existing flash image ([`program`])
//!
//! None of the images carry a header. The flash image places the program at
//! address `0x00000000` and leaves the area starting at `0x00010000` to the
//! target's filesystem driver (see [`layout`]).
//!
//! # Example
//!
//! ```ignore
//! use smartimg_core::{flash, program, progress::NoProgress};
//!
//! flash::create_flash_image("flash.img", flash::DEFAULT_FLASH_SIZE_KB, &mut NoProgress)?;
//! let report = program::program_flash("flash.img", "smartos.bin", &mut NoProgress)?;
//! println!("wrote {} of {} bytes", report.program_size, report.flash_size);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod disk;
pub mod error;
pub mod flash;
mod image;
pub mod layout;
pub mod program;
pub mod progress;
pub mod size;

pub use error::{ImageError, Result};
