//! Man page generator for smartimg
//!
//! Usage: cargo run --bin gen-manpage -- [output-dir]

use clap::CommandFactory;
use std::fs;
use std::path::PathBuf;

#[path = "../cli.rs"]
mod cli;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Default to ./man directory
    let output_dir = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("man")
    };

    fs::create_dir_all(&output_dir)?;

    let cmd = cli::Cli::command();
    let man = clap_mangen::Man::new(cmd.clone());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;

    let output_path = output_dir.join("smartimg.1");
    fs::write(&output_path, buffer)?;
    println!("Man page generated at: {}", output_path.display());

    for sub in cmd.get_subcommands() {
        let name = format!("smartimg-{}", sub.get_name());
        let man = clap_mangen::Man::new(sub.clone()).title(name.as_str());
        let mut buffer = Vec::new();
        man.render(&mut buffer)?;

        let sub_path = output_dir.join(format!("{}.1", name));
        fs::write(&sub_path, buffer)?;
        println!("Man page generated at: {}", sub_path.display());
    }

    println!("\nTo view the man page:");
    println!("  man -l {}", output_path.display());

    Ok(())
}
