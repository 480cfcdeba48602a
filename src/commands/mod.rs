//! CLI command implementations
//!
//! Shared by the `smartimg` multi-command binary and the single-purpose
//! `create-disk`, `create-flash` and `update-flash` tools.

pub mod create;
pub mod info;
mod progress;
pub mod update;

/// Result type returned by every command
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Default log filter for a `-v` count
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialise logging, raising the level with each `-v`
///
/// `RUST_LOG` still takes precedence when set.
pub fn init_logging(verbose: u8) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(verbose)))
        .init();
}

/// Print the error and exit with a non-zero status if the command failed
pub fn exit_on_error(result: CommandResult) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
