//! soltx - decoder and query tool for serialized Solana transactions.

use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = soltx::Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG takes precedence over -v
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    match soltx::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
