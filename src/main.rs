//! otp-recover — OTP Secret Recovery Tool
//!
//! Recovers OTP secrets from a third-party authenticator's on-disk store and
//! generates candidate TOTP codes under every plausible interpretation, for
//! side-by-side comparison with the codes the vendor app displays.

use std::path::PathBuf;

use anyhow::{bail, Result};

mod app;
mod db;
mod otp;
mod recover;

use db::ExtractorConfig;

enum Command {
    Analyze,
    Watch,
}

fn main() -> Result<()> {
    let mut config = ExtractorConfig::default();
    let mut command = Command::Analyze;
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "analyze" => command = Command::Analyze,
            "watch" => command = Command::Watch,
            "--json" => json = true,
            "--db" => {
                let Some(path) = args.next() else {
                    bail!("--db requires a path");
                };
                config.db_path = PathBuf::from(path);
            }
            "--group" => {
                let Some(group) = args.next() else {
                    bail!("--group requires an access group name");
                };
                config.access_group = group;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => bail!("unknown argument: {} (try --help)", other),
        }
    }

    match command {
        Command::Analyze => app::run_analyze(&config, json),
        Command::Watch => app::run_watch(&config),
    }
}

fn print_usage() {
    println!("otp-recover — recover OTP secrets and cross-check candidate codes");
    println!();
    println!("Usage: otp-recover [analyze|watch] [options]");
    println!();
    println!("Commands:");
    println!("  analyze          dump all decodings and parameter variants (default)");
    println!("  watch            live per-second code view");
    println!();
    println!("Options:");
    println!("  --db <path>      vendor database path");
    println!("  --group <agrp>   keychain access group to read");
    println!("  --json           analyze output as JSON");
}
