// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: avcfg entry point
//! INTENT: Parse flags, set up logging, run one command against the file store

use std::io;
use std::process::ExitCode;

use avcfg::{Cli, Config};
use clap::Parser;

fn init_logging(cli: &Cli) {
    let level = match cli.verbose {
        0 => None,
        1 => Some("info".to_string()),
        2 => Some("debug".to_string()),
        _ => Some("trace".to_string()),
    };
    // -v wins, then RUST_LOG, then the config file, then warn.
    let fallback = level.clone().or_else(|| {
        Config::load(cli.config.as_deref()).ok().and_then(|config| config.log.level)
    });
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(fallback.unwrap_or_else(|| "warn".to_string())),
    );
    if let Some(level) = level {
        builder.parse_filters(&level);
    }
    builder.format_timestamp(None).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut stdout = io::stdout().lock();
    match avcfg::run(&cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("avcfg: error: {err}");
            ExitCode::FAILURE
        }
    }
}
