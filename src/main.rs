// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> rebuild | --show-config
//! ```

use std::process::ExitCode;

use branch_rebuild::cli::{self, Cli};
use branch_rebuild::cmd::config::run_show_config_command;
use branch_rebuild::cmd::rebuild::{failure_status, run_rebuild_command, write_failure};
use branch_rebuild::config::Config;
use branch_rebuild::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let (config, config_files) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&LogConfig::from(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if cli.global.show_config {
        return match run_show_config_command(&config, &config_files) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match run_rebuild_command(&cli.rebuild, &config) {
        Ok(outcome) => ExitCode::from(outcome.exit_status()),
        Err(e) => {
            // Nothing sensible is left to do if stderr is gone.
            let _ = write_failure(&mut std::io::stderr().lock(), &e);
            ExitCode::from(failure_status(&e))
        }
    }
}

fn load_config(cli: &Cli) -> branch_rebuild::error::Result<(Config, Vec<String>)> {
    let loader = cli.config_loader()?;
    let files = loader.format_loaded_files();
    Ok((loader.build()?, files))
}
