// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --no-default-inis ← Skip ./rebuild.toml
//! --dry             ← Print the plan, run nothing
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --log-file FILE   ← Enable file logging
//! --show-config     ← Print effective options and exit
//!
//! Precedence: CLI flags > REBUILD_* env > --ini > rebuild.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::config::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;

/// Global options.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Disables auto loading of rebuild.toml, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,

    /// Prints the git commands that would run without touching the repository.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Prints the effective configuration and the files it came from, then exits.
    #[arg(long = "show-config")]
    pub show_config: bool,
}

impl GlobalOptions {
    /// Loader with the config files these options select, plus `REBUILD_*`
    /// environment variables.
    #[must_use]
    pub fn config_loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new();
        if !self.no_default_inis {
            loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
        }
        for ini in &self.inis {
            loader = loader.add_toml_file(ini);
        }
        loader.with_env_prefix(ENV_PREFIX)
    }

    /// Apply the flags that were given as configuration overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be set.
    pub fn apply_overrides(&self, mut loader: ConfigLoader) -> Result<ConfigLoader> {
        if let Some(level) = self.log_level {
            loader = loader.set("global.output_log_level", i64::from(level))?;
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            loader = loader.set("global.file_log_level", i64::from(level))?;
        }

        if let Some(ref path) = self.log_file {
            loader = loader.set("global.log_file", path.display().to_string())?;
        }

        if self.dry {
            loader = loader.set("global.dry", true)?;
        }

        Ok(loader)
    }
}
