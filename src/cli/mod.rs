// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! rebuild-branch [global options] [rebuild options] [REMOTE] [BASE_BRANCH] [NEW_BRANCH]
//!
//!   REMOTE       origin
//!   BASE_BRANCH  main
//!   NEW_BRANCH   chem-search-rebuild
//! ```

pub mod global;
pub mod rebuild;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::rebuild::RebuildArgs;
use crate::config::loader::ConfigLoader;
use crate::error::Result;
use clap::Parser;

/// Branch Rebuild Tool
///
/// Re-creates a branch from a remote's base branch and cherry-picks a commit
/// range onto it.
#[derive(Debug, Parser)]
#[command(
    name = "rebuild-branch",
    author,
    version,
    about = "Re-create a branch from a remote base and cherry-pick a commit range onto it",
    long_about = "branch-rebuild Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Fetches REMOTE/BASE_BRANCH, force-creates NEW_BRANCH from it and\n\
                  cherry-picks the configured commit range onto it. Running it\n\
                  again resets NEW_BRANCH and replays the range from scratch.\n\n\
                  If the cherry-pick stops with conflicts, the repository is left\n\
                  in that state: resolve and `git cherry-pick --continue`, or\n\
                  `git cherry-pick --abort`. The exit status is then 1.",
    after_help = "CONFIG FILES:\n\n\
                  By default, `rebuild.toml` in the current directory is loaded if\n\
                  present. Additional files can be given with --ini; later files\n\
                  override earlier ones. REBUILD_<SECTION>__<KEY> environment\n\
                  variables override files, and command-line arguments override\n\
                  everything. Use --no-default-inis to skip `rebuild.toml`."
)]
pub struct Cli {
    /// Global options.
    #[command(flatten)]
    pub global: GlobalOptions,

    /// What to rebuild.
    #[command(flatten)]
    pub rebuild: RebuildArgs,
}

impl Cli {
    /// Build the configuration loader for these arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be applied.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let loader = self.global.config_loader();
        let loader = self.global.apply_overrides(loader)?;
        self.rebuild.apply_overrides(loader)
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> std::result::Result<Cli, clap::Error> {
    Cli::try_parse()
}
