// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rebuild arguments.
//!
//! Positional arguments left out fall back to configuration, then to
//! `origin`, `main` and `chem-search-rebuild`.

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;
use crate::rebuild::range::PickRange;

/// Arguments naming what to rebuild.
#[derive(Debug, Clone, Default, Args)]
pub struct RebuildArgs {
    /// Remote to fetch the base branch from [default: origin].
    #[arg(value_name = "REMOTE")]
    pub remote: Option<String>,

    /// Branch on the remote to start from [default: main].
    #[arg(value_name = "BASE_BRANCH")]
    pub base_branch: Option<String>,

    /// Local branch to create, or reset if it exists [default: chem-search-rebuild].
    #[arg(value_name = "NEW_BRANCH")]
    pub new_branch: Option<String>,

    /// Commit range to cherry-pick, as FROM..TO (FROM excluded).
    #[arg(short = 'r', long = "range", value_name = "FROM..TO")]
    pub range: Option<PickRange>,

    /// Repository to operate on.
    #[arg(short = 'C', long = "repo", value_name = "DIR", default_value = ".")]
    pub repo: PathBuf,
}

impl RebuildArgs {
    /// Apply the given arguments as configuration overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be set.
    pub fn apply_overrides(&self, mut loader: ConfigLoader) -> Result<ConfigLoader> {
        if let Some(ref remote) = self.remote {
            loader = loader.set("git.remote", remote.as_str())?;
        }
        if let Some(ref base_branch) = self.base_branch {
            loader = loader.set("git.base_branch", base_branch.as_str())?;
        }
        if let Some(ref new_branch) = self.new_branch {
            loader = loader.set("git.new_branch", new_branch.as_str())?;
        }
        if let Some(ref range) = self.range {
            loader = loader.set("git.pick_range", range.to_string())?;
        }
        Ok(loader)
    }
}
