// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. rebuild.toml (cwd, unless --no-default-inis)
//! 3. --ini files, in order
//! 4. REBUILD_* env vars
//! 5. CLI flags and positional arguments
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! REBUILD_GLOBAL__DRY=true          → global.dry = true
//! REBUILD_GIT__BASE_BRANCH=develop  → git.base_branch = "develop"
//! REBUILD_GIT__PICK_RANGE=a1..b2    → git.pick_range = "a1..b2"
//! ```
//!
//! # Example
//!
//! ```toml
//! [global]
//! output_log_level = 3
//!
//! [git]
//! remote = "upstream"
//! new_branch = "search-rebuild-2"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig};

/// File picked up from the current directory unless disabled.
pub const DEFAULT_CONFIG_FILE: &str = "rebuild.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "REBUILD";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Branch and range to rebuild.
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use branch_rebuild::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("rebuild.toml")
    ///     .with_env_prefix("REBUILD")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, or an error
    /// if it cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Format the effective options as aligned `key = value` lines, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("global.dry", self.global.dry.to_string());
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(log_file) = &self.global.log_file {
            options.insert("global.log_file", log_file.display().to_string());
        }
        options.insert("git.remote", self.git.remote.clone());
        options.insert("git.base_branch", self.git.base_branch.clone());
        options.insert("git.new_branch", self.git.new_branch.clone());
        options.insert("git.pick_range", self.git.pick_range.to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
