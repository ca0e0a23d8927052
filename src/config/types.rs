// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! # Config Structure
//!
//! ```text
//! Config
//!   global  dry, output_log_level, file_log_level, log_file
//!   git     remote, base_branch, new_branch, pick_range
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::rebuild::range::PickRange;
use crate::rebuild::{DEFAULT_BASE_BRANCH, DEFAULT_NEW_BRANCH, DEFAULT_REMOTE};

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Print the plan without running git.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// What to rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Remote to fetch the base branch from.
    pub remote: String,
    /// Branch on the remote to start from.
    pub base_branch: String,
    /// Local branch to create or reset.
    pub new_branch: String,
    /// Commits to replay, as `<from>..<to>`.
    pub pick_range: PickRange,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            new_branch: DEFAULT_NEW_BRANCH.to_string(),
            pick_range: PickRange::default(),
        }
    }
}
