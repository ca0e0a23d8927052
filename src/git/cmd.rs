// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command lines and the shell runner.
//!
//! ```text
//! fetch_args / switch_args / cherry_pick_args
//!          |                      |
//!          v                      v
//!      run_git()             dry-run report
//!   which("git") -> spawn -> GitOutput { code, stdout, stderr }
//! ```
//!
//! The argument builders are shared with the dry-run report so the printed
//! plan is exactly what would be executed.

use std::path::Path;
use std::process::Command;

use tracing::{debug, trace};

use crate::error::{ProcessError, RebuildResult};
use crate::rebuild::range::PickRange;

/// Captured result of a finished git process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code, `None` if git was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// `git fetch --quiet <remote> <branch>`
#[must_use]
pub fn fetch_args(remote: &str, branch: &str) -> Vec<String> {
    vec![
        "fetch".to_string(),
        "--quiet".to_string(),
        remote.to_string(),
        branch.to_string(),
    ]
}

/// `git switch --quiet --no-track -C <branch> <start_point>`
///
/// `-C` resets an existing branch of the same name instead of failing.
#[must_use]
pub fn switch_args(branch: &str, start_point: &str) -> Vec<String> {
    vec![
        "switch".to_string(),
        "--quiet".to_string(),
        "--no-track".to_string(),
        "-C".to_string(),
        branch.to_string(),
        start_point.to_string(),
    ]
}

/// `git cherry-pick <from>..<to>`
#[must_use]
pub fn cherry_pick_args(range: &PickRange) -> Vec<String> {
    vec!["cherry-pick".to_string(), range.to_string()]
}

/// Render a command line for display and logging.
#[must_use]
pub fn command_line<S: AsRef<str>>(args: &[S]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        line.push_str(arg.as_ref());
    }
    line
}

/// Run git and capture its output without judging the exit status.
///
/// Always sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0` so a
/// missing credential fails the fetch instead of blocking on a prompt.
///
/// # Errors
///
/// Returns a `ProcessError` if git is not on `PATH` or cannot be spawned.
pub fn run_git<S: AsRef<str>>(args: &[S], cwd: &Path) -> RebuildResult<GitOutput> {
    let git = which::which("git").map_err(|_| ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    })?;
    let line = command_line(args);
    debug!(command = %line, cwd = %cwd.display(), "running git");

    let output = Command::new(git)
        .args(args.iter().map(AsRef::as_ref))
        .current_dir(cwd)
        .env("GCM_INTERACTIVE", "never")
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .map_err(|source| ProcessError::SpawnFailed {
            command: line.clone(),
            source,
        })?;

    let result = GitOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    };
    trace!(command = %line, code = ?result.code, stdout = %result.stdout, stderr = %result.stderr, "git finished");
    Ok(result)
}
