// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```
//!
//! Both traits take `&self` so the orchestrator can be driven by fakes.

use std::path::Path;

use tracing::debug;

use crate::error::{GitError, GixError, RebuildResult};
use crate::rebuild::range::PickRange;

use super::cmd::{cherry_pick_args, command_line, fetch_args, run_git, switch_args};

/// A multi-step operation git left unfinished in the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InProgress {
    /// A single-commit cherry-pick stopped (`CHERRY_PICK_HEAD`).
    CherryPick,
    /// A multi-commit cherry-pick stopped (sequencer state).
    CherryPickSequence,
    Merge,
    Rebase,
    Revert,
    /// Anything else (am, bisect).
    Other,
}

impl InProgress {
    /// Whether `git cherry-pick --continue` / `--abort` apply.
    #[must_use]
    pub const fn is_cherry_pick(self) -> bool {
        matches!(self, Self::CherryPick | Self::CherryPickSequence)
    }
}

impl From<gix::state::InProgress> for InProgress {
    fn from(state: gix::state::InProgress) -> Self {
        use gix::state::InProgress as Gix;

        match state {
            Gix::CherryPick => Self::CherryPick,
            Gix::CherryPickSequence => Self::CherryPickSequence,
            Gix::Merge => Self::Merge,
            Gix::Rebase | Gix::RebaseInteractive => Self::Rebase,
            Gix::Revert | Gix::RevertSequence => Self::Revert,
            _ => Self::Other,
        }
    }
}

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(&self, path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(&self, path: &Path) -> RebuildResult<Option<String>>;

    /// Abbreviated id of the commit HEAD points to.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be resolved to a commit.
    fn head_short_id(&self, path: &Path) -> RebuildResult<String>;

    /// Check for staged or unstaged changes to tracked files.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or status check fails.
    fn has_uncommitted_changes(&self, path: &Path) -> RebuildResult<bool>;

    /// The unfinished operation the repository is in, if any.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery fails.
    fn operation_in_progress(&self, path: &Path) -> RebuildResult<Option<InProgress>>;

    /// Paths with unmerged entries in the index, sorted and without repeats.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the index cannot be read.
    fn conflicted_paths(&self, path: &Path) -> RebuildResult<Vec<String>>;
}

// --- Mutation Trait (Write operations) ---

/// Git operations that modify repository state.
pub trait GitMutation {
    /// Fetch a single branch from a remote.
    ///
    /// # Errors
    ///
    /// Returns `GitError::FetchFailed` if the remote is unreachable or the
    /// branch does not exist there.
    fn fetch(&self, repo_path: &Path, remote: &str, branch: &str) -> RebuildResult<()>;

    /// Create `branch` at `start_point` and check it out, resetting any
    /// existing branch of that name.
    ///
    /// # Errors
    ///
    /// Returns `GitError::BranchCreateFailed` if git rejects the branch or ref.
    fn force_create_branch(
        &self,
        repo_path: &Path,
        branch: &str,
        start_point: &str,
    ) -> RebuildResult<()>;

    /// Cherry-pick a commit range onto the current branch.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CherryPickFailed` on any failure, including a
    /// conflict. Callers tell the two apart with
    /// [`GitQuery::operation_in_progress`].
    fn cherry_pick(&self, repo_path: &Path, range: &PickRange) -> RebuildResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides read-only operations without spawning subprocesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct GixBackend;

impl GixBackend {
    fn discover(path: &Path) -> RebuildResult<gix::Repository> {
        gix::discover(path)
            .map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))).into())
    }
}

impl GitQuery for GixBackend {
    fn is_git_repo(&self, path: &Path) -> bool {
        gix::discover(path).is_ok_and(|repo| repo.workdir().is_some())
    }

    fn current_branch(&self, path: &Path) -> RebuildResult<Option<String>> {
        let repo = Self::discover(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn head_short_id(&self, path: &Path) -> RebuildResult<String> {
        let repo = Self::discover(path)?;
        let id = repo
            .head_id()
            .map_err(|e| GitError::Gix(GixError::HeadId(Box::new(e))))?;
        Ok(id.to_hex_with_len(7).to_string())
    }

    fn has_uncommitted_changes(&self, path: &Path) -> RebuildResult<bool> {
        use gix::status::UntrackedFiles;

        let repo = Self::discover(path)?;
        if repo.workdir().is_none() {
            return Err(GitError::Gix(GixError::BareRepository).into());
        }

        let has_changes = repo
            .status(gix::progress::Discard)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to prepare status check".to_string(),
                code: None,
            })?
            .untracked_files(UntrackedFiles::None)
            .into_iter(None)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to check repository status".to_string(),
                code: None,
            })?
            .next()
            .is_some();

        Ok(has_changes)
    }

    fn operation_in_progress(&self, path: &Path) -> RebuildResult<Option<InProgress>> {
        let repo = Self::discover(path)?;
        Ok(repo.state().map(InProgress::from))
    }

    fn conflicted_paths(&self, path: &Path) -> RebuildResult<Vec<String>> {
        use gix::index::entry::Stage;

        let repo = Self::discover(path)?;
        let index = repo
            .open_index()
            .map_err(|e| GitError::Gix(GixError::Index(Box::new(e))))?;
        let mut paths: Vec<String> = index
            .entries()
            .iter()
            .filter(|entry| entry.stage() != Stage::Unconflicted)
            .map(|entry| entry.path(&index).to_string())
            .collect();
        // Entries are ordered by path, then stage.
        paths.dedup();
        Ok(paths)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
///
/// Fetch goes through the user's credential helpers and SSH setup, and
/// cherry-pick needs git's merge machinery and sequencer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellBackend;

impl GitMutation for ShellBackend {
    fn fetch(&self, repo_path: &Path, remote: &str, branch: &str) -> RebuildResult<()> {
        let output = run_git(&fetch_args(remote, branch), repo_path)?;
        if output.success() {
            return Ok(());
        }
        Err(GitError::FetchFailed {
            remote: remote.to_string(),
            branch: branch.to_string(),
            message: output.stderr,
            code: output.code,
        }
        .into())
    }

    fn force_create_branch(
        &self,
        repo_path: &Path,
        branch: &str,
        start_point: &str,
    ) -> RebuildResult<()> {
        let output = run_git(&switch_args(branch, start_point), repo_path)?;
        if output.success() {
            return Ok(());
        }
        Err(GitError::BranchCreateFailed {
            branch: branch.to_string(),
            start_point: start_point.to_string(),
            message: output.stderr,
            code: output.code,
        }
        .into())
    }

    fn cherry_pick(&self, repo_path: &Path, range: &PickRange) -> RebuildResult<()> {
        let args = cherry_pick_args(range);
        let output = run_git(&args, repo_path)?;
        if output.success() {
            return Ok(());
        }
        debug!(command = %command_line(&args), code = ?output.code, "cherry-pick did not finish");
        Err(GitError::CherryPickFailed {
            range: range.to_string(),
            message: output.stderr,
            code: output.code,
        }
        .into())
    }
}
