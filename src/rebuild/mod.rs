// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rebuild orchestration: fetch, re-branch, cherry-pick.
//!
//! ```text
//!  Start --fetch ok--> (fetched) --switch -C ok--> Branched
//!    |                    |                           |
//!    |                    |              +------------+------------+
//!    |                    |              |                         |
//!    |                    |          pick ok                  pick stopped
//!    v                    v              v                         v
//!  Failed <------------ Failed          Done                   Conflicted
//! (git exit code)                   [4/5] [5/5]          (guidance, exit 1)
//! ```
//!
//! Nothing is retried and nothing is undone: a conflicted cherry-pick is left
//! in progress for the operator to continue or abort.
//!
//! # Key Types
//!
//! | Type             | Purpose                                   |
//! |------------------|-------------------------------------------|
//! | `RebuildPlan`    | remote, base branch, new branch, range    |
//! | `Orchestrator`   | runs a plan against the git backends      |
//! | `RebuildState`   | where the last run stopped                |
//! | `RebuildOutcome` | completed, conflicted, or planned (dry)   |

pub mod range;
pub mod report;

#[cfg(test)]
mod tests;

use std::io::Write;
use std::path::Path;

use bon::Builder;
use tracing::{debug, info, warn};

use crate::config::types::GitConfig;
use crate::error::{GitError, RebuildResult};
use crate::git::backend::{GitMutation, GitQuery};
use crate::git::cmd::{cherry_pick_args, command_line, fetch_args, switch_args};

use range::PickRange;
use report::{Step, write_conflict_guidance, write_detail, write_step};

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BASE_BRANCH: &str = "main";
pub const DEFAULT_NEW_BRANCH: &str = "chem-search-rebuild";

/// What to rebuild, and from where.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct RebuildPlan {
    #[builder(into, setters(name = with_remote), default = DEFAULT_REMOTE.to_string())]
    remote: String,
    #[builder(into, setters(name = with_base_branch), default = DEFAULT_BASE_BRANCH.to_string())]
    base_branch: String,
    #[builder(into, setters(name = with_new_branch), default = DEFAULT_NEW_BRANCH.to_string())]
    new_branch: String,
    #[builder(setters(name = with_pick_range), default)]
    pick_range: PickRange,
}

impl Default for RebuildPlan {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RebuildPlan {
    #[must_use]
    pub fn from_config(git: &GitConfig) -> Self {
        Self::builder()
            .with_remote(git.remote.as_str())
            .with_base_branch(git.base_branch.as_str())
            .with_new_branch(git.new_branch.as_str())
            .with_pick_range(git.pick_range.clone())
            .build()
    }

    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    #[must_use]
    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    #[must_use]
    pub fn new_branch(&self) -> &str {
        &self.new_branch
    }

    #[must_use]
    pub const fn pick_range(&self) -> &PickRange {
        &self.pick_range
    }

    /// The remote-tracking ref the new branch starts from, e.g. `origin/main`.
    #[must_use]
    pub fn start_point(&self) -> String {
        format!("{}/{}", self.remote, self.base_branch)
    }

    /// The git command lines a run executes, in order.
    #[must_use]
    pub fn command_lines(&self) -> [String; 3] {
        [
            command_line(&fetch_args(&self.remote, &self.base_branch)),
            command_line(&switch_args(&self.new_branch, &self.start_point())),
            command_line(&cherry_pick_args(&self.pick_range)),
        ]
    }
}

/// Where a run currently is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebuildState {
    #[default]
    Start,
    /// The new branch exists at the remote base and is checked out.
    Branched,
    Done,
    /// A cherry-pick is in progress and needs the operator.
    Conflicted,
    /// A git step failed; its exit code is propagated.
    Failed,
}

impl RebuildState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Conflicted | Self::Failed)
    }
}

/// Result of a run that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// All commits applied; `tip` is the abbreviated id of the new branch head.
    Completed { branch: String, tip: String },
    /// The cherry-pick stopped with conflicts and is still in progress.
    Conflicted { range: PickRange },
    /// Dry run: the plan was printed, nothing was executed.
    Planned,
}

impl RebuildOutcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        match self {
            Self::Completed { .. } | Self::Planned => 0,
            Self::Conflicted { .. } => 1,
        }
    }
}

/// Runs a [`RebuildPlan`] in one repository.
///
/// Not safe to run concurrently with another instance on the same working
/// directory; nothing guards against it.
pub struct Orchestrator<'a, M, Q> {
    repo: &'a Path,
    mutation: &'a M,
    query: &'a Q,
    state: RebuildState,
}

impl<'a, M: GitMutation, Q: GitQuery> Orchestrator<'a, M, Q> {
    pub const fn new(repo: &'a Path, mutation: &'a M, query: &'a Q) -> Self {
        Self {
            repo,
            mutation,
            query,
            state: RebuildState::Start,
        }
    }

    #[must_use]
    pub const fn state(&self) -> RebuildState {
        self.state
    }

    fn transition(&mut self, next: RebuildState) {
        debug!(from = ?self.state, to = ?next, "rebuild state");
        self.state = next;
    }

    /// Record a failed step before handing its error back.
    fn check<T>(&mut self, result: RebuildResult<T>) -> RebuildResult<T> {
        if result.is_err() {
            self.transition(RebuildState::Failed);
        }
        result
    }

    fn ensure_repository(&mut self) -> RebuildResult<()> {
        if self.query.is_git_repo(self.repo) {
            return Ok(());
        }
        self.check(Err(GitError::RepoNotFound {
            path: self.repo.display().to_string(),
        }
        .into()))
    }

    /// Execute the plan, writing the step report to `out`.
    ///
    /// # Errors
    ///
    /// Returns the failing step's error unchanged: `FetchFailed`,
    /// `BranchCreateFailed`, a non-conflict `CherryPickFailed`, or
    /// `RepoNotFound` before anything runs. A conflict is not an error; it
    /// yields [`RebuildOutcome::Conflicted`].
    pub fn run<W: Write>(
        &mut self,
        plan: &RebuildPlan,
        out: &mut W,
    ) -> RebuildResult<RebuildOutcome> {
        self.ensure_repository()?;
        let start_point = plan.start_point();

        write_step(out, Step::Fetch, &format!("Fetching {start_point}"))?;
        info!(remote = plan.remote(), branch = plan.base_branch(), "fetching");
        let fetched = self
            .mutation
            .fetch(self.repo, plan.remote(), plan.base_branch());
        self.check(fetched)?;

        self.warn_if_dirty(plan.new_branch());

        write_step(
            out,
            Step::Branch,
            &format!("Creating branch {} from {start_point}", plan.new_branch()),
        )?;
        info!(branch = plan.new_branch(), start_point = %start_point, "creating branch");
        let branched = self
            .mutation
            .force_create_branch(self.repo, plan.new_branch(), &start_point);
        self.check(branched)?;
        self.transition(RebuildState::Branched);

        let range = plan.pick_range();
        write_step(out, Step::CherryPick, &format!("Cherry-picking {range}"))?;
        info!(range = %range, "cherry-picking");
        if let Err(err) = self.mutation.cherry_pick(self.repo, range) {
            if !self.cherry_pick_stopped() {
                return self.check(Err(err));
            }
            debug!(error = %err, "cherry-pick stopped with conflicts");
            self.transition(RebuildState::Conflicted);
            let conflicted = self.conflicted_paths();
            write_conflict_guidance(out, range, &conflicted)?;
            return Ok(RebuildOutcome::Conflicted {
                range: range.clone(),
            });
        }

        let tip = self.query.head_short_id(self.repo);
        let tip = self.check(tip)?;
        self.transition(RebuildState::Done);

        write_step(
            out,
            Step::Complete,
            &format!(
                "Cherry-pick succeeded: {} is now at {tip}",
                plan.new_branch()
            ),
        )?;
        write_step(
            out,
            Step::NextSteps,
            "Verify the behavior, then push the branch and open a pull request:",
        )?;
        write_detail(
            out,
            &format!("git push -u {} {}", plan.remote(), plan.new_branch()),
        )?;

        Ok(RebuildOutcome::Completed {
            branch: plan.new_branch().to_string(),
            tip,
        })
    }

    /// Print what [`Self::run`] would execute without touching the repository.
    ///
    /// # Errors
    ///
    /// Returns `RepoNotFound` if the working directory is not a git work tree.
    pub fn dry_run<W: Write>(
        &mut self,
        plan: &RebuildPlan,
        out: &mut W,
    ) -> RebuildResult<RebuildOutcome> {
        self.ensure_repository()?;
        let start_point = plan.start_point();
        let [fetch, switch, pick] = plan.command_lines();

        write_step(out, Step::Fetch, &format!("Fetching {start_point}"))?;
        write_detail(out, &format!("would run: {fetch}"))?;
        write_step(
            out,
            Step::Branch,
            &format!("Creating branch {} from {start_point}", plan.new_branch()),
        )?;
        write_detail(out, &format!("would run: {switch}"))?;
        write_step(
            out,
            Step::CherryPick,
            &format!("Cherry-picking {}", plan.pick_range()),
        )?;
        write_detail(out, &format!("would run: {pick}"))?;
        writeln!(out, "Dry run: the repository was not modified.")?;

        info!(branch = plan.new_branch(), "dry run finished");
        Ok(RebuildOutcome::Planned)
    }

    /// A failed cherry-pick counts as a conflict only if git left a
    /// resumable cherry-pick behind.
    fn cherry_pick_stopped(&self) -> bool {
        match self.query.operation_in_progress(self.repo) {
            Ok(Some(op)) => op.is_cherry_pick(),
            Ok(None) => false,
            Err(err) => {
                debug!(error = %err, "could not read repository state");
                false
            }
        }
    }

    fn conflicted_paths(&self) -> Vec<String> {
        self.query.conflicted_paths(self.repo).unwrap_or_else(|err| {
            debug!(error = %err, "could not list conflicted paths");
            Vec::new()
        })
    }

    fn warn_if_dirty(&self, branch: &str) {
        match self.query.has_uncommitted_changes(self.repo) {
            Ok(true) => {
                let current = self
                    .query
                    .current_branch(self.repo)
                    .ok()
                    .flatten()
                    .unwrap_or_else(|| "HEAD".to_string());
                warn!(
                    current = %current,
                    branch,
                    "working tree has uncommitted changes; git may carry them over or refuse to switch"
                );
            }
            Ok(false) => {}
            Err(err) => debug!(error = %err, "skipping working tree check"),
        }
    }
}
