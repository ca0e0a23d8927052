// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::range::PickRange;
use super::report::{Step, step_line};
use super::{Orchestrator, RebuildOutcome, RebuildPlan, RebuildState};
use crate::error::{GitError, RebuildError, RebuildResult};
use crate::git::backend::{GitMutation, GitQuery, InProgress};
use std::cell::{Cell, RefCell};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum PickBehavior {
    #[default]
    Applies,
    Conflicts,
    Fails,
}

/// In-memory git that records every mutating call.
#[derive(Default)]
struct FakeGit {
    calls: RefCell<Vec<String>>,
    not_a_repo: bool,
    fetch_fails: bool,
    branch_fails: bool,
    dirty: bool,
    pick: PickBehavior,
    in_progress: Cell<Option<InProgress>>,
    conflicted: Vec<String>,
}

impl FakeGit {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl GitMutation for FakeGit {
    fn fetch(&self, _repo_path: &Path, remote: &str, branch: &str) -> RebuildResult<()> {
        self.record(format!("fetch {remote} {branch}"));
        if self.fetch_fails {
            return Err(GitError::FetchFailed {
                remote: remote.to_string(),
                branch: branch.to_string(),
                message: "fatal: couldn't find remote ref".to_string(),
                code: Some(128),
            }
            .into());
        }
        Ok(())
    }

    fn force_create_branch(
        &self,
        _repo_path: &Path,
        branch: &str,
        start_point: &str,
    ) -> RebuildResult<()> {
        self.record(format!("switch {branch} {start_point}"));
        if self.branch_fails {
            return Err(GitError::BranchCreateFailed {
                branch: branch.to_string(),
                start_point: start_point.to_string(),
                message: "fatal: invalid reference".to_string(),
                code: Some(128),
            }
            .into());
        }
        Ok(())
    }

    fn cherry_pick(&self, _repo_path: &Path, range: &PickRange) -> RebuildResult<()> {
        self.record(format!("cherry-pick {range}"));
        let code = match self.pick {
            PickBehavior::Applies => return Ok(()),
            PickBehavior::Conflicts => {
                self.in_progress.set(Some(InProgress::CherryPickSequence));
                Some(1)
            }
            PickBehavior::Fails => Some(128),
        };
        Err(GitError::CherryPickFailed {
            range: range.to_string(),
            message: "error: could not apply".to_string(),
            code,
        }
        .into())
    }
}

impl GitQuery for FakeGit {
    fn is_git_repo(&self, _path: &Path) -> bool {
        !self.not_a_repo
    }

    fn current_branch(&self, _path: &Path) -> RebuildResult<Option<String>> {
        Ok(Some("main".to_string()))
    }

    fn head_short_id(&self, _path: &Path) -> RebuildResult<String> {
        self.record("head".to_string());
        Ok("abc1234".to_string())
    }

    fn has_uncommitted_changes(&self, _path: &Path) -> RebuildResult<bool> {
        Ok(self.dirty)
    }

    fn operation_in_progress(&self, _path: &Path) -> RebuildResult<Option<InProgress>> {
        Ok(self.in_progress.get())
    }

    fn conflicted_paths(&self, _path: &Path) -> RebuildResult<Vec<String>> {
        Ok(self.conflicted.clone())
    }
}

fn run(git: &FakeGit, plan: &RebuildPlan) -> (RebuildResult<RebuildOutcome>, RebuildState, String) {
    let mut out = Vec::new();
    let mut orchestrator = Orchestrator::new(Path::new("."), git, git);
    let result = orchestrator.run(plan, &mut out);
    let output = String::from_utf8(out).expect("report is utf-8");
    (result, orchestrator.state(), output)
}

fn git_error(err: &RebuildError) -> &GitError {
    match err {
        RebuildError::Git(git) => git,
        other => panic!("expected a git error, got {other:?}"),
    }
}

// =============================================================================
// Plan
// =============================================================================

#[test]
fn test_default_plan_matches_explicit_defaults() {
    let explicit = RebuildPlan::builder()
        .with_remote("origin")
        .with_base_branch("main")
        .with_new_branch("chem-search-rebuild")
        .build();
    assert_eq!(RebuildPlan::default(), explicit);
    assert_eq!(explicit.start_point(), "origin/main");
    assert_eq!(explicit.pick_range(), &PickRange::default());
}

#[test]
fn test_plan_command_lines() {
    let plan = RebuildPlan::builder()
        .with_remote("upstream")
        .with_base_branch("develop")
        .with_new_branch("topic")
        .with_pick_range(PickRange::new("a1", "b2"))
        .build();
    assert_eq!(
        plan.command_lines(),
        [
            "git fetch --quiet upstream develop".to_string(),
            "git switch --quiet --no-track -C topic upstream/develop".to_string(),
            "git cherry-pick a1..b2".to_string(),
        ]
    );
}

#[test]
fn test_step_line_numbering() {
    assert_eq!(step_line(Step::Fetch, "x"), "[1/5] x");
    assert_eq!(step_line(Step::NextSteps, "y"), "[5/5] y");
}

// =============================================================================
// Success path
// =============================================================================

#[test]
fn test_run_success_executes_steps_in_order() {
    let git = FakeGit::default();
    let (result, state, output) = run(&git, &RebuildPlan::default());

    assert_eq!(
        result.unwrap(),
        RebuildOutcome::Completed {
            branch: "chem-search-rebuild".to_string(),
            tip: "abc1234".to_string(),
        }
    );
    assert_eq!(state, RebuildState::Done);
    assert_eq!(
        git.calls(),
        vec![
            "fetch origin main",
            "switch chem-search-rebuild origin/main",
            "cherry-pick 9d1c4b2..f3a7e85",
            "head",
        ]
    );
    insta::assert_snapshot!(output.trim_end(), @r"
    [1/5] Fetching origin/main
    [2/5] Creating branch chem-search-rebuild from origin/main
    [3/5] Cherry-picking 9d1c4b2..f3a7e85
    [4/5] Cherry-pick succeeded: chem-search-rebuild is now at abc1234
    [5/5] Verify the behavior, then push the branch and open a pull request:
          git push -u origin chem-search-rebuild
    ");
}

#[test]
fn test_run_is_repeatable_with_same_branch() {
    let git = FakeGit::default();
    let plan = RebuildPlan::default();
    let (first, _, _) = run(&git, &plan);
    let (second, state, _) = run(&git, &plan);

    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(state, RebuildState::Done);
    let switches = git
        .calls()
        .into_iter()
        .filter(|call| call.starts_with("switch"))
        .count();
    assert_eq!(switches, 2);
}

#[test]
fn test_dirty_working_tree_does_not_block() {
    let git = FakeGit {
        dirty: true,
        ..FakeGit::default()
    };
    let (result, state, _) = run(&git, &RebuildPlan::default());
    assert!(result.is_ok());
    assert_eq!(state, RebuildState::Done);
}

// =============================================================================
// Failure paths
// =============================================================================

#[test]
fn test_fetch_failure_stops_before_branching() {
    let git = FakeGit {
        fetch_fails: true,
        ..FakeGit::default()
    };
    let (result, state, output) = run(&git, &RebuildPlan::default());

    let err = result.expect_err("fetch failure must abort");
    assert!(matches!(git_error(&err), GitError::FetchFailed { .. }));
    assert_eq!(err.exit_code(), Some(128));
    assert_eq!(state, RebuildState::Failed);
    assert_eq!(git.calls(), vec!["fetch origin main"]);
    assert_eq!(output, "[1/5] Fetching origin/main\n");
}

#[test]
fn test_branch_failure_stops_before_cherry_pick() {
    let git = FakeGit {
        branch_fails: true,
        ..FakeGit::default()
    };
    let (result, state, _) = run(&git, &RebuildPlan::default());

    let err = result.expect_err("branch failure must abort");
    assert!(matches!(git_error(&err), GitError::BranchCreateFailed { .. }));
    assert_eq!(state, RebuildState::Failed);
    assert!(!git.calls().iter().any(|call| call.starts_with("cherry-pick")));
}

#[test]
fn test_cherry_pick_failure_without_state_is_an_error() {
    let git = FakeGit {
        pick: PickBehavior::Fails,
        ..FakeGit::default()
    };
    let (result, state, output) = run(&git, &RebuildPlan::default());

    let err = result.expect_err("bad revision must abort");
    assert!(matches!(git_error(&err), GitError::CherryPickFailed { .. }));
    assert_eq!(err.exit_code(), Some(128));
    assert_eq!(state, RebuildState::Failed);
    assert!(!output.contains("--continue"));
}

#[test]
fn test_not_a_repository_runs_nothing() {
    let git = FakeGit {
        not_a_repo: true,
        ..FakeGit::default()
    };
    let (result, state, output) = run(&git, &RebuildPlan::default());

    let err = result.expect_err("must refuse outside a repository");
    assert!(matches!(git_error(&err), GitError::RepoNotFound { .. }));
    assert_eq!(state, RebuildState::Failed);
    assert!(git.calls().is_empty());
    assert!(output.is_empty());
}

// =============================================================================
// Conflict path
// =============================================================================

#[test]
fn test_conflict_prints_guidance_and_stops() {
    let git = FakeGit {
        pick: PickBehavior::Conflicts,
        conflicted: vec!["search/index.py".to_string(), "README.md".to_string()],
        ..FakeGit::default()
    };
    let (result, state, output) = run(&git, &RebuildPlan::default());

    let outcome = result.expect("a conflict is an outcome, not an error");
    assert_eq!(
        outcome,
        RebuildOutcome::Conflicted {
            range: PickRange::default()
        }
    );
    assert_eq!(outcome.exit_status(), 1);
    assert_eq!(state, RebuildState::Conflicted);
    assert!(state.is_terminal());
    // No completion report and no attempt to read the new tip.
    assert!(!output.contains("[4/5]"));
    assert!(!git.calls().contains(&"head".to_string()));
    insta::assert_snapshot!(output.trim_end(), @r"
    [1/5] Fetching origin/main
    [2/5] Creating branch chem-search-rebuild from origin/main
    [3/5] Cherry-picking 9d1c4b2..f3a7e85

    Cherry-pick of 9d1c4b2..f3a7e85 stopped with conflicts.
    Conflicted files:
          search/index.py
          README.md
    Resolve them, then either:
      a) stage the resolved files and continue:
           git add <resolved files>
           git cherry-pick --continue
      b) give up and restore the branch:
           git cherry-pick --abort
    ");
}

#[test]
fn test_conflict_without_known_paths_keeps_generic_guidance() {
    let git = FakeGit {
        pick: PickBehavior::Conflicts,
        ..FakeGit::default()
    };
    let (result, _, output) = run(&git, &RebuildPlan::default());

    assert_eq!(result.unwrap().exit_status(), 1);
    assert!(output.contains("Resolve the conflicted files, then either:"));
    assert!(!output.contains("Conflicted files:"));
}

// =============================================================================
// Dry run
// =============================================================================

#[test]
fn test_dry_run_executes_nothing() {
    let git = FakeGit::default();
    let mut out = Vec::new();
    let mut orchestrator = Orchestrator::new(Path::new("."), &git, &git);
    let outcome = orchestrator
        .dry_run(&RebuildPlan::default(), &mut out)
        .unwrap();

    assert_eq!(outcome, RebuildOutcome::Planned);
    assert_eq!(outcome.exit_status(), 0);
    assert!(git.calls().is_empty());
    assert_eq!(orchestrator.state(), RebuildState::Start);

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("would run: git fetch --quiet origin main"));
    assert!(output.contains("would run: git cherry-pick 9d1c4b2..f3a7e85"));
}

// =============================================================================
// PickRange
// =============================================================================

#[test]
fn test_pick_range_parse_and_display() {
    let range: PickRange = "abc123..def456".parse().unwrap();
    assert_eq!(range, PickRange::new("abc123", "def456"));
    assert_eq!(range.to_string(), "abc123..def456");

    let symbolic: PickRange = "v1.2..HEAD~2".parse().unwrap();
    assert_eq!(symbolic, PickRange::new("v1.2", "HEAD~2"));
}

#[test]
fn test_pick_range_rejects_malformed() {
    for input in ["abc123", "abc..", "..def", "a...b", "a ..b", ""] {
        assert!(
            input.parse::<PickRange>().is_err(),
            "'{input}' should be rejected"
        );
    }
}

#[test]
fn test_pick_range_serde_as_string() {
    let range = PickRange::new("a1", "b2");
    assert_eq!(serde_json::to_string(&range).unwrap(), "\"a1..b2\"");
    let parsed: PickRange = serde_json::from_str("\"a1..b2\"").unwrap();
    assert_eq!(parsed, range);
    assert!(serde_json::from_str::<PickRange>("\"a1\"").is_err());
}
