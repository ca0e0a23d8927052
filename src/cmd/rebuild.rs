// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rebuild command implementation.

use std::io::{self, Write};

use tracing::{debug, info};

use crate::cli::rebuild::RebuildArgs;
use crate::config::Config;
use crate::error::{RebuildError, Result};
use crate::git::backend::{GixBackend, ShellBackend};
use crate::rebuild::{Orchestrator, RebuildOutcome, RebuildPlan};

/// Run a rebuild (or print its plan when `global.dry` is set).
///
/// # Errors
///
/// Returns an error if the repository is missing or a git step fails. A
/// cherry-pick conflict is returned as [`RebuildOutcome::Conflicted`].
pub fn run_rebuild_command(args: &RebuildArgs, config: &Config) -> Result<RebuildOutcome> {
    let plan = RebuildPlan::from_config(&config.git);
    info!(
        repo = %args.repo.display(),
        remote = plan.remote(),
        base_branch = plan.base_branch(),
        new_branch = plan.new_branch(),
        range = %plan.pick_range(),
        dry = config.global.dry,
        "starting rebuild"
    );

    let mutation = ShellBackend;
    let query = GixBackend;
    let mut orchestrator = Orchestrator::new(&args.repo, &mutation, &query);
    let mut out = io::stdout().lock();

    let result = if config.global.dry {
        orchestrator.dry_run(&plan, &mut out)
    } else {
        orchestrator.run(&plan, &mut out)
    };

    result.map_err(|e| {
        debug!(state = ?orchestrator.state(), error = %e, "rebuild failed");
        e.into()
    })
}

/// Report a failed run on `out`.
///
/// A failed git command is reported by git's own stderr, verbatim and
/// without a prefix. Anything else gets an `Error:` line with its causes.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_failure<W: Write>(out: &mut W, err: &anyhow::Error) -> io::Result<()> {
    match err
        .downcast_ref::<RebuildError>()
        .and_then(RebuildError::git_stderr)
    {
        Some(stderr) => writeln!(out, "{stderr}"),
        None => writeln!(out, "Error: {err:#}"),
    }
}

/// Exit status for a failed run.
///
/// Git's own exit code when a git command failed, otherwise 1.
#[must_use]
pub fn failure_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<RebuildError>()
        .and_then(RebuildError::exit_code)
        .map_or(1, |code| u8::try_from(code.clamp(1, 255)).unwrap_or(1))
}
