// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!          rebuild::Orchestrator
//!              |            |
//!              v            v
//!      ,------------------------------,
//!      |       backend (traits)       |
//!      '--+------------------------+--'
//!         |                        |
//!         v                        v
//!     GitQuery                GitMutation
//!   (gix, read)              (CLI, write)
//!         |                        |
//!         v                        v
//!    GixBackend               ShellBackend
//!    .is_git_repo             .fetch
//!    .current_branch          .force_create_branch
//!    .head_short_id           .cherry_pick
//!    .has_uncommitted_changes      |
//!    .operation_in_progress        v
//!                            cmd::run_git
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for fetch, branch switching and cherry-pick.

pub mod backend;
pub mod cmd;
