// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Operator-facing progress report written to stdout.
//!
//! ```text
//! [1/5] Fetching origin/main
//! [2/5] Creating branch chem-search-rebuild from origin/main
//! [3/5] Cherry-picking 9d1c4b2..f3a7e85
//! [4/5] Cherry-pick succeeded: chem-search-rebuild is now at 1a2b3c4
//! [5/5] Verify the behavior, then push the branch and open a pull request:
//!       git push -u origin chem-search-rebuild
//! ```

use std::io::{self, Write};

use super::range::PickRange;

/// Number of numbered steps in a full run.
pub const TOTAL_STEPS: u8 = 5;

/// Indentation for lines that belong to a step.
const DETAIL_INDENT: &str = "      ";

/// The numbered steps of a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fetch,
    Branch,
    CherryPick,
    Complete,
    NextSteps,
}

impl Step {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Fetch => 1,
            Self::Branch => 2,
            Self::CherryPick => 3,
            Self::Complete => 4,
            Self::NextSteps => 5,
        }
    }
}

/// Format a numbered progress line, e.g. `[2/5] Creating branch ...`.
#[must_use]
pub fn step_line(step: Step, message: &str) -> String {
    format!("[{}/{TOTAL_STEPS}] {message}", step.number())
}

pub(crate) fn write_step<W: Write>(out: &mut W, step: Step, message: &str) -> io::Result<()> {
    writeln!(out, "{}", step_line(step, message))
}

pub(crate) fn write_detail<W: Write>(out: &mut W, detail: &str) -> io::Result<()> {
    writeln!(out, "{DETAIL_INDENT}{detail}")
}

/// Print the conflicted paths and the two ways out of a stopped cherry-pick.
///
/// The repository is left untouched; both commands are for the operator.
pub(crate) fn write_conflict_guidance<W: Write>(
    out: &mut W,
    range: &PickRange,
    conflicted: &[String],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Cherry-pick of {range} stopped with conflicts.")?;
    if conflicted.is_empty() {
        writeln!(out, "Resolve the conflicted files, then either:")?;
    } else {
        writeln!(out, "Conflicted files:")?;
        for path in conflicted {
            writeln!(out, "{DETAIL_INDENT}{path}")?;
        }
        writeln!(out, "Resolve them, then either:")?;
    }
    writeln!(out, "  a) stage the resolved files and continue:")?;
    writeln!(out, "       git add <resolved files>")?;
    writeln!(out, "       git cherry-pick --continue")?;
    writeln!(out, "  b) give up and restore the branch:")?;
    writeln!(out, "       git cherry-pick --abort")
}
