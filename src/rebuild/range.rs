// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit range replayed onto the rebuilt branch.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Exclusive start of the default range (already on mainline).
pub const DEFAULT_PICK_FROM: &str = "9d1c4b2";

/// Inclusive end of the default range (tip of the feature work).
pub const DEFAULT_PICK_TO: &str = "f3a7e85";

/// A `<from>..<to>` revision range: every commit reachable from `to` but not
/// from `from`, applied oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PickRange {
    from: String,
    to: String,
}

impl PickRange {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Default for PickRange {
    fn default() -> Self {
        Self::new(DEFAULT_PICK_FROM, DEFAULT_PICK_TO)
    }
}

impl std::fmt::Display for PickRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

impl std::str::FromStr for PickRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            section: "git".to_string(),
            key: "pick_range".to_string(),
            message: format!("{message}, got '{s}'"),
        };

        let (from, to) = s
            .split_once("..")
            .ok_or_else(|| invalid("expected '<from>..<to>'"))?;
        // `a...b` is a symmetric difference, not an ordered range.
        if to.starts_with('.') {
            return Err(invalid("symmetric ranges ('...') are not supported"));
        }
        if from.is_empty() || to.is_empty() {
            return Err(invalid("both ends of the range are required"));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(invalid("revisions cannot contain whitespace"));
        }
        Ok(Self::new(from, to))
    }
}

impl TryFrom<String> for PickRange {
    type Error = ConfigError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PickRange> for String {
    fn from(range: PickRange) -> Self {
        range.to_string()
    }
}
