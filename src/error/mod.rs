// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!       RebuildError (~16 bytes)
//!                 |
//!   +------+------+------+------+
//!   |      |      |      |      |
//!   v      v      v      v      v
//!  Git   Config Process  Io   (all boxed)
//!
//! Sub-errors (unboxed internally):
//!   Git     Gix, CommandFailed, FetchFailed,
//!           BranchCreateFailed, CherryPickFailed, RepoNotFound
//!   Config  ParseError, InvalidValue, NotFound
//!   Process ExecutableNotFound, SpawnFailed
//! ```
//!
//! A cherry-pick conflict is not an error: it is reported through
//! [`crate::rebuild::RebuildOutcome::Conflicted`].

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`RebuildError`].
pub type RebuildResult<T> = std::result::Result<T, RebuildError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~16 bytes on the stack.
#[derive(Debug, Error)]
pub enum RebuildError {
    /// Git operation failed.
    #[error(transparent)]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error(transparent)]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error(transparent)]
    Io(Box<std::io::Error>),
}

impl RebuildError {
    /// Exit code reported by the delegated git process, if this error came from one.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Git(err) => err.exit_code(),
            _ => None,
        }
    }

    /// What git printed on stderr when a git command failed.
    #[must_use]
    pub fn git_stderr(&self) -> Option<&str> {
        match self {
            Self::Git(err) => err.git_stderr(),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for RebuildError {
                fn from(err: $error) -> Self {
                    RebuildError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Failed to resolve HEAD to a commit.
    #[error("failed to resolve head commit")]
    HeadId(#[from] Box<gix::reference::head_id::Error>),

    /// Failed to read the index.
    #[error("failed to read index")]
    Index(#[from] Box<gix::worktree::open_index::Error>),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
///
/// Variants produced by a failed `git` invocation carry its exit code
/// (`None` when git was terminated by a signal).
#[derive(Debug, Error)]
pub enum GitError {
    /// Path is not inside a git work tree.
    #[error("not a git repository: {path}")]
    RepoNotFound { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed {
        command: String,
        message: String,
        code: Option<i32>,
    },

    /// Remote unreachable or branch missing on the remote.
    #[error("failed to fetch {remote}/{branch}: {message}")]
    FetchFailed {
        remote: String,
        branch: String,
        message: String,
        code: Option<i32>,
    },

    /// Local branch could not be created or reset.
    #[error("failed to create branch {branch} from {start_point}: {message}")]
    BranchCreateFailed {
        branch: String,
        start_point: String,
        message: String,
        code: Option<i32>,
    },

    /// Cherry-pick failed without leaving a resumable operation behind.
    #[error("failed to cherry-pick {range}: {message}")]
    CherryPickFailed {
        range: String,
        message: String,
        code: Option<i32>,
    },

    /// Error from gix library.
    #[error(transparent)]
    Gix(#[from] GixError),
}

impl GitError {
    /// Exit code of the failed git process, if any.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. }
            | Self::FetchFailed { code, .. }
            | Self::BranchCreateFailed { code, .. }
            | Self::CherryPickFailed { code, .. } => *code,
            Self::RepoNotFound { .. } | Self::Gix(_) => None,
        }
    }

    /// Git's own stderr for a failed command, if it printed anything.
    #[must_use]
    pub fn git_stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { message, .. }
            | Self::FetchFailed { message, .. }
            | Self::BranchCreateFailed { message, .. }
            | Self::CherryPickFailed { message, .. } => {
                Some(message.as_str()).filter(|m| !m.is_empty())
            }
            Self::RepoNotFound { .. } | Self::Gix(_) => None,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse config: {message}")]
    ParseError { message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}'")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
