// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args + Config --> cmd::run_* handlers
//!   rebuild, config (--show-config)
//! ```

pub mod config;
pub mod rebuild;
