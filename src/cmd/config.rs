// branch-rebuild: Branch Rebuild Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `--show-config` output.

use std::io::{self, Write};

use crate::config::Config;

/// Print the effective options followed by the files they were read from.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_show_config<W: Write>(
    out: &mut W,
    config: &Config,
    config_files: &[String],
) -> io::Result<()> {
    for line in config.format_options() {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    if config_files.is_empty() {
        writeln!(out, "No configuration files loaded")
    } else {
        for line in config_files {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// Print the configuration to stdout.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn run_show_config_command(config: &Config, config_files: &[String]) -> io::Result<()> {
    write_show_config(&mut io::stdout().lock(), config, config_files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_config_without_files() {
        let mut out = Vec::new();
        write_show_config(&mut out, &Config::default(), &[]).expect("write to vec");
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.starts_with("git.base_branch"));
        assert!(text.ends_with("\nNo configuration files loaded\n"));
    }

    #[test]
    fn test_show_config_lists_files() {
        let mut out = Vec::new();
        let files = vec!["1. [optional] rebuild.toml".to_string()];
        write_show_config(&mut out, &Config::default(), &files).expect("write to vec");
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.ends_with("\n\n1. [optional] rebuild.toml\n"));
    }
}
