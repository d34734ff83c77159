// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --dry             ← Log instead of writing manifests
//! --log-level N     ← Console verbosity (0-5)
//! --file-log-level  ← File verbosity (overrides --log-level)
//! --output DIR      ← output.directory override
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: CLI flags > --set > env > hdn.toml > --ini > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::error::{ConfigError, HdnResult};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Logs what would be emitted without writing any manifest.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Directory manifests are written to.
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Sets an option, such as 'markers.retail=_HDN_SHIPPING'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    ///
    /// `--set` options come first so the dedicated flags win.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a `--set` option is not of the
    /// form `section.key=value`.
    pub fn to_config_overrides(&self) -> HdnResult<Vec<(String, String)>> {
        let mut overrides = self
            .options
            .iter()
            .map(|option| parse_override(option))
            .collect::<Result<Vec<_>, _>>()?;

        let mut push = |key: &str, value: String| overrides.push((key.to_string(), value));

        if let Some(level) = self.log_level {
            push("global.output_log_level", level.to_string());
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            push("global.file_log_level", level.to_string());
        }

        if let Some(ref path) = self.log_file {
            push("global.log_file", path.display().to_string());
        }

        if self.dry {
            push("global.dry", "true".to_string());
        }

        if let Some(ref output) = self.output {
            push("output.directory", output.display().to_string());
        }

        Ok(overrides)
    }
}

fn parse_override(option: &str) -> Result<(String, String), ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        section: "cli".to_string(),
        key: "set".to_string(),
        message: format!("{message}: '{option}'"),
    };

    let (key, value) = option
        .split_once('=')
        .ok_or_else(|| invalid("expected KEY=VALUE"))?;
    let key = key.trim();
    if key.is_empty() || !key.contains('.') {
        return Err(invalid("expected a dotted key such as 'global.dry'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
