// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for hdn-make.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, OutputConfig, TargetConfig, DefaultsPolicy,
//!         OptimizationMarkers, ProjectSettings, [SolutionDecl]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{HdnError, HdnResult};
use crate::logging::{LogConfig, LogLevel};
use crate::project::{Category, DEFAULT_SOURCE_DIR};
use crate::target::{DevEnv, Optimization, Platform, TargetMatrix, parse_flags};

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log what would be emitted instead of writing manifests.
    pub dry: bool,
    /// Log level for stderr output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Log file, none by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

impl GlobalConfig {
    /// Logging setup described by the `[global]` section.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.output_log_level)
            .with_file_level(self.file_log_level)
            .maybe_with_log_file(self.log_file.as_ref().map(|p| p.display().to_string()))
            .build()
    }
}

/// Where emitted manifests go.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("build/solutions"),
        }
    }
}

/// Target matrix by axis flag names, e.g. `platforms = ["win32", "win64"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    pub platforms: Vec<String>,
    pub environments: Vec<String>,
    pub optimizations: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        let names = |names: &[&str]| names.iter().map(ToString::to_string).collect();
        Self {
            platforms: names(&["win32", "win64"]),
            environments: names(&["vs2022"]),
            optimizations: names(&["debug", "release", "retail"]),
        }
    }
}

impl TargetConfig {
    /// Parses the axis names into a matrix.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown name and
    /// `MatrixError::InvalidMatrix` for an empty axis.
    pub fn to_matrix(&self, section: &str) -> HdnResult<TargetMatrix> {
        let platforms: Platform = parse_flags(&self.platforms, section, "platforms")?;
        let environments: DevEnv = parse_flags(&self.environments, section, "environments")?;
        let optimizations: Optimization =
            parse_flags(&self.optimizations, section, "optimizations")?;

        TargetMatrix::new(platforms, environments, optimizations).map_err(HdnError::from)
    }
}

/// Settings every project starts from (`[project]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSettings {
    pub category: Category,
    pub source_dir: String,
    /// Projects this one links against. Declared first.
    pub dependencies: Vec<String>,
    /// Extra defines, added after the optimization marker.
    pub defines: Vec<String>,
    pub disabled_warnings: Vec<String>,
    /// Raw compiler switches.
    pub additional_options: Vec<String>,
    /// Matrix of the project; `[target]` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetConfig>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            category: Category::default(),
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            dependencies: Vec::new(),
            defines: Vec::new(),
            disabled_warnings: Vec::new(),
            additional_options: Vec::new(),
            targets: None,
        }
    }
}

/// One `[[solutions]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolutionDecl {
    pub name: String,
    /// Projects in solution order; each is built for every solution cell.
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup: Option<String>,
    /// Matrix of the solution; `[target]` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetConfig>,
}
