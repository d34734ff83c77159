// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for hdn-make.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. --ini files (in order)
//! 3. local hdn.toml (cwd)
//! 4. HDN_* env vars
//! 5. --set overrides and CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! HDN_GLOBAL__DRY=true           → global.dry = true
//! HDN_OUTPUT__DIRECTORY=/out     → output.directory = "/out"
//! HDN_MARKERS__RETAIL=SHIPPING   → markers.retail = "SHIPPING"
//! ```
//!
//! # Project Overrides
//!
//! ```toml
//! [project]
//! category = "module"
//!
//! [projects.Playground]
//! category = "experimental"   # override for Playground only
//!
//! [projects."plugin_*"]
//! category = "plugin"         # override for every matching project
//! ```

pub mod loader;
pub mod merge;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use wax::Program as _;

use crate::configuration::{DefaultsPolicy, OptimizationMarkers};
use crate::emit::manifest::is_plain_file_name;
use crate::error::{ConfigError, HdnResult};

pub use loader::ConfigLoader;
pub use merge::ProjectOverride;
pub use types::{GlobalConfig, OutputConfig, ProjectSettings, SolutionDecl, TargetConfig};

/// Name of the optional configuration file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "hdn.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "HDN";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub output: OutputConfig,
    /// Default target matrix of projects and solutions.
    pub target: TargetConfig,
    pub defaults: DefaultsPolicy,
    pub markers: OptimizationMarkers,
    /// Settings shared by every project.
    pub project: ProjectSettings,
    /// Per-project overrides keyed by name or glob (field-level merging).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub projects: BTreeMap<String, ProjectOverride>,
    /// Solutions, registered in file order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub solutions: Vec<SolutionDecl>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hdn_make::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("hedron.toml")
    ///     .add_toml_file_optional("hdn.toml")
    ///     .with_env_prefix("HDN")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HdnResult<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> HdnResult<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Get the settings of one project.
    ///
    /// Resolution order:
    /// 1. Exact match on project name (e.g., `[projects.Playground]`)
    /// 2. Glob pattern match (e.g., `[projects."plugin_*"]`), first in key order
    /// 3. Default `[project]` settings
    ///
    /// Names compare case-insensitively.
    #[must_use]
    pub fn project_settings(&self, project_name: &str) -> ProjectSettings {
        if let Some(config) = self
            .projects
            .iter()
            .find_map(|(key, config)| key.eq_ignore_ascii_case(project_name).then_some(config))
        {
            return merge::merge_project_settings(&self.project, config);
        }

        let lowered = project_name.to_lowercase();
        for (pattern, config) in &self.projects {
            let pattern = pattern.to_lowercase();
            if let Ok(glob) = wax::Glob::new(&pattern)
                && glob.is_match(lowered.as_str())
            {
                return merge::merge_project_settings(&self.project, config);
            }
        }

        self.project.clone()
    }

    /// Check what deserialization cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` or `ConfigError::MissingKey` for an
    /// unknown axis name, markers that are empty or shared between levels, a
    /// solution name that is empty, duplicated or not a plain file name, or a
    /// startup project that is not one of the solution's projects.
    pub fn validate(&self) -> HdnResult<()> {
        self.target.to_matrix("target")?;
        self.markers.validate()?;

        let mut names = BTreeSet::new();
        for solution in &self.solutions {
            if solution.name.is_empty() {
                return Err(ConfigError::MissingKey {
                    section: "solutions".to_string(),
                    key: "name".to_string(),
                }
                .into());
            }
            if !is_plain_file_name(&solution.name) {
                return Err(ConfigError::InvalidValue {
                    section: "solutions".to_string(),
                    key: "name".to_string(),
                    message: format!("'{}' is not a valid file name", solution.name),
                }
                .into());
            }
            if !names.insert(solution.name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    section: "solutions".to_string(),
                    key: "name".to_string(),
                    message: format!("solution '{}' is declared twice", solution.name),
                }
                .into());
            }
            if let Some(targets) = &solution.targets {
                targets.to_matrix(&format!("solutions.{}.targets", solution.name))?;
            }
            if let Some(startup) = &solution.startup
                && !solution.projects.contains(startup)
            {
                return Err(ConfigError::InvalidValue {
                    section: format!("solutions.{}", solution.name),
                    key: "startup".to_string(),
                    message: format!("'{startup}' is not one of the solution's projects"),
                }
                .into());
            }
        }

        for (key, config) in &self.projects {
            if let Some(targets) = &config.targets {
                targets.to_matrix(&format!("projects.{key}.targets"))?;
            }
        }
        if let Some(targets) = &self.project.targets {
            targets.to_matrix("project.targets")?;
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_target_options(&mut options);
        self.format_defaults_options(&mut options);
        self.format_project_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        );
        options.insert(
            "output.directory".into(),
            self.output.directory.display().to_string(),
        );
    }

    fn format_target_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("target.platforms".into(), self.target.platforms.join(","));
        options.insert(
            "target.environments".into(),
            self.target.environments.join(","),
        );
        options.insert(
            "target.optimizations".into(),
            self.target.optimizations.join(","),
        );
    }

    fn format_defaults_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "defaults.additional_options".into(),
            self.defaults.additional_options.join(" "),
        );
        options.insert(
            "defaults.exceptions".into(),
            crate::configuration::CompilerOption::Exceptions(self.defaults.exceptions).to_string(),
        );
        options.insert(
            "defaults.cpp_standard".into(),
            self.defaults.cpp_standard.as_msvc_flag_value().to_string(),
        );
        options.insert(
            "defaults.disabled_warnings".into(),
            self.defaults.disabled_warnings.join(","),
        );
        if !self.defaults.defines.is_empty() {
            options.insert("defaults.defines".into(), self.defaults.defines.join(","));
        }
        options.insert("markers.debug".into(), self.markers.debug.clone());
        options.insert("markers.release".into(), self.markers.release.clone());
        options.insert("markers.retail".into(), self.markers.retail.clone());
    }

    fn format_project_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("project.category".into(), self.project.category.to_string());
        options.insert("project.source_dir".into(), self.project.source_dir.clone());
        if !self.projects.is_empty() {
            options.insert(
                "projects".into(),
                self.projects.keys().cloned().collect::<Vec<_>>().join(","),
            );
        }
        options.insert(
            "solutions".into(),
            self.solutions
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(","),
        );
    }
}
