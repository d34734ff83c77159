// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration sources.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(ini)            [file]      must exist
//!   .add_toml_file_optional(path)  [optional]  listed only if present
//!   .add_toml_str(content)         [string]
//!   .with_env_prefix("HDN")        HDN_GLOBAL__DRY=true --> global.dry
//!   .set(key, value)               --set and CLI flags, highest priority
//!        |
//!        v
//!    build() --> NotFound | ParseError | Config::validate --> Config
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::{File, FileFormat};
use tracing::debug;

use super::Config;
use crate::error::{ConfigError, HdnResult};

/// Separator between nesting levels in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Required,
    Optional,
    Inline,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Required => "file",
            Self::Optional => "optional",
            Self::Inline => "string",
        })
    }
}

#[derive(Debug, Clone)]
struct Source {
    kind: SourceKind,
    path: PathBuf,
}

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<Source>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    fn push_file(mut self, path: &Path, kind: SourceKind) -> Self {
        let required = kind == SourceKind::Required;
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        if required || path.exists() {
            self.sources.push(Source {
                kind,
                path: path.to_path_buf(),
            });
        }
        self
    }

    /// Adds a TOML file that `build()` requires to exist.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.push_file(path.as_ref(), SourceKind::Required)
    }

    /// Adds a TOML file that is skipped when missing.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.push_file(path.as_ref(), SourceKind::Optional)
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(Source {
            kind: SourceKind::Inline,
            path: PathBuf::from("<string>"),
        });
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Overrides one dotted key (`markers.retail`) above every other source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the key is not a valid path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> HdnResult<Self> {
        self.builder = self.builder.set_override(key, value).map_err(|e| {
            let (section, field) = key.rsplit_once('.').unwrap_or(("", key));
            ConfigError::InvalidValue {
                section: section.to_string(),
                key: field.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(self)
    }

    /// Merges every source and validates the result.
    ///
    /// # Errors
    ///
    /// - `ConfigError::NotFound` if a required file is missing.
    /// - `ConfigError::ParseError` if a source is not valid TOML, an
    ///   environment variable cannot be parsed, or the merged values do not
    ///   fit `Config`.
    /// - Whatever [`Config::validate`] rejects.
    pub fn build(self) -> HdnResult<Config> {
        if let Some(missing) = self
            .sources
            .iter()
            .find(|source| source.kind == SourceKind::Required && !source.path.exists())
        {
            return Err(ConfigError::NotFound(missing.path.display().to_string()).into());
        }

        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config = builder
            .build()
            .and_then(|merged| merged.try_deserialize::<Config>())
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;

        debug!(
            sources = self.sources.len(),
            solutions = config.solutions.len(),
            overrides = config.projects.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Numbered listing of the sources that contribute, lowest priority first.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. [{}] {}", i + 1, source.kind, source.path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
