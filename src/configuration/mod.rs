// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-cell compiler configuration.
//!
//! ```text
//! Configuration::new(cell)          empty draft
//!   DefaultsPolicy::apply           /utf-8, /EHsc, /std:c++latest, /wd4201
//!   OptimizationMarkers::apply      _HDN_DEBUG | _HDN_RELEASE | _HDN_RETAIL
//!   project callback                project-specific defines/options
//!   seal()  --> SealedConfiguration (read-only)
//! ```
//!
//! Options keep insertion order; adding an option that is already present
//! does nothing. Defines and disabled warnings are sets.

pub mod defaults;
pub mod markers;

pub use defaults::DefaultsPolicy;
pub use markers::OptimizationMarkers;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize, Serializer};

use crate::target::Cell;

/// C++ exception handling model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionHandling {
    #[default]
    Enable,
    Disable,
}

/// C++ language standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CppStandard {
    #[serde(rename = "c++14")]
    Cpp14,
    #[serde(rename = "c++17")]
    Cpp17,
    #[serde(rename = "c++20")]
    Cpp20,
    #[default]
    Latest,
}

impl CppStandard {
    /// Value of MSVC's `/std:` switch.
    #[must_use]
    pub const fn as_msvc_flag_value(&self) -> &'static str {
        match self {
            Self::Cpp14 => "c++14",
            Self::Cpp17 => "c++17",
            Self::Cpp20 => "c++20",
            Self::Latest => "c++latest",
        }
    }
}

/// A single compiler option.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompilerOption {
    /// Exception handling model (`/EHsc`, `/EHs-c-`).
    Exceptions(ExceptionHandling),
    /// Language standard (`/std:...`).
    LanguageStandard(CppStandard),
    /// Raw switch passed to the compiler as-is.
    Additional(String),
}

impl std::fmt::Display for CompilerOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exceptions(ExceptionHandling::Enable) => write!(f, "/EHsc"),
            Self::Exceptions(ExceptionHandling::Disable) => write!(f, "/EHs-c-"),
            Self::LanguageStandard(std) => write!(f, "/std:{}", std.as_msvc_flag_value()),
            Self::Additional(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for CompilerOption {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl From<&str> for CompilerOption {
    fn from(raw: &str) -> Self {
        Self::Additional(raw.to_string())
    }
}

impl From<String> for CompilerOption {
    fn from(raw: String) -> Self {
        Self::Additional(raw)
    }
}

/// Mutable configuration for one project at one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    cell: Cell,
    options: Vec<CompilerOption>,
    defines: BTreeSet<String>,
    disabled_warnings: BTreeSet<String>,
}

impl Configuration {
    /// Creates an empty configuration for `cell`.
    #[must_use]
    pub const fn new(cell: Cell) -> Self {
        Self {
            cell,
            options: Vec::new(),
            defines: BTreeSet::new(),
            disabled_warnings: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn cell(&self) -> &Cell {
        &self.cell
    }

    /// Appends an option. Returns `false` if it was already present.
    pub fn add_option(&mut self, option: impl Into<CompilerOption>) -> bool {
        let option = option.into();
        if self.options.contains(&option) {
            return false;
        }
        self.options.push(option);
        true
    }

    /// Adds a preprocessor define. Returns `false` if it was already present.
    pub fn add_define(&mut self, define: impl Into<String>) -> bool {
        self.defines.insert(define.into())
    }

    /// Removes a preprocessor define. Returns `true` if it was present.
    pub fn remove_define(&mut self, define: &str) -> bool {
        self.defines.remove(define)
    }

    /// Suppresses a compiler warning by number (e.g. `"4201"`).
    pub fn disable_warning(&mut self, warning: impl Into<String>) -> bool {
        self.disabled_warnings.insert(warning.into())
    }

    #[must_use]
    pub fn options(&self) -> &[CompilerOption] {
        &self.options
    }

    #[must_use]
    pub const fn defines(&self) -> &BTreeSet<String> {
        &self.defines
    }

    #[must_use]
    pub const fn disabled_warnings(&self) -> &BTreeSet<String> {
        &self.disabled_warnings
    }

    /// Freezes the configuration.
    #[must_use]
    pub fn seal(self) -> SealedConfiguration {
        SealedConfiguration { inner: self }
    }
}

/// Read-only configuration produced at the end of a cell's declaration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedConfiguration {
    inner: Configuration,
}

impl SealedConfiguration {
    #[must_use]
    pub const fn cell(&self) -> &Cell {
        self.inner.cell()
    }

    #[must_use]
    pub fn options(&self) -> &[CompilerOption] {
        self.inner.options()
    }

    #[must_use]
    pub const fn defines(&self) -> &BTreeSet<String> {
        self.inner.defines()
    }

    #[must_use]
    pub const fn disabled_warnings(&self) -> &BTreeSet<String> {
        self.inner.disabled_warnings()
    }

    #[must_use]
    pub fn has_define(&self, define: &str) -> bool {
        self.inner.defines.contains(define)
    }

    /// Full compiler command-line fragment: options, then `/D` and `/wd` switches.
    #[must_use]
    pub fn command_line(&self) -> Vec<String> {
        self.options()
            .iter()
            .map(ToString::to_string)
            .chain(self.defines().iter().map(|d| format!("/D{d}")))
            .chain(self.disabled_warnings().iter().map(|w| format!("/wd{w}")))
            .collect()
    }
}

impl Serialize for SealedConfiguration {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Configuration", 4)?;
        state.serialize_field("cell", self.cell())?;
        state.serialize_field("options", self.options())?;
        state.serialize_field("defines", self.defines())?;
        state.serialize_field("disabled_warnings", self.disabled_warnings())?;
        state.end()
    }
}
