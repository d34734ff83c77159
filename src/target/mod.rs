// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Target matrix: the axes every configuration is specialized over.
//!
//! ```text
//! Platform     WIN32 | WIN64
//! DevEnv       VS2017 | VS2019 | VS2022
//! Optimization DEBUG | RELEASE | RETAIL
//!
//! TargetMatrix(WIN32|WIN64, VS2022, DEBUG|RELEASE|RETAIL)
//!   cells(): platform outer, env middle, optimization inner
//!     win32|vs2022|debug, win32|vs2022|release, win32|vs2022|retail,
//!     win64|vs2022|debug, ...                        (6 cells)
//! ```
//!
//! Flags are iterated in bit order, so the same matrix always yields the
//! same cell sequence.

use bitflags::{Flags, bitflags};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{ConfigError, MatrixError};

bitflags! {
    /// Target platforms.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Platform: u8 {
        /// 32-bit Windows.
        const WIN32 = 0x01;
        /// 64-bit Windows.
        const WIN64 = 0x02;
    }
}

bitflags! {
    /// Toolchain / IDE environments.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DevEnv: u8 {
        const VS2017 = 0x01;
        const VS2019 = 0x02;
        const VS2022 = 0x04;
    }
}

bitflags! {
    /// Optimization levels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Optimization: u8 {
        /// Unoptimized, full debug information.
        const DEBUG = 0x01;
        /// Optimized with internal tooling enabled.
        const RELEASE = 0x02;
        /// Fully optimized shipping build.
        const RETAIL = 0x04;
    }
}

/// One axis of the target matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetAxis {
    Platform,
    ToolchainEnvironment,
    OptimizationLevel,
}

impl std::fmt::Display for TargetAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Platform => write!(f, "platform"),
            Self::ToolchainEnvironment => write!(f, "toolchain environment"),
            Self::OptimizationLevel => write!(f, "optimization level"),
        }
    }
}

/// Lowercase name of a single flag, or its bits in hex when unnamed.
fn flag_name<F>(flag: F) -> String
where
    F: Flags<Bits = u8>,
{
    flag.iter_names().next().map_or_else(
        || format!("{:#04x}", flag.bits()),
        |(name, _)| name.to_lowercase(),
    )
}

/// Parse a list of lowercase flag names into a flag set.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a name is not a flag of `F`.
pub fn parse_flags<F, S>(names: &[S], section: &str, key: &str) -> Result<F, ConfigError>
where
    F: Flags,
    S: AsRef<str>,
{
    let mut flags = F::empty();
    for name in names {
        let name = name.as_ref();
        let flag = F::from_name(&name.to_uppercase()).ok_or_else(|| {
            let known: Vec<String> = F::FLAGS
                .iter()
                .map(|f| f.name().to_lowercase())
                .collect();
            ConfigError::InvalidValue {
                section: section.to_string(),
                key: key.to_string(),
                message: format!("unknown value '{name}', expected one of: {}", known.join(", ")),
            }
        })?;
        flags.insert(flag);
    }
    Ok(flags)
}

/// One concrete (platform, environment, optimization) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    platform: Platform,
    dev_env: DevEnv,
    optimization: Optimization,
}

impl Cell {
    #[must_use]
    pub const fn new(platform: Platform, dev_env: DevEnv, optimization: Optimization) -> Self {
        Self {
            platform,
            dev_env,
            optimization,
        }
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub const fn dev_env(&self) -> DevEnv {
        self.dev_env
    }

    #[must_use]
    pub const fn optimization(&self) -> Optimization {
        self.optimization
    }

    /// Platform name as Visual Studio spells it (`Win32`, `x64`).
    #[must_use]
    pub fn msbuild_platform(&self) -> String {
        if self.platform == Platform::WIN32 {
            "Win32".to_string()
        } else if self.platform == Platform::WIN64 {
            "x64".to_string()
        } else {
            flag_name(self.platform)
        }
    }

    /// Configuration name shown in the IDE (`Debug`, `Release`, `Retail`).
    #[must_use]
    pub fn configuration_name(&self) -> String {
        let name = flag_name(self.optimization);
        let mut chars = name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            flag_name(self.platform),
            flag_name(self.dev_env),
            flag_name(self.optimization)
        )
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Cell", 4)?;
        state.serialize_field("name", &self.configuration_name())?;
        state.serialize_field("platform", &self.msbuild_platform())?;
        state.serialize_field("environment", &flag_name(self.dev_env))?;
        state.serialize_field("optimization", &flag_name(self.optimization))?;
        state.end()
    }
}

/// Cross product of the three target axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetMatrix {
    platforms: Platform,
    environments: DevEnv,
    optimizations: Optimization,
}

impl TargetMatrix {
    /// Builds a matrix from one flag set per axis.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::InvalidMatrix` if any axis is empty.
    pub fn new(
        platforms: Platform,
        environments: DevEnv,
        optimizations: Optimization,
    ) -> Result<Self, MatrixError> {
        let axis = if platforms.is_empty() {
            Some(TargetAxis::Platform)
        } else if environments.is_empty() {
            Some(TargetAxis::ToolchainEnvironment)
        } else if optimizations.is_empty() {
            Some(TargetAxis::OptimizationLevel)
        } else {
            None
        };

        match axis {
            Some(axis) => Err(MatrixError::InvalidMatrix { axis }),
            None => Ok(Self {
                platforms,
                environments,
                optimizations,
            }),
        }
    }

    /// Both Windows platforms on VS2022, all three optimization levels.
    #[must_use]
    pub fn default_target() -> Self {
        Self {
            platforms: Platform::WIN32 | Platform::WIN64,
            environments: DevEnv::VS2022,
            optimizations: Optimization::DEBUG | Optimization::RELEASE | Optimization::RETAIL,
        }
    }

    #[must_use]
    pub const fn platforms(&self) -> Platform {
        self.platforms
    }

    #[must_use]
    pub const fn environments(&self) -> DevEnv {
        self.environments
    }

    #[must_use]
    pub const fn optimizations(&self) -> Optimization {
        self.optimizations
    }

    /// Yields every cell once: platform outer, environment middle,
    /// optimization inner.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let environments = self.environments;
        let optimizations = self.optimizations;
        self.platforms.iter().flat_map(move |platform| {
            environments.iter().flat_map(move |dev_env| {
                optimizations
                    .iter()
                    .map(move |optimization| Cell::new(platform, dev_env, optimization))
            })
        })
    }

    /// Number of cells, `|platforms| * |environments| * |optimizations|`.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.platforms.iter().count()
            * self.environments.iter().count()
            * self.optimizations.iter().count()
    }

    /// Whether `cell` is one of this matrix's cells.
    #[must_use]
    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells().any(|c| c == *cell)
    }
}

impl Default for TargetMatrix {
    fn default() -> Self {
        Self::default_target()
    }
}

impl std::fmt::Display for TargetMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |names: Vec<String>| names.join(",");
        write!(
            f,
            "[{}] x [{}] x [{}]",
            join(self.platforms.iter().map(flag_name).collect()),
            join(self.environments.iter().map(flag_name).collect()),
            join(self.optimizations.iter().map(flag_name).collect()),
        )
    }
}
