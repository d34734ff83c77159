// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Optimization-level specialization.
//!
//! ```text
//! DEBUG   --> _HDN_DEBUG
//! RELEASE --> _HDN_RELEASE
//! RETAIL  --> _HDN_RETAIL
//! other   --> UnrecognizedOptimizationLevel
//!
//! check() after the project callback: own marker present, no other marker
//! ```

use serde::{Deserialize, Serialize};

use super::Configuration;
use crate::error::{ConfigError, ConfigurationError};
use crate::target::Optimization;

/// Marker define emitted for each optimization level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizationMarkers {
    pub debug: String,
    pub release: String,
    pub retail: String,
}

impl Default for OptimizationMarkers {
    fn default() -> Self {
        Self {
            debug: "_HDN_DEBUG".to_string(),
            release: "_HDN_RELEASE".to_string(),
            retail: "_HDN_RETAIL".to_string(),
        }
    }
}

impl OptimizationMarkers {
    /// Returns the marker for exactly one recognized optimization level.
    #[must_use]
    pub fn marker(&self, optimization: Optimization) -> Option<&str> {
        if optimization == Optimization::DEBUG {
            Some(&self.debug)
        } else if optimization == Optimization::RELEASE {
            Some(&self.release)
        } else if optimization == Optimization::RETAIL {
            Some(&self.retail)
        } else {
            None
        }
    }

    /// Checks that every level has its own non-empty marker.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty marker or a marker
    /// shared by two levels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let levels = [
            ("debug", &self.debug),
            ("release", &self.release),
            ("retail", &self.retail),
        ];
        for (i, (key, marker)) in levels.iter().enumerate() {
            let invalid = |message: String| ConfigError::InvalidValue {
                section: "markers".to_string(),
                key: (*key).to_string(),
                message,
            };
            if marker.trim().is_empty() {
                return Err(invalid("marker define must not be empty".to_string()));
            }
            if let Some((other, _)) = levels[..i].iter().find(|(_, m)| m == marker) {
                return Err(invalid(format!("'{marker}' is already the {other} marker")));
            }
        }
        Ok(())
    }

    /// Adds the marker for `optimization` and removes the other two.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::UnrecognizedOptimizationLevel` unless
    /// `optimization` is exactly one of debug, release or retail.
    pub fn apply(
        &self,
        conf: &mut Configuration,
        optimization: Optimization,
    ) -> Result<(), ConfigurationError> {
        let marker = self.marker(optimization).ok_or_else(|| {
            ConfigurationError::UnrecognizedOptimizationLevel {
                cell: conf.cell().to_string(),
                bits: optimization.bits(),
            }
        })?;

        for other in [&self.debug, &self.release, &self.retail] {
            if other != marker {
                conf.remove_define(other);
            }
        }
        conf.add_define(marker);
        Ok(())
    }

    /// Checks that `conf` carries the marker of `optimization` and no other.
    ///
    /// # Errors
    ///
    /// - `UnrecognizedOptimizationLevel` as for [`apply`](Self::apply).
    /// - `MarkerConflict` if the marker was removed or another level's
    ///   marker was added.
    pub fn check(
        &self,
        conf: &Configuration,
        optimization: Optimization,
    ) -> Result<(), ConfigurationError> {
        let marker = self.marker(optimization).ok_or_else(|| {
            ConfigurationError::UnrecognizedOptimizationLevel {
                cell: conf.cell().to_string(),
                bits: optimization.bits(),
            }
        })?;

        let found: Vec<&str> = [&self.debug, &self.release, &self.retail]
            .into_iter()
            .filter(|m| conf.defines().contains(m.as_str()))
            .map(String::as_str)
            .collect();
        if found != [marker] {
            return Err(ConfigurationError::MarkerConflict {
                cell: conf.cell().to_string(),
                expected: marker.to_string(),
                found: found.join(", "),
            });
        }
        Ok(())
    }
}
