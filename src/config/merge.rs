// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project settings merging.
//!
//! ```text
//! ProjectSettings + ProjectOverride --> field-by-field merge
//! ```
//!
//! Only explicitly set fields (`Some`) in the override replace base values.
//! Lists are replaced, not appended.

use serde::{Deserialize, Serialize};

use super::types::{ProjectSettings, TargetConfig};
use crate::project::Category;

/// Project settings with optional fields for field-level merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetConfig>,
}

/// Merge project-specific settings over `[project]`.
pub(super) fn merge_project_settings(
    base: &ProjectSettings,
    override_config: &ProjectOverride,
) -> ProjectSettings {
    ProjectSettings {
        category: override_config.category.unwrap_or(base.category),
        source_dir: override_config
            .source_dir
            .clone()
            .unwrap_or_else(|| base.source_dir.clone()),
        dependencies: override_config
            .dependencies
            .clone()
            .unwrap_or_else(|| base.dependencies.clone()),
        defines: override_config
            .defines
            .clone()
            .unwrap_or_else(|| base.defines.clone()),
        disabled_warnings: override_config
            .disabled_warnings
            .clone()
            .unwrap_or_else(|| base.disabled_warnings.clone()),
        additional_options: override_config
            .additional_options
            .clone()
            .unwrap_or_else(|| base.additional_options.clone()),
        targets: override_config
            .targets
            .clone()
            .or_else(|| base.targets.clone()),
    }
}
