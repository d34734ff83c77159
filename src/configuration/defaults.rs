// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Base policy applied to every project configuration.

use serde::{Deserialize, Serialize};

use super::{CompilerOption, Configuration, CppStandard, ExceptionHandling};

/// Options, warnings and defines every configuration starts from.
///
/// Loaded from the `[defaults]` section; the defaults match what every
/// Hedron C++ project is built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsPolicy {
    /// Raw compiler switches, applied first.
    pub additional_options: Vec<String>,
    pub exceptions: ExceptionHandling,
    pub cpp_standard: CppStandard,
    /// Warning numbers to suppress.
    pub disabled_warnings: Vec<String>,
    pub defines: Vec<String>,
}

impl Default for DefaultsPolicy {
    fn default() -> Self {
        Self {
            additional_options: vec!["/utf-8".to_string()],
            exceptions: ExceptionHandling::Enable,
            cpp_standard: CppStandard::Latest,
            disabled_warnings: vec!["4201".to_string()],
            defines: Vec::new(),
        }
    }
}

impl DefaultsPolicy {
    /// Applies the policy. Applying it again leaves `conf` unchanged.
    pub fn apply(&self, conf: &mut Configuration) {
        for option in &self.additional_options {
            conf.add_option(option.as_str());
        }
        conf.add_option(CompilerOption::Exceptions(self.exceptions));
        conf.add_option(CompilerOption::LanguageStandard(self.cpp_standard));

        for warning in &self.disabled_warnings {
            conf.disable_warning(warning.as_str());
        }
        for define in &self.defines {
            conf.add_define(define.as_str());
        }
    }
}
