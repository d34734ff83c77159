// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Solution selection by name or glob pattern.
//!
//! ```text
//! input ["Play*", "Idaes"]
//!   exact name  --> itself
//!   glob        --> every matching solution
//!   dedupe, registration order
//! ```

use std::collections::BTreeSet;

use anyhow::Context;
use wax::{Glob, Program};

use super::GenerationContext;
use crate::error::Result;
use crate::solution::Solution;

impl GenerationContext {
    /// Matches one pattern against registered solution names.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    pub fn match_solutions(&self, pattern: &str) -> Result<Vec<&Solution>> {
        if let Some(solution) = self.solutions().iter().find(|s| s.name() == pattern) {
            return Ok(vec![solution]);
        }

        let glob = Glob::new(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;

        Ok(self
            .solutions()
            .iter()
            .filter(|s| glob.is_match(s.name()))
            .collect())
    }

    /// Resolves patterns to solutions, without duplicates, in registration
    /// order. An empty pattern list selects everything.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is not a valid glob.
    pub fn select(&self, patterns: &[String]) -> Result<Vec<&Solution>> {
        if patterns.is_empty() {
            return Ok(self.solutions().iter().collect());
        }

        let mut selected = BTreeSet::new();
        for pattern in patterns {
            let matches = self.match_solutions(pattern)?;
            if matches.is_empty() {
                tracing::warn!(pattern = %pattern, "Pattern matched no solutions");
            }
            selected.extend(matches.into_iter().map(Solution::name));
        }

        Ok(self
            .solutions()
            .iter()
            .filter(|s| selected.contains(s.name()))
            .collect())
    }
}
