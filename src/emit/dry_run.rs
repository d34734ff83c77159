// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Emitter that only logs.

use tracing::info;

use super::{EmitOutput, Emitter, ResolvedSolution};
use crate::error::EmitError;

/// Logs each solution and its configurations without writing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunEmitter;

impl Emitter for DryRunEmitter {
    fn emit(&mut self, solution: &ResolvedSolution<'_>) -> Result<EmitOutput, EmitError> {
        info!(
            solution = %solution.name(),
            projects = solution.projects().len(),
            configurations = solution.configuration_count(),
            startup = ?solution.startup_project().map(|p| p.name()),
            "[dry-run] Would emit solution"
        );

        for project in solution.projects() {
            for conf in project.configurations() {
                info!(
                    project = %project.project().name(),
                    cell = %conf.cell(),
                    command_line = %conf.command_line().join(" "),
                    "[dry-run] Configuration"
                );
            }
        }

        Ok(EmitOutput::default())
    }
}
