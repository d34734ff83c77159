// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Emitter seam.
//!
//! ```text
//! GenerationContext::resolve(solution) --> ResolvedSolution
//!                                               |
//!                          Emitter::emit(&ResolvedSolution)
//!                           |                        |
//!                    ManifestEmitter           DryRunEmitter
//!                <dir>/<name>.hdnsln.json       log only
//! ```

pub mod dry_run;
pub mod manifest;

pub use dry_run::DryRunEmitter;
pub use manifest::ManifestEmitter;

use std::path::PathBuf;

use crate::configuration::SealedConfiguration;
use crate::error::EmitError;
use crate::project::Project;
use crate::solution::Solution;
use crate::target::Cell;

/// Turns a fully resolved solution into build-system artifacts.
///
/// Called once per solution, synchronously.
pub trait Emitter {
    /// Emits one solution.
    ///
    /// # Errors
    ///
    /// Returns an `EmitError` if the solution could not be emitted. The
    /// driver reports it and moves on to the next solution.
    fn emit(&mut self, solution: &ResolvedSolution<'_>) -> Result<EmitOutput, EmitError>;
}

/// Artifacts an emitter produced for one solution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOutput {
    artifacts: Vec<PathBuf>,
}

impl EmitOutput {
    #[must_use]
    pub const fn new(artifacts: Vec<PathBuf>) -> Self {
        Self { artifacts }
    }

    #[must_use]
    pub fn artifacts(&self) -> &[PathBuf] {
        &self.artifacts
    }
}

/// A project as seen by one solution.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedProject<'a> {
    project: &'a Project,
    cells: &'a [Cell],
    startup: bool,
}

impl<'a> ResolvedProject<'a> {
    pub(crate) const fn new(project: &'a Project, cells: &'a [Cell], startup: bool) -> Self {
        Self {
            project,
            cells,
            startup,
        }
    }

    #[must_use]
    pub const fn project(&self) -> &'a Project {
        self.project
    }

    #[must_use]
    pub const fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    #[must_use]
    pub const fn is_startup(&self) -> bool {
        self.startup
    }

    /// Sealed configurations for the solution's cells, in solution cell order.
    pub fn configurations(&self) -> impl Iterator<Item = &'a SealedConfiguration> + use<'a> {
        let project = self.project;
        self.cells
            .iter()
            .filter_map(move |cell| project.configuration(cell))
    }
}

/// A solution with its projects' sealed configurations.
#[derive(Debug, Clone)]
pub struct ResolvedSolution<'a> {
    solution: &'a Solution,
    projects: Vec<ResolvedProject<'a>>,
}

impl<'a> ResolvedSolution<'a> {
    pub(crate) const fn new(solution: &'a Solution, projects: Vec<ResolvedProject<'a>>) -> Self {
        Self { solution, projects }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.solution.name()
    }

    #[must_use]
    pub const fn solution(&self) -> &'a Solution {
        self.solution
    }

    #[must_use]
    pub fn projects(&self) -> &[ResolvedProject<'a>] {
        &self.projects
    }

    #[must_use]
    pub fn startup_project(&self) -> Option<&'a Project> {
        self.projects
            .iter()
            .find(|p| p.is_startup())
            .map(ResolvedProject::project)
    }

    /// Total sealed configurations across all projects.
    #[must_use]
    pub fn configuration_count(&self) -> usize {
        self.projects.iter().map(|p| p.configurations().count()).sum()
    }
}
