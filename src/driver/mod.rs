// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generation driver.
//!
//! ```text
//! GenerationContext::new(defaults, markers)
//!   declare_project(decl, configure)   -> ProjectId     (declaration phase)
//!   register_solution(solution)                         (declaration phase)
//!   generate_all(&mut emitter)         -> Emission...   (read-only phase)
//!        per solution, registration order:
//!            resolve --> Emitter::emit --> Ok | EmitError
//!   clear()                                             (teardown)
//! ```
//!
//! Declaration errors abort immediately. Emission errors are reported per
//! solution and the remaining solutions are still emitted.

pub mod select;

use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};

use crate::configuration::{Configuration, DefaultsPolicy, OptimizationMarkers};
use crate::emit::{EmitOutput, Emitter, ResolvedProject, ResolvedSolution};
use crate::error::{DeclarationError, EmitError, HdnResult};
use crate::feature::FeatureRegistry;
use crate::logging::{cell_span, project_span, solution_span};
use crate::project::{Project, ProjectDecl, ProjectId};
use crate::solution::Solution;
use crate::target::Cell;

/// Registries for one generation run.
#[derive(Debug, Default)]
pub struct GenerationContext {
    defaults: DefaultsPolicy,
    markers: OptimizationMarkers,
    projects: Vec<Project>,
    project_index: BTreeMap<String, ProjectId>,
    solutions: Vec<Solution>,
    features: FeatureRegistry,
}

impl GenerationContext {
    #[must_use]
    pub fn new(defaults: DefaultsPolicy, markers: OptimizationMarkers) -> Self {
        Self {
            defaults,
            markers,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn defaults(&self) -> &DefaultsPolicy {
        &self.defaults
    }

    #[must_use]
    pub const fn markers(&self) -> &OptimizationMarkers {
        &self.markers
    }

    /// Declares a project and registers it.
    ///
    /// For each cell of the project's matrix, in order, a fresh
    /// configuration receives the defaults, then the optimization marker,
    /// then `configure`, and is sealed.
    ///
    /// # Errors
    ///
    /// - `DuplicateProject` if the name is taken.
    /// - `UnknownDependency` if a dependency has not been declared yet.
    /// - `UnrecognizedOptimizationLevel` if a cell's optimization is not
    ///   debug, release or retail.
    /// - `MarkerConflict` if `configure` removes the cell's marker or adds
    ///   another level's marker.
    pub fn declare_project<F>(&mut self, decl: ProjectDecl, mut configure: F) -> HdnResult<ProjectId>
    where
        F: FnMut(&mut Configuration, &Cell),
    {
        if self.project_index.contains_key(decl.name()) {
            return Err(DeclarationError::DuplicateProject(decl.name().to_string()).into());
        }
        if let Some(dependency) = decl
            .dependencies()
            .iter()
            .find(|d| !self.project_index.contains_key(d.as_str()))
        {
            return Err(DeclarationError::UnknownDependency {
                project: decl.name().to_string(),
                dependency: dependency.clone(),
            }
            .into());
        }

        let _project = project_span(decl.name()).entered();
        let matrix = *decl.matrix();
        let mut configurations = Vec::with_capacity(matrix.cell_count());
        for cell in matrix.cells() {
            let _cell = cell_span(&cell).entered();
            let mut conf = Configuration::new(cell);
            self.defaults.apply(&mut conf);
            self.markers.apply(&mut conf, cell.optimization())?;
            configure(&mut conf, &cell);
            self.markers.check(&conf, cell.optimization())?;
            configurations.push(conf.seal());
        }

        if configurations.len() != matrix.cell_count() {
            return Err(DeclarationError::MissingConfiguration {
                project: decl.name().to_string(),
                resolved: configurations.len(),
                expected: matrix.cell_count(),
            }
            .into());
        }

        let id = ProjectId::new(self.projects.len());
        debug!(category = %decl.category(), cells = configurations.len(), "Declared project");
        self.project_index.insert(decl.name().to_string(), id);
        self.projects.push(decl.into_project(id, configurations));
        Ok(id)
    }

    /// Returns the project with this id, if it belongs to this context.
    #[must_use]
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(id.index())
    }

    #[must_use]
    pub fn project_by_name(&self, name: &str) -> Option<&Project> {
        self.project_index
            .get(name)
            .and_then(|id| self.project(*id))
    }

    /// Projects in declaration order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Registers a solution for generation.
    ///
    /// # Errors
    ///
    /// - `DuplicateSolution` if a solution with the same name exists.
    /// - `UnknownProject` if an entry refers to a project this context did
    ///   not declare.
    pub fn register_solution(&mut self, solution: Solution) -> Result<(), DeclarationError> {
        if self.solutions.iter().any(|s| s.name() == solution.name()) {
            return Err(DeclarationError::DuplicateSolution(solution.name().to_string()));
        }

        for entry in solution.entries() {
            let known = self
                .project(entry.project())
                .is_some_and(|p| p.name() == entry.name());
            if !known {
                return Err(DeclarationError::UnknownProject {
                    solution: solution.name().to_string(),
                    project: entry.name().to_string(),
                });
            }
        }

        info!(solution = %solution.name(), projects = solution.entries().len(), "Registered solution");
        self.solutions.push(solution);
        Ok(())
    }

    /// Solutions in registration order.
    #[must_use]
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    #[must_use]
    pub const fn features(&self) -> &FeatureRegistry {
        &self.features
    }

    pub const fn features_mut(&mut self) -> &mut FeatureRegistry {
        &mut self.features
    }

    /// Pairs a solution with its projects' sealed configurations.
    ///
    /// # Errors
    ///
    /// Returns `EmitError::EmissionFailure` if an entry no longer resolves.
    pub fn resolve<'a>(&'a self, solution: &'a Solution) -> Result<ResolvedSolution<'a>, EmitError> {
        let startup = solution.startup_project();
        let projects = solution
            .entries()
            .iter()
            .map(|entry| {
                let project = self.project(entry.project()).ok_or_else(|| {
                    EmitError::EmissionFailure {
                        solution: solution.name().to_string(),
                        message: format!("project '{}' is not declared", entry.name()),
                    }
                })?;
                Ok(ResolvedProject::new(
                    project,
                    entry.cells(),
                    startup == Some(entry.project()),
                ))
            })
            .collect::<Result<Vec<_>, EmitError>>()?;

        Ok(ResolvedSolution::new(solution, projects))
    }

    /// Emits every registered solution, in registration order.
    ///
    /// The returned iterator is lazy: each `next()` emits one solution.
    pub fn generate_all<'a, E>(&'a self, emitter: &'a mut E) -> impl Iterator<Item = Emission<'a>> + 'a
    where
        E: Emitter + ?Sized,
    {
        self.generate(self.solutions.iter(), emitter)
    }

    /// Emits the given solutions in order.
    pub fn generate<'a, I, E>(
        &'a self,
        solutions: I,
        emitter: &'a mut E,
    ) -> impl Iterator<Item = Emission<'a>> + 'a
    where
        I: IntoIterator<Item = &'a Solution>,
        I::IntoIter: 'a,
        E: Emitter + ?Sized,
    {
        solutions.into_iter().map(move |solution| {
            let _span = solution_span(solution.name()).entered();
            let result = self
                .resolve(solution)
                .and_then(|resolved| emitter.emit(&resolved));

            match &result {
                Ok(output) => info!(artifacts = output.artifacts().len(), "Emitted solution"),
                Err(e) => error!(error = %e, "Failed to emit solution"),
            }

            Emission { solution, result }
        })
    }

    /// Drops every declaration, keeping the defaults and markers.
    pub fn clear(&mut self) {
        if !self.solutions.is_empty() {
            debug!(solutions = self.solutions.len(), projects = self.projects.len(), "Clearing context");
        }
        self.projects.clear();
        self.project_index.clear();
        self.solutions.clear();
        self.features = FeatureRegistry::new();
    }
}

/// Outcome of emitting one solution.
#[derive(Debug)]
pub struct Emission<'a> {
    pub solution: &'a Solution,
    pub result: Result<EmitOutput, EmitError>,
}

/// Outcome of one solution, detached from the context.
#[derive(Debug)]
pub struct SolutionOutcome {
    pub solution: String,
    pub result: Result<EmitOutput, EmitError>,
}

/// Per-solution results of a generation pass.
#[derive(Debug, Default)]
pub struct GenerationReport {
    outcomes: Vec<SolutionOutcome>,
}

impl GenerationReport {
    #[must_use]
    pub fn outcomes(&self) -> &[SolutionOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = &EmitError> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// One line per solution: `ok <name> (<n> artifacts)` or `FAILED <name>: <reason>`.
    #[must_use]
    pub fn summary(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .map(|o| match &o.result {
                Ok(output) => format!("ok     {} ({} artifacts)", o.solution, output.artifacts().len()),
                Err(e) => format!("FAILED {}: {e}", o.solution),
            })
            .collect()
    }
}

impl<'a> FromIterator<Emission<'a>> for GenerationReport {
    fn from_iter<T: IntoIterator<Item = Emission<'a>>>(iter: T) -> Self {
        let outcomes = iter
            .into_iter()
            .map(|e| SolutionOutcome {
                solution: e.solution.name().to_string(),
                result: e.result,
            })
            .collect();
        let report = Self { outcomes };
        if report.is_empty() {
            warn!("No solutions were generated");
        }
        report
    }
}
