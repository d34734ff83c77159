// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Solution declarations.
//!
//! ```text
//! Solution::new("Playground", targets)
//!   .add_project(&project, CellSelection::All)     cells must be resolved by
//!                                                  the project and be targets
//!                                                  of the solution
//!   .set_startup_project(&project)                 must be added first
//! ```

use tracing::debug;

use crate::error::DeclarationError;
use crate::project::{Project, ProjectId};
use crate::target::{Cell, TargetMatrix};

/// Which of the solution's cells a project takes part in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellSelection {
    /// Every cell of the solution's target matrix.
    All,
    /// An explicit subset.
    Cells(Vec<Cell>),
}

/// One project of a solution and the cells it is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionEntry {
    project: ProjectId,
    name: String,
    cells: Vec<Cell>,
}

impl SolutionEntry {
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    /// Name of the project at the time it was added.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// A named collection of projects over a target matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    name: String,
    targets: TargetMatrix,
    entries: Vec<SolutionEntry>,
    startup: Option<ProjectId>,
}

impl Solution {
    #[must_use]
    pub fn new(name: impl Into<String>, targets: TargetMatrix) -> Self {
        Self {
            name: name.into(),
            targets,
            entries: Vec::new(),
            startup: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn targets(&self) -> &TargetMatrix {
        &self.targets
    }

    /// Projects in the order they were added.
    #[must_use]
    pub fn entries(&self) -> &[SolutionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, project: ProjectId) -> Option<&SolutionEntry> {
        self.entries.iter().find(|e| e.project == project)
    }

    /// Adds `project` for the selected cells.
    ///
    /// Adding a project that is already part of the solution extends its
    /// cells. An empty selection adds nothing.
    ///
    /// # Errors
    ///
    /// - `CellOutsideSolution` if a cell is not one of the solution's targets.
    /// - `CellNotResolved` if the project has no configuration for a cell.
    pub fn add_project(
        &mut self,
        project: &Project,
        selection: CellSelection,
    ) -> Result<&mut Self, DeclarationError> {
        let cells: Vec<Cell> = match selection {
            CellSelection::All => self.targets.cells().collect(),
            CellSelection::Cells(cells) => cells,
        };

        for cell in &cells {
            if !self.targets.contains(cell) {
                return Err(DeclarationError::CellOutsideSolution {
                    solution: self.name.clone(),
                    cell: cell.to_string(),
                });
            }
            if !project.resolves(cell) {
                return Err(DeclarationError::CellNotResolved {
                    project: project.name().to_string(),
                    cell: cell.to_string(),
                });
            }
        }

        if cells.is_empty() {
            debug!(solution = %self.name, project = %project.name(), "Empty cell selection, project not added");
            return Ok(self);
        }
        debug!(solution = %self.name, project = %project.name(), cells = cells.len(), "Adding project");

        if let Some(entry) = self.entries.iter_mut().find(|e| e.project == project.id()) {
            for cell in cells {
                if !entry.cells.contains(&cell) {
                    entry.cells.push(cell);
                }
            }
        } else {
            let mut unique = Vec::with_capacity(cells.len());
            for cell in cells {
                if !unique.contains(&cell) {
                    unique.push(cell);
                }
            }
            self.entries.push(SolutionEntry {
                project: project.id(),
                name: project.name().to_string(),
                cells: unique,
            });
        }

        Ok(self)
    }

    /// Marks an already added project as the startup project.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProject` if the project was never added for at least
    /// one cell.
    pub fn set_startup_project(&mut self, project: &Project) -> Result<&mut Self, DeclarationError> {
        if self.entry(project.id()).is_none_or(|entry| entry.cells.is_empty()) {
            return Err(DeclarationError::UnknownProject {
                solution: self.name.clone(),
                project: project.name().to_string(),
            });
        }
        self.startup = Some(project.id());
        Ok(self)
    }

    #[must_use]
    pub const fn startup_project(&self) -> Option<ProjectId> {
        self.startup
    }

    /// Entry of the startup project, if one is set.
    #[must_use]
    pub fn startup_entry(&self) -> Option<&SolutionEntry> {
        self.startup.and_then(|id| self.entry(id))
    }
}

#[cfg(test)]
mod tests;
