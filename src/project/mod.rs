// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project declarations.
//!
//! ```text
//! ProjectDecl { name, matrix, category, source_dir, dependencies }
//!        |
//!        v  GenerationContext::declare_project(decl, |conf, cell| ..)
//!   for cell in matrix.cells():
//!       Configuration::new(cell)
//!         --> defaults --> optimization marker --> callback --> seal
//!        |
//!        v
//!   Project { .., configurations: [SealedConfiguration; cells] }
//! ```
//!
//! A project always holds exactly one sealed configuration per cell of the
//! matrix it was declared over, in cell order.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::configuration::SealedConfiguration;
use crate::target::{Cell, TargetMatrix};

/// Source directory used when a project does not name one.
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Solution folder a project is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Third-party code.
    External,
    /// Engine and game modules.
    #[default]
    Module,
    Plugin,
    /// Prototypes and playgrounds.
    Experimental,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::External => write!(f, "external"),
            Self::Module => write!(f, "module"),
            Self::Plugin => write!(f, "plugin"),
            Self::Experimental => write!(f, "experimental"),
        }
    }
}

/// Index of a project inside the [`GenerationContext`](crate::driver::GenerationContext)
/// that declared it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectId(usize);

impl ProjectId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Everything needed to declare a project except its per-cell callback.
#[derive(Debug, Clone, Builder)]
pub struct ProjectDecl {
    #[builder(into)]
    name: String,
    #[builder(setters(name = with_matrix), default = TargetMatrix::default_target())]
    matrix: TargetMatrix,
    #[builder(setters(name = with_category), default)]
    category: Category,
    #[builder(setters(name = with_source_dir), into, default = DEFAULT_SOURCE_DIR.to_string())]
    source_dir: String,
    /// Projects this one links against; they must be declared first.
    #[builder(setters(name = with_dependencies), default)]
    dependencies: Vec<String>,
}

impl ProjectDecl {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn matrix(&self) -> &TargetMatrix {
        &self.matrix
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub(crate) fn into_project(
        self,
        id: ProjectId,
        configurations: Vec<SealedConfiguration>,
    ) -> Project {
        Project {
            id,
            name: self.name,
            category: self.category,
            source_dir: self.source_dir,
            dependencies: self.dependencies,
            matrix: self.matrix,
            configurations,
        }
    }
}

/// A declared project with its sealed configurations.
#[derive(Debug, Clone)]
pub struct Project {
    id: ProjectId,
    name: String,
    category: Category,
    source_dir: String,
    dependencies: Vec<String>,
    matrix: TargetMatrix,
    configurations: Vec<SealedConfiguration>,
}

impl Project {
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn source_dir(&self) -> &str {
        &self.source_dir
    }

    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    #[must_use]
    pub const fn matrix(&self) -> &TargetMatrix {
        &self.matrix
    }

    /// Sealed configurations in cell order.
    #[must_use]
    pub fn configurations(&self) -> &[SealedConfiguration] {
        &self.configurations
    }

    #[must_use]
    pub fn configuration(&self, cell: &Cell) -> Option<&SealedConfiguration> {
        self.configurations.iter().find(|c| c.cell() == cell)
    }

    /// Whether the project has a configuration for `cell`.
    #[must_use]
    pub fn resolves(&self, cell: &Cell) -> bool {
        self.configuration(cell).is_some()
    }
}
