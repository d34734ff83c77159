// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON manifest emitter.
//!
//! Writes one `<name>.hdnsln.json` per solution. Field order and collection
//! order are fixed so identical declarations produce identical bytes.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::{EmitOutput, Emitter, ResolvedProject, ResolvedSolution};
use crate::configuration::SealedConfiguration;
use crate::error::EmitError;
use crate::project::Category;
use crate::target::Cell;

/// File extension of emitted manifests.
pub const MANIFEST_EXTENSION: &str = "hdnsln.json";

/// Whether `name` can be used as a file name inside the output directory.
#[must_use]
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !matches!(name, "." | "..")
}

#[derive(Serialize)]
struct SolutionManifest<'a> {
    name: &'a str,
    startup_project: Option<&'a str>,
    configurations: Vec<Cell>,
    projects: Vec<ProjectManifest<'a>>,
}

#[derive(Serialize)]
struct ProjectManifest<'a> {
    name: &'a str,
    folder: Category,
    source_dir: &'a str,
    dependencies: &'a [String],
    configurations: Vec<&'a SealedConfiguration>,
}

impl<'a> ProjectManifest<'a> {
    fn new(resolved: &ResolvedProject<'a>) -> Self {
        let project = resolved.project();
        Self {
            name: project.name(),
            folder: project.category(),
            source_dir: project.source_dir(),
            dependencies: project.dependencies(),
            configurations: resolved.configurations().collect(),
        }
    }
}

/// Writes solution manifests into a directory.
#[derive(Debug, Clone)]
pub struct ManifestEmitter {
    directory: PathBuf,
}

impl ManifestEmitter {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path the manifest for `solution` is written to.
    #[must_use]
    pub fn manifest_path(&self, solution: &str) -> PathBuf {
        self.directory.join(format!("{solution}.{MANIFEST_EXTENSION}"))
    }

    /// Renders the manifest without writing it.
    ///
    /// # Errors
    ///
    /// Returns `EmitError::EmissionFailure` if serialization fails.
    pub fn render(&self, solution: &ResolvedSolution<'_>) -> Result<String, EmitError> {
        let manifest = SolutionManifest {
            name: solution.name(),
            startup_project: solution.startup_project().map(|p| p.name()),
            configurations: solution.solution().targets().cells().collect(),
            projects: solution.projects().iter().map(ProjectManifest::new).collect(),
        };

        let mut rendered =
            serde_json::to_string_pretty(&manifest).map_err(|e| EmitError::EmissionFailure {
                solution: solution.name().to_string(),
                message: e.to_string(),
            })?;
        rendered.push('\n');
        Ok(rendered)
    }
}

impl Emitter for ManifestEmitter {
    fn emit(&mut self, solution: &ResolvedSolution<'_>) -> Result<EmitOutput, EmitError> {
        if !is_plain_file_name(solution.name()) {
            return Err(EmitError::EmissionFailure {
                solution: solution.name().to_string(),
                message: "solution name is not a valid file name".to_string(),
            });
        }
        let rendered = self.render(solution)?;
        let path = self.manifest_path(solution.name());

        let io_error = |source: std::io::Error, path: &Path| EmitError::Io {
            solution: solution.name().to_string(),
            path: path.display().to_string(),
            source,
        };

        std::fs::create_dir_all(&self.directory).map_err(|e| io_error(e, self.directory.as_path()))?;
        std::fs::write(&path, rendered).map_err(|e| io_error(e, path.as_path()))?;

        debug!(path = %path.display(), "Wrote solution manifest");
        Ok(EmitOutput::new(vec![path]))
    }
}
