// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                HdnError (16 bytes)
//!                       |
//!   +------+------+------+------+------+
//!   |      |      |      |      |      |
//!   v      v      v      v      v      v
//! Matrix  Conf   Decl  Feature  Emit  Config
//!  Box    Box    Box    Box     Box    Box
//!
//! Sub-errors:
//!   Matrix       InvalidMatrix
//!   Conf         UnrecognizedOptimizationLevel, MarkerConflict
//!   Declaration  UnknownProject, CellNotResolved, Duplicate*, ...
//!   Feature      DuplicateVersion, NoSuchVersion, EmptyCapability
//!   Emit         EmissionFailure (per solution, non-fatal)
//!   Config       ParseError, NotFound, MissingKey, InvalidValue
//! ```
//!
//! Everything except [`EmitError`] is raised while declarations are being
//! built and stops the run before anything is emitted.

use thiserror::Error;

use crate::target::TargetAxis;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`HdnError`].
pub type HdnResult<T> = std::result::Result<T, HdnError>;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum HdnError {
    /// Target matrix construction failed.
    #[error("matrix error: {0}")]
    Matrix(Box<MatrixError>),

    /// Per-cell configuration composition failed.
    #[error("configuration error: {0}")]
    Configuration(Box<ConfigurationError>),

    /// Project or solution declaration failed.
    #[error("declaration error: {0}")]
    Declaration(Box<DeclarationError>),

    /// Feature tag registry error.
    #[error("feature error: {0}")]
    Feature(Box<FeatureError>),

    /// Emitting a solution failed.
    #[error("emit error: {0}")]
    Emit(Box<EmitError>),

    /// Configuration file error.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for HdnError {
                fn from(err: $error) -> Self {
                    HdnError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    MatrixError => Matrix,
    ConfigurationError => Configuration,
    DeclarationError => Declaration,
    FeatureError => Feature,
    EmitError => Emit,
    ConfigError => Config,
}

// --- Matrix Errors ---

/// Target matrix errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// An axis of the matrix has no values, so the matrix has no cells.
    #[error("invalid target matrix: the {axis} axis is empty")]
    InvalidMatrix { axis: TargetAxis },
}

// --- Configuration Errors ---

/// Errors raised while composing a configuration for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The optimization level is not one of debug, release or retail.
    #[error("unrecognized optimization level (bits {bits:#04x}) for cell {cell}")]
    UnrecognizedOptimizationLevel { cell: String, bits: u8 },

    /// The project callback left the cell without its own marker or with
    /// another level's marker.
    #[error("cell {cell} must carry only the '{expected}' marker, found [{found}]")]
    MarkerConflict {
        cell: String,
        expected: String,
        found: String,
    },
}

// --- Declaration Errors ---

/// Project and solution declaration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The project is not part of the solution (or not known to the context).
    #[error("project '{project}' is not part of solution '{solution}'")]
    UnknownProject { solution: String, project: String },

    /// The project does not resolve a configuration for a requested cell.
    #[error("project '{project}' has no configuration for cell {cell}")]
    CellNotResolved { project: String, cell: String },

    /// The requested cell is not one of the solution's targets.
    #[error("cell {cell} is not a target of solution '{solution}'")]
    CellOutsideSolution { solution: String, cell: String },

    /// A project with this name was already declared.
    #[error("project '{0}' is already declared")]
    DuplicateProject(String),

    /// A solution with this name was already registered.
    #[error("solution '{0}' is already registered")]
    DuplicateSolution(String),

    /// A project depends on a project that has not been declared.
    #[error("project '{project}' depends on undeclared project '{dependency}'")]
    UnknownDependency { project: String, dependency: String },

    /// Project dependencies form a cycle.
    #[error("dependency cycle detected at project '{0}'")]
    DependencyCycle(String),

    /// A project ended its declaration without a configuration per cell.
    #[error("project '{project}' resolved {resolved} of {expected} configurations")]
    MissingConfiguration {
        project: String,
        resolved: usize,
        expected: usize,
    },
}

// --- Feature Errors ---

/// Feature tag registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// Another implementation is already registered at this version.
    #[error(
        "{capability} v{version} is already provided by '{existing}', cannot register '{implementation}'"
    )]
    DuplicateVersion {
        capability: String,
        version: u32,
        existing: String,
        implementation: String,
    },

    /// Nothing is registered for this capability at this version.
    #[error("no implementation of {capability} at v{version}")]
    NoSuchVersion { capability: String, version: u32 },

    /// Nothing is registered for this capability at all.
    #[error("no implementation registered for {0}")]
    EmptyCapability(String),

    /// The stored factory does not produce the requested capability.
    #[error("factory for {capability} v{version} has an unexpected type")]
    FactoryMismatch { capability: String, version: u32 },
}

// --- Emit Errors ---

/// Errors reported by an [`Emitter`](crate::emit::Emitter).
#[derive(Debug, Error)]
pub enum EmitError {
    /// The emitter could not produce output for a solution.
    #[error("failed to emit solution '{solution}': {message}")]
    EmissionFailure { solution: String, message: String },

    /// I/O failure while writing a solution's artifacts.
    #[error("failed to write '{path}' for solution '{solution}': {source}")]
    Io {
        solution: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl EmitError {
    /// Name of the solution this error belongs to.
    #[must_use]
    pub fn solution(&self) -> &str {
        match self {
            Self::EmissionFailure { solution, .. } | Self::Io { solution, .. } => solution,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The layered sources could not be merged or deserialized.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A required configuration file does not exist.
    #[error("config file not found: {0}")]
    NotFound(String),
}
