// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generate command implementation.
//!
//! ```text
//! Config
//!   |  build_context
//!   v
//! GenerationContext
//!   features   builtin scene/light configurations
//!   projects   every project a solution names, dependencies first
//!   solutions  file order, each project over every solution cell
//!   |  select(patterns)
//!   v
//! generate --> ManifestEmitter | DryRunEmitter (--dry)
//!   |
//!   v
//! summary, non-zero exit if any solution failed
//! ```

use anyhow::{Context, bail};
use tracing::{debug, info};

use crate::cli::generate::GenerateArgs;
use crate::config::Config;
use crate::driver::{GenerationContext, GenerationReport};
use crate::emit::{DryRunEmitter, ManifestEmitter};
use crate::error::{DeclarationError, HdnResult, Result};
use crate::feature::scene;
use crate::project::ProjectDecl;
use crate::solution::{CellSelection, Solution};
use crate::target::TargetMatrix;

/// Declares every project and registers every solution of `config`.
///
/// # Errors
///
/// Returns the first declaration error: an invalid matrix, a dependency
/// cycle, a project that does not resolve a solution cell, and so on.
pub fn build_context(config: &Config) -> Result<GenerationContext> {
    let mut ctx = GenerationContext::new(config.defaults.clone(), config.markers.clone());
    scene::register_builtin(ctx.features_mut())?;

    let default_matrix = config.target.to_matrix("target")?;

    for decl in &config.solutions {
        for project in &decl.projects {
            declare_with_dependencies(&mut ctx, config, project, default_matrix, &mut Vec::new())
                .with_context(|| format!("failed to declare project '{project}'"))?;
        }
    }

    for decl in &config.solutions {
        let targets = match &decl.targets {
            Some(targets) => targets.to_matrix(&format!("solutions.{}.targets", decl.name))?,
            None => default_matrix,
        };

        let mut solution = Solution::new(decl.name.as_str(), targets);
        for name in &decl.projects {
            let project = ctx
                .project_by_name(name)
                .with_context(|| format!("project '{name}' was not declared"))?;
            solution.add_project(project, CellSelection::All)?;
        }
        if let Some(startup) = &decl.startup {
            let project = ctx
                .project_by_name(startup)
                .with_context(|| format!("startup project '{startup}' was not declared"))?;
            solution.set_startup_project(project)?;
        }

        ctx.register_solution(solution)?;
    }

    info!(
        projects = ctx.projects().len(),
        solutions = ctx.solutions().len(),
        "Declarations complete"
    );
    Ok(ctx)
}

/// Declares `name` after its dependencies, depth-first.
fn declare_with_dependencies(
    ctx: &mut GenerationContext,
    config: &Config,
    name: &str,
    default_matrix: TargetMatrix,
    stack: &mut Vec<String>,
) -> HdnResult<()> {
    if ctx.project_by_name(name).is_some() {
        return Ok(());
    }
    if stack.iter().any(|n| n == name) {
        stack.push(name.to_string());
        return Err(DeclarationError::DependencyCycle(stack.join(" -> ")).into());
    }

    let settings = config.project_settings(name);

    stack.push(name.to_string());
    for dependency in &settings.dependencies {
        declare_with_dependencies(ctx, config, dependency, default_matrix, stack)?;
    }
    stack.pop();

    let matrix = match &settings.targets {
        Some(targets) => targets.to_matrix(&format!("projects.{name}.targets"))?,
        None => default_matrix,
    };

    let decl = ProjectDecl::builder()
        .name(name)
        .with_matrix(matrix)
        .with_category(settings.category)
        .with_source_dir(settings.source_dir.as_str())
        .with_dependencies(settings.dependencies.clone())
        .build();

    ctx.declare_project(decl, |conf, _| {
        for option in &settings.additional_options {
            conf.add_option(option.as_str());
        }
        for define in &settings.defines {
            conf.add_define(define.as_str());
        }
        for warning in &settings.disabled_warnings {
            conf.disable_warning(warning.as_str());
        }
        debug!(options = conf.options().len(), defines = conf.defines().len(), "Configured cell");
    })?;
    Ok(())
}

/// Main handler for generate command.
///
/// # Errors
///
/// Returns an error if declarations fail, if an explicit pattern matches
/// nothing, or if any selected solution fails to emit.
pub fn run_generate_command(args: &GenerateArgs, config: &Config) -> Result<()> {
    let ctx = build_context(config)?;
    let selected = ctx.select(&args.solutions)?;

    if selected.is_empty() {
        if args.solutions.is_empty() {
            println!("No solutions declared");
            return Ok(());
        }
        bail!("no solution matches {}", args.solutions.join(", "));
    }

    let report: GenerationReport = if config.global.dry {
        let mut emitter = DryRunEmitter;
        ctx.generate(selected, &mut emitter).collect()
    } else {
        let mut emitter = ManifestEmitter::new(&config.output.directory);
        ctx.generate(selected, &mut emitter).collect()
    };

    for line in report.summary() {
        println!("{line}");
    }

    if report.has_failures() {
        bail!(
            "{} of {} solutions failed",
            report.failures().count(),
            report.outcomes().len()
        );
    }
    Ok(())
}
