// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for hdn-make.

use crate::cli::generate::ListArgs;
use crate::cmd::generate::build_context;
use crate::config::Config;
use crate::driver::GenerationContext;
use crate::error::Result;

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if the declarations in `config` fail.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    let ctx = build_context(config)?;
    for line in list_lines(args, &ctx) {
        println!("{line}");
    }
    Ok(())
}

/// Lines printed by `list`.
#[must_use]
pub fn list_lines(args: &ListArgs, ctx: &GenerationContext) -> Vec<String> {
    if args.features {
        let entries = ctx.features().entries();
        if entries.is_empty() {
            return vec!["No feature tags registered".to_string()];
        }
        return entries.iter().map(ToString::to_string).collect();
    }

    if args.projects {
        if ctx.projects().is_empty() {
            return vec!["No projects declared".to_string()];
        }
        return ctx
            .projects()
            .iter()
            .map(|p| {
                format!(
                    "{} [{}] {} cells",
                    p.name(),
                    p.category(),
                    p.configurations().len()
                )
            })
            .collect();
    }

    if ctx.solutions().is_empty() {
        return vec!["No solutions declared".to_string()];
    }
    ctx.solutions()
        .iter()
        .map(|s| {
            let projects: Vec<&str> = s.entries().iter().map(|e| e.name()).collect();
            format!("{} = {}", s.name(), projects.join(", "))
        })
        .collect()
}
