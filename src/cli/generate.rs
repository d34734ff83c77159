// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generate and list command arguments.

use clap::Args;

/// Arguments for the `generate` command.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Solutions to generate, by name or glob. Generates all solutions when empty.
    #[arg(value_name = "SOLUTION")]
    pub solutions: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Lists declared projects with their category and cell count.
    #[arg(short = 'p', long)]
    pub projects: bool,

    /// Lists registered feature tags.
    #[arg(short = 'f', long)]
    pub features: bool,
}
