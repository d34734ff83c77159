// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for hdn-make using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! hdnmake [global options] <command>
//! generate [solutions...]
//! list [--projects] [--features]
//! options
//! inis
//! version
//! ```

pub mod generate;
pub mod global;


use crate::cli::generate::{GenerateArgs, ListArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Hedron build configuration generator
///
/// Composes per-cell compiler configurations for every project and emits one
/// manifest per solution.
#[derive(Debug, Parser)]
#[command(
    name = "hdnmake",
    author,
    version,
    about = "Hedron build configuration generator",
    long_about = "hdn-make Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Composes per-cell compiler configurations for every project of\n\
                  the Hedron engine and emits one manifest per solution.\n\n\
                  Invoking `hdnmake generate` emits every solution. Do\n\
                  `hdnmake generate <solution>...` to emit specific solutions. See\n\
                  `hdnmake <command> --help` for more information about a command.",
    after_help = "INI FILES:\n\n\
                  Files given with --ini are loaded first, in order. Then `hdn.toml`\n\
                  in the current directory is loaded if it exists. HDN_* environment\n\
                  variables (HDN_GLOBAL__DRY=true) and --set options override both."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the INIs.
    Options,

    /// Lists the INIs used by hdnmake.
    Inis,

    /// Generates solutions.
    Generate(GenerateArgs),

    /// Lists solutions, projects or feature tags.
    List(ListArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
